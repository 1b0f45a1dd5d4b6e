//! Checks run on form input before it is sent anywhere

use crate::error::ValidationError;
use crate::models::NewProduct;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const PLU_LEN: usize = 5;

pub fn validate_registration(
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() || confirmation.is_empty() {
        return Err(ValidationError::Invalid("All fields are required".to_string()));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::Invalid(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::Invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(ValidationError::Invalid("Passwords do not match".to_string()));
    }
    Ok(())
}

/// PLUs are fixed-width so they line up with the scale labels
pub fn validate_plu(plu: &str) -> Result<(), ValidationError> {
    if plu.len() == PLU_LEN && plu.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::Invalid(format!(
            "PLU must be exactly {PLU_LEN} digits (got {plu:?})"
        )))
    }
}

pub fn validate_product(product: &NewProduct) -> Result<(), ValidationError> {
    if product.name.trim().is_empty() {
        return Err(ValidationError::Missing("Product name"));
    }
    validate_plu(&product.plu)?;
    if product.price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(ValidationError::Invalid("Price cannot be negative".to_string()));
    }
    Ok(())
}
