//! Scale-label barcode decoding.
//!
//! Labels are 13 ASCII digits: a 2-digit prefix, the 5-digit PLU, the weight
//! in grams (5 digits) and a trailing check digit. Neither the prefix nor the
//! check digit is validated.

use crate::error::BarcodeError;
use crate::models::Product;

/// Total length of a scale label
pub const BARCODE_LEN: usize = 13;

const PLU_RANGE: std::ops::Range<usize> = 2..7;
const WEIGHT_RANGE: std::ops::Range<usize> = 7..12;

/// Product and weight read from a label
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'a> {
    pub product: &'a Product,
    pub grams: u32,
}

/// Decode `code` against the product catalog.
///
/// Does not compare the weight with any unit's remaining stock; cut flows do
/// that themselves.
pub fn decode<'a>(code: &str, catalog: &'a [Product]) -> Result<Decoded<'a>, BarcodeError> {
    let len = code.chars().count();
    if len != BARCODE_LEN {
        return Err(BarcodeError::InvalidLength { len });
    }

    if !code.is_ascii() {
        return Err(BarcodeError::NonAscii {
            code: code.to_string(),
        });
    }

    let plu = &code[PLU_RANGE];
    let raw_weight = &code[WEIGHT_RANGE];

    let grams = parse_weight(raw_weight).ok_or_else(|| BarcodeError::InvalidWeight {
        raw: raw_weight.to_string(),
    })?;

    let product = catalog
        .iter()
        .find(|p| p.plu == plu)
        .ok_or_else(|| BarcodeError::ProductNotFound {
            plu: plu.to_string(),
        })?;

    log::debug!("Decoded barcode {code}: {} ({grams}g)", product.name);
    Ok(Decoded { product, grams })
}

fn parse_weight(raw: &str) -> Option<u32> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|grams| *grams > 0)
}

#[cfg(test)]
#[path = "barcode_tests.rs"]
mod tests;
