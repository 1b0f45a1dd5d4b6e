//! Auxiliary consumables: list filtering, stock summary and movement checks.

use crate::error::ValidationError;
use crate::models::{Element, ElementEgress, ElementIngress, MovementKind, NewElement};

/// Available quantity at or below which an element counts as running low
pub const LOW_STOCK_THRESHOLD: u64 = 5;

pub fn filter<'a>(elements: &'a [Element], query: &str, active_only: bool) -> Vec<&'a Element> {
    let needle = query.to_lowercase();
    elements
        .iter()
        .filter(|e| !active_only || e.active)
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.id.to_string().contains(&needle)
                || e
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementStats {
    pub total_available: u64,
    pub total_historic: u64,
    pub active: usize,
    pub low_stock: usize,
}

pub fn stats(elements: &[Element]) -> ElementStats {
    elements.iter().fold(ElementStats::default(), |mut acc, e| {
        acc.total_available += e.available_quantity;
        acc.total_historic += e.total_quantity;
        if e.active {
            acc.active += 1;
        }
        if e.available_quantity <= LOW_STOCK_THRESHOLD {
            acc.low_stock += 1;
        }
        acc
    })
}

fn check_quantity(element: &Element, kind: MovementKind, quantity: u64) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::Invalid(
            "Quantity must be greater than zero".to_string(),
        ));
    }
    if kind == MovementKind::Egress && quantity > element.available_quantity {
        return Err(ValidationError::Invalid(format!(
            "Only {} available for {}",
            element.available_quantity, element.name
        )));
    }
    Ok(())
}

pub fn plan_ingress(
    element: &Element,
    quantity: u64,
    notes: Option<&str>,
) -> Result<ElementIngress, ValidationError> {
    check_quantity(element, MovementKind::Ingress, quantity)?;
    Ok(ElementIngress {
        quantity,
        notes: notes.filter(|n| !n.trim().is_empty()).map(str::to_string),
    })
}

pub fn plan_egress(
    element: &Element,
    quantity: u64,
    reason_id: Option<u64>,
    notes: Option<&str>,
) -> Result<ElementEgress, ValidationError> {
    check_quantity(element, MovementKind::Egress, quantity)?;
    Ok(ElementEgress {
        quantity,
        reason_id,
        notes: notes.filter(|n| !n.trim().is_empty()).map(str::to_string),
    })
}

pub fn validate_new(element: &NewElement) -> Result<(), ValidationError> {
    if element.name.trim().is_empty() {
        return Err(ValidationError::Missing("Element name"));
    }
    if element.total_quantity == 0 {
        return Err(ValidationError::Invalid(
            "Initial quantity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
