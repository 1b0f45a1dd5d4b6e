//! Intake and cut flows: turn scans and typed weights into backend payloads.
//!
//! Stock arithmetic is the backend's job. These checks only stop requests
//! that can never succeed, such as cutting more than a unit has left.

use crate::barcode;
use crate::error::ValidationError;
use crate::history::matches_text;
use crate::models::{NewCut, NewUnit, Product, StockUnit};

pub const DEFAULT_CUT_NOTE: &str = "Cut without notes";
pub const FULL_EGRESS_NOTE: &str = "Final cut, unit depleted";

fn non_empty(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Build the intake for a freshly scanned piece. A reason is mandatory.
pub fn plan_intake(
    code: &str,
    catalog: &[Product],
    reason_id: Option<u64>,
    note: Option<&str>,
) -> Result<NewUnit, ValidationError> {
    let reason_id = reason_id.ok_or(ValidationError::Missing("Intake reason"))?;
    let decoded = barcode::decode(code, catalog)?;

    log::info!(
        "Planned intake of {} ({}g)",
        decoded.product.name,
        decoded.grams
    );
    Ok(NewUnit {
        product_id: decoded.product.id,
        initial_grams: decoded.grams,
        intake_note: non_empty(note),
        reason_id: Some(reason_id),
    })
}

/// Cut a typed weight from `unit`
pub fn plan_cut(
    unit: &StockUnit,
    grams: u32,
    note: Option<&str>,
    reason_id: Option<u64>,
) -> Result<NewCut, ValidationError> {
    if grams > unit.current_grams {
        return Err(ValidationError::InsufficientStock {
            available: unit.current_grams,
        });
    }
    Ok(NewCut {
        grams,
        note: non_empty(note).unwrap_or_else(|| DEFAULT_CUT_NOTE.to_string()),
        reason_id,
    })
}

/// Cut worked out from the label of the piece that stays on the counter:
/// the cut is whatever the remaining piece no longer weighs.
pub fn plan_cut_from_label(
    unit: &StockUnit,
    code: &str,
    catalog: &[Product],
    note: Option<&str>,
    reason_id: Option<u64>,
) -> Result<NewCut, ValidationError> {
    let decoded = barcode::decode(code, catalog)?;
    if decoded.product.id != unit.product.id {
        log::warn!(
            "Label is for {} but unit #{} holds {}",
            decoded.product.name,
            unit.id,
            unit.product.name
        );
    }
    if decoded.grams > unit.current_grams {
        return Err(ValidationError::ScannedAboveRemaining {
            scanned: decoded.grams,
            available: unit.current_grams,
        });
    }
    plan_cut(unit, unit.current_grams - decoded.grams, note, reason_id)
}

/// Take everything that is left
pub fn plan_full_egress(unit: &StockUnit, reason_id: Option<u64>) -> Result<NewCut, ValidationError> {
    if unit.current_grams == 0 {
        return Err(ValidationError::Depleted(unit.id));
    }
    Ok(NewCut {
        grams: unit.current_grams,
        note: FULL_EGRESS_NOTE.to_string(),
        reason_id,
    })
}

/// Active units matching the inventory search box
pub fn filter_active<'a>(units: &'a [StockUnit], query: &str, notes_only: bool) -> Vec<&'a StockUnit> {
    units
        .iter()
        .filter(|u| u.active && matches_text(u, query, notes_only))
        .collect()
}

/// Active units of one product (stock badge on the inventory cards)
pub fn active_units_of(units: &[StockUnit], product_id: u64) -> usize {
    units
        .iter()
        .filter(|u| u.active && u.product.id == product_id)
        .count()
}
