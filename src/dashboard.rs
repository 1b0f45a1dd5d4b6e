//! Dashboard aggregates.
//!
//! The backend report is used as-is when a section has data. Empty
//! sections are rebuilt from the unit lists the client already holds.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};

use crate::history::top_sellers;
use crate::models::{
    DashboardReport, InventoryRow, Period, SalesPoint, StockUnit, TopProduct, ValuedInventoryRow,
};

/// Label used when an inventory row carries no name
pub const UNLABELED: &str = "Others";

/// Report sections ready to display for one period
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub period: Period,
    pub inventory: Vec<InventoryRow>,
    pub sales: Vec<SalesPoint>,
    pub top_products: Vec<TopProduct>,
    pub valued_inventory: Vec<ValuedInventoryRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    pub active_units: usize,
    pub total_grams: f64,
    pub total_value: f64,
    pub period_cuts: u64,
}

/// Merge the backend report with fallbacks computed from `units` (active
/// stock) and `history` (every unit).
pub fn build(
    report: &DashboardReport,
    units: &[StockUnit],
    history: &[StockUnit],
    period: Period,
    now: DateTime<FixedOffset>,
) -> DashboardView {
    let inventory = if report.current_inventory.is_empty() {
        inventory_from_units(units)
    } else {
        report.current_inventory.clone()
    };

    let reported_sales = report.sales.for_period(period);
    let sales = if reported_sales.is_empty() {
        sales_from_history(history, period, now)
    } else {
        reported_sales.to_vec()
    };

    let top_products = if report.top_products.is_empty() {
        top_products_from_history(history)
    } else {
        report.top_products.clone()
    };

    DashboardView {
        period,
        inventory,
        sales,
        top_products,
        valued_inventory: report.valued_inventory.clone(),
    }
}

/// One row per active unit, labeled with the product name
pub fn inventory_from_units(units: &[StockUnit]) -> Vec<InventoryRow> {
    units
        .iter()
        .filter(|u| u.active)
        .map(|u| InventoryRow {
            label: Some(u.product.name.clone()),
            units: 1,
            total_grams: f64::from(u.current_grams),
        })
        .collect()
}

/// First instant counted in `period`: local midnight for today, otherwise
/// 7 or 30 days before `now`.
pub fn period_start(period: Period, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    match period {
        Period::Today => {
            let midnight = now.date_naive().and_time(NaiveTime::MIN);
            now.timezone()
                .from_local_datetime(&midnight)
                .single()
                .unwrap_or(now)
        }
        Period::Week => now - Duration::days(7),
        Period::Month => now - Duration::days(30),
    }
}

/// Depleted units whose last update falls inside the period, grouped by
/// local calendar day in order of first appearance.
pub fn sales_from_history(
    history: &[StockUnit],
    period: Period,
    now: DateTime<FixedOffset>,
) -> Vec<SalesPoint> {
    let start = period_start(period, now);
    let offset = now.timezone();
    let mut days: Vec<SalesPoint> = Vec::new();

    for unit in history.iter().filter(|u| !u.active) {
        let Some(updated) = unit.updated_at else {
            continue;
        };
        let local = updated.with_timezone(&offset);
        if local < start {
            continue;
        }
        let day = local.format("%Y-%m-%d").to_string();
        match days.iter_mut().find(|p| p.date.as_deref() == Some(day.as_str())) {
            Some(point) => {
                point.total_grams += f64::from(unit.initial_grams);
                point.cuts += 1;
            }
            None => days.push(SalesPoint {
                date: Some(day),
                total_grams: f64::from(unit.initial_grams),
                cuts: 1,
            }),
        }
    }
    days
}

pub fn top_products_from_history(history: &[StockUnit]) -> Vec<TopProduct> {
    top_sellers(history)
        .into_iter()
        .map(|seller| TopProduct {
            name: seller.name,
            dispensed_grams: seller.dispensed_grams as f64,
            cuts: seller.cuts,
            average_cut_grams: seller.average_cut_grams,
        })
        .collect()
}

pub fn kpis(view: &DashboardView) -> Kpis {
    Kpis {
        active_units: view.inventory.len(),
        total_grams: view.inventory.iter().map(|row| row.total_grams).sum(),
        total_value: view.valued_inventory.iter().map(|row| row.total_value).sum(),
        period_cuts: view.sales.iter().map(|point| point.cuts).sum(),
    }
}

/// Stock weight per label in kilograms, in order of first appearance
pub fn inventory_by_category(rows: &[InventoryRow]) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let label = row.label.as_deref().unwrap_or(UNLABELED);
        let kg = row.total_grams / 1000.0;
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += kg,
            None => groups.push((label.to_string(), kg)),
        }
    }
    groups
}
