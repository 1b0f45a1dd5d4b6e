//! Derived views over the fetched unit history.
//!
//! Everything here is a pure function of the input slice and the active
//! filters; callers recompute whenever either changes.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::collections::{HashMap, HashSet};

use crate::models::StockUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Depleted,
}

impl StatusFilter {
    pub fn matches(self, unit: &StockUnit) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => unit.active,
            StatusFilter::Depleted => !unit.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty string selects every category
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(trimmed.to_string())
        }
    }

    pub fn matches(&self, unit: &StockUnit) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => {
                unit.product.category.name.to_lowercase() == name.to_lowercase()
            }
        }
    }
}

/// Case-insensitive search over name, PLU and id, or over the intake note
/// alone when `notes_only` is set. An empty query matches everything.
pub fn matches_text(unit: &StockUnit, query: &str, notes_only: bool) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    if notes_only {
        return unit
            .intake_note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(&needle));
    }

    unit.product.name.to_lowercase().contains(&needle)
        || unit.product.plu.to_lowercase().contains(&needle)
        || unit.id.to_string().contains(&needle)
}

/// Inclusive day-granularity check. The timestamp is moved into `offset`
/// before its calendar day is taken.
pub fn within_dates(
    unit: &StockUnit,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    offset: FixedOffset,
) -> bool {
    let day = unit.created_at.with_timezone(&offset).date_naive();
    from.map_or(true, |start| day >= start) && to.map_or(true, |end| day <= end)
}

/// All history filters as selected in one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub query: String,
    pub notes_only: bool,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub offset: FixedOffset,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            category: CategoryFilter::All,
            query: String::new(),
            notes_only: false,
            from: None,
            to: None,
            offset: Utc.fix(),
        }
    }
}

impl HistoryFilter {
    pub fn matches(&self, unit: &StockUnit) -> bool {
        self.status.matches(unit)
            && self.category.matches(unit)
            && within_dates(unit, self.from, self.to, self.offset)
            && matches_text(unit, &self.query, self.notes_only)
    }

    pub fn apply<'a>(&self, units: &'a [StockUnit]) -> Vec<&'a StockUnit> {
        units.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Partition into (active, depleted) by the backend's `active` flag
pub fn split_by_status(units: &[StockUnit]) -> (Vec<&StockUnit>, Vec<&StockUnit>) {
    units.iter().partition(|u| u.active)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub total: usize,
    pub active: usize,
    pub depleted: usize,
    /// Sum of initial weights
    pub initial_grams: u64,
    /// Sum of `initial - current` over every record
    pub dispensed_grams: u64,
    /// Sum of `initial - current` over depleted records only
    pub sold_grams: u64,
    pub distinct_products: usize,
}

pub fn summarize<'a, I>(units: I) -> HistoryStats
where
    I: IntoIterator<Item = &'a StockUnit>,
{
    let mut stats = HistoryStats::default();
    let mut products = HashSet::new();

    for unit in units {
        stats.total += 1;
        if unit.active {
            stats.active += 1;
        } else {
            stats.depleted += 1;
            stats.sold_grams += u64::from(unit.dispensed_grams());
        }
        stats.initial_grams += u64::from(unit.initial_grams);
        stats.dispensed_grams += u64::from(unit.dispensed_grams());
        products.insert(unit.product.id);
    }

    stats.distinct_products = products.len();
    stats
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopSeller {
    pub name: String,
    pub dispensed_grams: u64,
    pub cuts: u64,
    pub average_cut_grams: f64,
}

/// Rank products by weight dispensed from depleted units.
///
/// Ties keep the order in which the products first appear in `units`.
pub fn top_sellers<'a, I>(units: I) -> Vec<TopSeller>
where
    I: IntoIterator<Item = &'a StockUnit>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<TopSeller> = Vec::new();

    for unit in units.into_iter().filter(|u| !u.active) {
        let slot = *index.entry(unit.product.name.as_str()).or_insert_with(|| {
            ranking.push(TopSeller {
                name: unit.product.name.clone(),
                dispensed_grams: 0,
                cuts: 0,
                average_cut_grams: 0.0,
            });
            ranking.len() - 1
        });
        if let Some(entry) = ranking.get_mut(slot) {
            entry.dispensed_grams += u64::from(unit.dispensed_grams());
            entry.cuts += unit.cuts.len() as u64;
        }
    }

    for entry in &mut ranking {
        entry.average_cut_grams = if entry.cuts == 0 {
            0.0
        } else {
            entry.dispensed_grams as f64 / entry.cuts as f64
        };
    }

    // sort_by is stable
    ranking.sort_by(|a, b| b.dispensed_grams.cmp(&a.dispensed_grams));
    ranking
}

/// Per-product counters shown on unit cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductCounters {
    pub active_units: usize,
    pub depleted_units: usize,
    pub sold_grams: u64,
}

pub fn product_counters(units: &[StockUnit], product_id: u64) -> ProductCounters {
    units
        .iter()
        .filter(|u| u.product.id == product_id)
        .fold(ProductCounters::default(), |mut acc, u| {
            if u.active {
                acc.active_units += 1;
            } else {
                acc.depleted_units += 1;
                acc.sold_grams += u64::from(u.initial_grams);
            }
            acc
        })
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
