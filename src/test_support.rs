//! Builders shared by the unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Category, Cut, Product, StockUnit};

pub fn product(id: u64, name: &str, plu: &str, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        plu: plu.to_string(),
        sold_by_unit: false,
        category: Category {
            id: id * 10,
            name: category.to_string(),
        },
        price: None,
        active: Some(true),
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn cut(id: u64, grams: u32, created_at: DateTime<Utc>) -> Cut {
    Cut {
        id,
        grams,
        created_at,
        note: None,
        reason: None,
    }
}

/// Unit whose cuts add up to `initial - current`, one cut per entry in `cut_grams`
pub fn unit(
    id: u64,
    product: &Product,
    initial: u32,
    current: u32,
    active: bool,
    cut_grams: &[u32],
    created_at: DateTime<Utc>,
) -> StockUnit {
    StockUnit {
        id,
        product: product.clone(),
        initial_grams: initial,
        current_grams: current,
        active,
        cuts: cut_grams
            .iter()
            .enumerate()
            .map(|(i, g)| cut(id * 100 + i as u64, *g, created_at))
            .collect(),
        created_at,
        updated_at: None,
        intake_note: None,
        reason: None,
    }
}
