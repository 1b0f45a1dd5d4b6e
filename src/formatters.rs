use crate::barcode::Decoded;
use crate::dashboard::{inventory_by_category, kpis, DashboardView};
use crate::elements::ElementStats;
use crate::history::{product_counters, HistoryStats, TopSeller};
use crate::inventory::active_units_of;
use crate::models::{
    Alert, Category, Element, ElementMovement, MovementKind, Product, Reason, StockUnit,
    UserRecord,
};

/// Grams as kilograms with one decimal
pub fn kg(grams: f64) -> String {
    format!("{:.1} kg", grams / 1000.0)
}

pub fn format_scan(decoded: &Decoded<'_>) -> String {
    format!(
        "{} (PLU {}, {}): {}g\n",
        decoded.product.name, decoded.product.plu, decoded.product.category.name, decoded.grams
    )
}

/// Unit table for the inventory and history listings
pub fn format_units(units: &[&StockUnit]) -> String {
    if units.is_empty() {
        return "No units found.\n".to_string();
    }

    let name_width = units
        .iter()
        .map(|u| u.product.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Product".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<name_width$}  {:>5}  {:>9}  {:>9}  {:>5}  {:<8}  {}\n",
        "ID", "Product", "PLU", "Initial", "Current", "Cuts", "Status", "Intake"
    ));
    for unit in units {
        let status = if unit.active { "active" } else { "depleted" };
        output.push_str(&format!(
            "{:>6}  {:<name_width$}  {:>5}  {:>8}g  {:>8}g  {:>5}  {:<8}  {}",
            unit.id,
            unit.product.name,
            unit.product.plu,
            unit.initial_grams,
            unit.current_grams,
            unit.cuts.len(),
            status,
            unit.created_at.format("%Y-%m-%d %H:%M"),
        ));
        if let Some(note) = unit.intake_note.as_deref().filter(|n| !n.trim().is_empty()) {
            output.push_str(&format!(" - Note: {}", note.trim()));
        }
        output.push('\n');
    }
    output
}

/// Distinct products of `units`, in order of first appearance
fn distinct_products<'a>(units: &[&'a StockUnit]) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = Vec::new();
    for &unit in units {
        if !products.iter().any(|p| p.id == unit.product.id) {
            products.push(&unit.product);
        }
    }
    products
}

/// Stock badge per listed product, counted over every active unit
pub fn format_active_counts(shown: &[&StockUnit], active: &[StockUnit]) -> String {
    let mut output = String::new();
    for product in distinct_products(shown) {
        let count = active_units_of(active, product.id);
        output.push_str(&format!(
            "{}: {} active {}\n",
            product.name,
            count,
            if count == 1 { "unit" } else { "units" }
        ));
    }
    output
}

/// Active, depleted and sold weight per listed product, counted over the
/// whole history
pub fn format_product_counters(shown: &[&StockUnit], history: &[StockUnit]) -> String {
    let mut output = String::new();
    for product in distinct_products(shown) {
        let counters = product_counters(history, product.id);
        output.push_str(&format!(
            "{}: {} active, {} depleted, {} sold\n",
            product.name,
            counters.active_units,
            counters.depleted_units,
            kg(counters.sold_grams as f64)
        ));
    }
    output
}

/// Cut history of a single unit
pub fn format_cuts(unit: &StockUnit) -> String {
    let mut output = format!(
        "Unit #{} {} - {}g of {}g left\n",
        unit.id, unit.product.name, unit.current_grams, unit.initial_grams
    );
    if unit.cuts.is_empty() {
        output.push_str("    no cuts yet\n");
    }
    for cut in &unit.cuts {
        output.push_str(&format!(
            "    {} {:>6}g",
            cut.created_at.format("%Y-%m-%d %H:%M"),
            cut.grams
        ));
        if let Some(reason) = &cut.reason {
            output.push_str(&format!(" [{}]", reason.name));
        }
        if let Some(note) = &cut.note {
            output.push_str(&format!(" {note}"));
        }
        output.push('\n');
    }
    output
}

pub fn format_stats(stats: &HistoryStats) -> String {
    let mut output = String::new();
    output.push_str("========================\n");
    output.push_str(&format!(
        "Records: {} ({} active, {} depleted)\n",
        stats.total, stats.active, stats.depleted
    ));
    output.push_str(&format!("Products: {}\n", stats.distinct_products));
    output.push_str(&format!("Received: {}\n", kg(stats.initial_grams as f64)));
    output.push_str(&format!("Dispensed: {}\n", kg(stats.dispensed_grams as f64)));
    output.push_str(&format!("Sold (depleted units): {}\n", kg(stats.sold_grams as f64)));
    output
}

pub fn format_top_sellers(ranking: &[TopSeller]) -> String {
    if ranking.is_empty() {
        return "No depleted units yet.\n".to_string();
    }
    let mut output = String::new();
    for (position, seller) in ranking.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} - {} in {} {} (avg {:.0}g)\n",
            position + 1,
            seller.name,
            kg(seller.dispensed_grams as f64),
            seller.cuts,
            if seller.cuts == 1 { "cut" } else { "cuts" },
            seller.average_cut_grams
        ));
    }
    output
}

pub fn format_products(products: &[Product]) -> String {
    let mut output = String::new();
    for product in products {
        let price = product
            .price
            .map(|p| format!(" ${p:.2}"))
            .unwrap_or_default();
        let per_unit = if product.sold_by_unit { " (per unit)" } else { "" };
        let inactive = if product.active == Some(false) { " [inactive]" } else { "" };
        output.push_str(&format!(
            "{:>4}  {}  {} - {}{}{}{}\n",
            product.id, product.plu, product.name, product.category.name, price, per_unit, inactive
        ));
    }
    output
}

pub fn format_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| format!("{:>4}  {}\n", c.id, c.name))
        .collect()
}

pub fn format_reasons(reasons: &[Reason]) -> String {
    reasons
        .iter()
        .map(|r| match &r.description {
            Some(description) => format!("{:>4}  {} - {}\n", r.id, r.name, description),
            None => format!("{:>4}  {}\n", r.id, r.name),
        })
        .collect()
}

pub fn format_users(users: &[UserRecord]) -> String {
    users
        .iter()
        .map(|u| format!("{:>4}  {:<20}  {}\n", u.id, u.username, u.role))
        .collect()
}

pub fn format_elements(elements: &[&Element], stats: &ElementStats) -> String {
    let mut output = String::new();
    for element in elements {
        let low = if element.available_quantity <= crate::elements::LOW_STOCK_THRESHOLD {
            " LOW"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:>4}  {:<24}  {:>5}/{:<5} ({:>3}%){}{}\n",
            element.id,
            element.name,
            element.available_quantity,
            element.total_quantity,
            element.available_percent(),
            low,
            if element.active { "" } else { " [inactive]" }
        ));
    }
    output.push_str("========================\n");
    output.push_str(&format!(
        "Available: {} of {} | Active: {} | Low stock: {}\n",
        stats.total_available, stats.total_historic, stats.active, stats.low_stock
    ));
    output
}

pub fn format_movements(movements: &[ElementMovement]) -> String {
    if movements.is_empty() {
        return "No movements recorded.\n".to_string();
    }
    let mut output = String::new();
    for movement in movements {
        let sign = match movement.kind {
            MovementKind::Ingress => '+',
            MovementKind::Egress => '-',
        };
        output.push_str(&format!(
            "{}  {}{:<5}",
            movement.created_at.format("%Y-%m-%d %H:%M"),
            sign,
            movement.quantity
        ));
        if let Some(reason) = &movement.reason {
            output.push_str(&format!(" [{}]", reason.name));
        }
        if let Some(notes) = &movement.notes {
            output.push_str(&format!(" {notes}"));
        }
        if let Some(email) = movement.created_by.as_ref().and_then(|a| a.email.as_deref()) {
            output.push_str(&format!(" by {email}"));
        }
        output.push('\n');
    }
    output
}

pub fn format_dashboard(view: &DashboardView) -> String {
    let kpis = kpis(view);
    let mut output = String::new();

    output.push_str(&format!("Units in stock: {}\n", kpis.active_units));
    output.push_str(&format!("Total weight: {}\n", kg(kpis.total_grams)));
    output.push_str(&format!("Inventory value: ${:.2}\n", kpis.total_value));
    output.push_str(&format!("Cuts ({}): {}\n", view.period, kpis.period_cuts));

    output.push_str("\nStock by category\n");
    for (label, total_kg) in inventory_by_category(&view.inventory) {
        output.push_str(&format!("    {label}: {total_kg:.1} kg\n"));
    }

    output.push_str(&format!("\nSales ({})\n", view.period));
    if view.sales.is_empty() {
        output.push_str("    no sales in this period\n");
    }
    for point in &view.sales {
        output.push_str(&format!(
            "    {}: {} in {} cuts\n",
            point.date.as_deref().unwrap_or("no date"),
            kg(point.total_grams),
            point.cuts
        ));
    }

    output.push_str("\nTop products\n");
    for product in view.top_products.iter().take(10) {
        output.push_str(&format!(
            "    {} - {} ({} cuts, avg {:.0}g)\n",
            product.name,
            kg(product.dispensed_grams),
            product.cuts,
            product.average_cut_grams
        ));
    }
    output
}

pub fn format_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No active alerts.\n".to_string();
    }
    let mut output = format!("Active alerts ({})\n", alerts.len());
    for alert in alerts {
        output.push_str(&format!(
            "    [{}] {}\n",
            alert.priority_or_default().to_uppercase(),
            alert.message
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::summarize;
    use crate::test_support::{at, product, unit};

    #[test]
    fn kilograms_have_one_decimal() {
        assert_eq!(kg(1500.0), "1.5 kg");
        assert_eq!(kg(0.0), "0.0 kg");
        assert_eq!(kg(12345.0), "12.3 kg");
    }

    #[test]
    fn unit_table_lists_every_unit() {
        let provolone = product(1, "Provolone", "20001", "Hilado");
        let mut noted = unit(7, &provolone, 1000, 0, false, &[600, 400], at(2024, 3, 1, 10, 0));
        noted.intake_note = Some("Lote 42".to_string());
        let fresh = unit(8, &provolone, 2000, 2000, true, &[], at(2024, 3, 2, 11, 30));

        let output = format_units(&[&noted, &fresh]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("depleted"));
        assert!(lines[1].ends_with("- Note: Lote 42"));
        assert!(lines[2].contains("2024-03-02 11:30"));
        assert_eq!(format_units(&[]), "No units found.\n");
    }

    #[test]
    fn per_product_counters_follow_listing_order() {
        let provolone = product(1, "Provolone", "20001", "Hilado");
        let sardo = product(2, "Sardo", "20002", "Duro");
        let history = vec![
            unit(1, &sardo, 2000, 0, false, &[2000], at(2024, 3, 1, 10, 0)),
            unit(2, &provolone, 1500, 0, false, &[1500], at(2024, 3, 1, 10, 0)),
            unit(3, &provolone, 1000, 1000, true, &[], at(2024, 3, 2, 10, 0)),
            unit(4, &sardo, 1000, 600, true, &[400], at(2024, 3, 2, 10, 0)),
        ];
        let shown: Vec<&StockUnit> = history.iter().skip(1).collect();

        assert_eq!(
            format_product_counters(&shown, &history),
            "Provolone: 1 active, 1 depleted, 1.5 kg sold\nSardo: 1 active, 1 depleted, 2.0 kg sold\n"
        );

        let active: Vec<StockUnit> = history.iter().filter(|u| u.active).cloned().collect();
        let listed: Vec<&StockUnit> = active.iter().collect();
        assert_eq!(
            format_active_counts(&listed, &active),
            "Provolone: 1 active unit\nSardo: 1 active unit\n"
        );
    }

    #[test]
    fn stats_block_in_kilograms() {
        let provolone = product(1, "Provolone", "20001", "Hilado");
        let units = vec![
            unit(1, &provolone, 1500, 0, false, &[1500], at(2024, 3, 1, 10, 0)),
            unit(2, &provolone, 1000, 700, true, &[300], at(2024, 3, 1, 10, 0)),
        ];
        let output = format_stats(&summarize(&units));
        assert!(output.contains("Records: 2 (1 active, 1 depleted)"));
        assert!(output.contains("Received: 2.5 kg"));
        assert!(output.contains("Dispensed: 1.8 kg"));
        assert!(output.contains("Sold (depleted units): 1.5 kg"));
    }

    #[test]
    fn top_sellers_are_numbered() {
        let ranking = vec![
            TopSeller {
                name: "Sardo".to_string(),
                dispensed_grams: 3000,
                cuts: 4,
                average_cut_grams: 750.0,
            },
            TopSeller {
                name: "Brie".to_string(),
                dispensed_grams: 200,
                cuts: 1,
                average_cut_grams: 200.0,
            },
        ];
        let output = format_top_sellers(&ranking);
        assert_eq!(
            output,
            "  1. Sardo - 3.0 kg in 4 cuts (avg 750g)\n  2. Brie - 0.2 kg in 1 cut (avg 200g)\n"
        );
    }

    #[test]
    fn alerts_default_to_low_priority() {
        let alerts = vec![Alert {
            kind: None,
            priority: None,
            message: "Sin ventas hoy".to_string(),
            details: None,
        }];
        assert_eq!(format_alerts(&alerts), "Active alerts (1)\n    [BAJA] Sin ventas hoy\n");
        assert_eq!(format_alerts(&[]), "No active alerts.\n");
    }
}
