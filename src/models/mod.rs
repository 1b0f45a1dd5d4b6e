//! Typed schemas for everything the inventory backend sends and accepts.
//!
//! Field names on the wire are the backend's camelCase names; decoding
//! happens once at the fetch boundary so the rest of the crate never sees
//! loose JSON.

mod catalog;
mod elements;
pub(crate) mod lenient;
mod reports;
mod units;
mod users;

pub use catalog::{Category, NewProduct, Product, Reason};
pub use elements::{
    Element, ElementEgress, ElementIngress, ElementMovement, ElementUpdate, MovementAuthor,
    MovementKind, NewElement,
};
pub use reports::{
    Alert, DashboardReport, InventoryRow, Period, SalesByPeriod, SalesPoint, TopProduct,
    ValuedInventoryRow,
};
pub use units::{Cut, NewCut, NewUnit, NoteUpdate, StockUnit};
pub use users::{LoginResponse, NewUser, Role, UserRecord, UserUpdate};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
