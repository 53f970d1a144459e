//! Cesta
//!
//! Cesta compares a shopping list across three supermarkets and prices the
//! optimized cart: every item bought wherever it is cheapest.

pub mod analysis;
pub mod categories;
pub mod fixtures;
pub mod items;
pub mod list;
pub mod markets;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod report;
pub mod totals;
pub mod units;
