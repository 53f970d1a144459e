//! Cesta prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analysis::{Analysis, CategoryBreakdown, CategoryTotals, MarketShare, analyze},
    fixtures::{Fixture, FixtureError},
    items::{Item, ItemError},
    list::{ListError, ShoppingList, SortDirection, SortKey},
    markets::{Market, MarketError, MarketMap},
    prices::UnitPrice,
    pricing::{ItemPricing, PriceSelection, cheapest_price, highest_price, price_item},
    products::{Product, ProductCatalog, ProductKey},
    report::{CartReport, CategoryOrder, ReportError},
    totals::Totals,
    units::{Unit, UnitError},
};
