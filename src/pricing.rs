//! Per-item price selection
//!
//! Only recorded (strictly positive) prices take part. When several markets
//! share the winning price, the first one in [`Market::ALL`] order wins.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{items::Item, markets::Market};

/// A market and the unit price chosen there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSelection {
    /// Chosen market
    pub market: Market,

    /// Unit price at that market
    pub unit_price: Decimal,
}

impl PriceSelection {
    /// Cost of `quantity` units at the selected price.
    pub fn cost(&self, quantity: Decimal) -> Decimal {
        self.unit_price.saturating_mul(quantity)
    }
}

/// Cheapest and most expensive recorded prices for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPricing {
    /// Cheapest recorded price
    pub cheapest: PriceSelection,

    /// Most expensive recorded price
    pub highest: PriceSelection,

    /// `cheapest.unit_price * quantity`
    pub optimized_cost: Decimal,

    /// `highest.unit_price * quantity`
    pub highest_cost: Decimal,
}

/// Returns the cheapest recorded price for an item, if any.
pub fn cheapest_price(item: &Item) -> Option<PriceSelection> {
    select(item, |candidate, best| candidate < best)
}

/// Returns the most expensive recorded price for an item, if any.
pub fn highest_price(item: &Item) -> Option<PriceSelection> {
    select(item, |candidate, best| candidate > best)
}

/// Prices an item, or `None` if it has no recorded price anywhere.
pub fn price_item(item: &Item) -> Option<ItemPricing> {
    let cheapest = cheapest_price(item)?;
    let highest = highest_price(item)?;

    Some(ItemPricing {
        cheapest,
        highest,
        optimized_cost: cheapest.cost(item.quantity()),
        highest_cost: highest.cost(item.quantity()),
    })
}

/// Optimized contribution of an item; zero when nothing is priced.
pub fn optimal_cost(item: &Item) -> Decimal {
    cheapest_price(item).map_or(Decimal::ZERO, |selection| selection.cost(item.quantity()))
}

/// Worst-case contribution of an item; zero when nothing is priced.
pub fn highest_cost(item: &Item) -> Decimal {
    highest_price(item).map_or(Decimal::ZERO, |selection| selection.cost(item.quantity()))
}

/// Every market offering the item at its cheapest recorded price.
pub fn cheapest_markets(item: &Item) -> SmallVec<[Market; 3]> {
    let Some(cheapest) = cheapest_price(item) else {
        return SmallVec::new();
    };

    item.valid_prices()
        .filter(|(_, price)| *price == cheapest.unit_price)
        .map(|(market, _)| market)
        .collect()
}

/// Folds recorded prices in tie-break order, replacing the running choice only
/// when `better` holds strictly.
fn select(item: &Item, better: impl Fn(Decimal, Decimal) -> bool) -> Option<PriceSelection> {
    item.valid_prices()
        .fold(None, |best: Option<PriceSelection>, (market, price)| match best {
            Some(current) if !better(price, current.unit_price) => Some(current),
            _ => Some(PriceSelection {
                market,
                unit_price: price,
            }),
        })
}
