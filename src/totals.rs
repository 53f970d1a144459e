//! Totals
//!
//! Per-market subtotals answer "what would the whole list cost at this one
//! market", counting unpriced items as free. The optimized total buys every
//! item at its own cheapest market.

use rust_decimal::Decimal;

use crate::{
    items::Item,
    markets::{Market, MarketMap},
    pricing::optimal_cost,
};

/// Per-market subtotals plus the optimized cart total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    markets: MarketMap<Decimal>,
    optimized: Decimal,
}

impl Totals {
    /// Computes every total for a snapshot of items.
    pub fn compute(items: &[Item]) -> Self {
        Self {
            markets: market_totals(items),
            optimized: optimized_total(items),
        }
    }

    /// Subtotal if the whole list were bought at `market`.
    pub fn market(&self, market: Market) -> Decimal {
        *self.markets.get(market)
    }

    /// Every market subtotal.
    pub fn markets(&self) -> &MarketMap<Decimal> {
        &self.markets
    }

    /// Cost of the optimized cart.
    pub fn optimized(&self) -> Decimal {
        self.optimized
    }

    /// The market with the lowest non-zero subtotal.
    ///
    /// Ties go to the first market in tie-break order. `None` when no market
    /// has a positive subtotal.
    pub fn cheapest_market(&self) -> Option<Market> {
        self.markets
            .iter()
            .filter(|(_, total)| **total > Decimal::ZERO)
            .fold(None, |best: Option<(Market, Decimal)>, (market, total)| match best {
                Some((_, best_total)) if *total >= best_total => best,
                _ => Some((market, *total)),
            })
            .map(|(market, _)| market)
    }

    /// The largest market subtotal, or zero.
    pub fn highest_market_total(&self) -> Decimal {
        self.markets
            .values()
            .copied()
            .fold(Decimal::ZERO, Decimal::max)
    }

    /// How much the optimized cart saves over the most expensive single
    /// market. Zero unless both totals are positive.
    pub fn savings_vs_highest_market(&self) -> Decimal {
        let highest = self.highest_market_total();

        if self.optimized > Decimal::ZERO && highest > Decimal::ZERO {
            highest.saturating_sub(self.optimized)
        } else {
            Decimal::ZERO
        }
    }
}

/// Sums `price * quantity` per market; absent prices add zero.
pub fn market_totals(items: &[Item]) -> MarketMap<Decimal> {
    items.iter().fold(MarketMap::default(), |mut totals, item| {
        for (market, price) in item.prices().iter() {
            let total = totals.get_mut(market);
            *total = total.saturating_add(price.cost(item.quantity()));
        }

        totals
    })
}

/// Sums every item's cheapest contribution.
pub fn optimized_total(items: &[Item]) -> Decimal {
    items
        .iter()
        .map(optimal_cost)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
