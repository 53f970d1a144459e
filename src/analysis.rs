//! Cart analysis
//!
//! Groups every priced item's optimized and worst-case cost by category and
//! by the market the optimized cart buys it from. Items without any recorded
//! price are skipped entirely: they have no cheapest market to count against.
//!
//! Sums saturate at [`Decimal::MAX`]. Past that point the market distribution
//! no longer adds up to the optimized total and several markets may report a
//! full share. Percentages are zero whenever their denominator is not
//! positive, which covers empty carts and non-positive quantities.

use std::cmp::Reverse;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    categories::{CATALOG, catalog_position, grouping_key},
    items::Item,
    markets::{Market, MarketMap},
    pricing::price_item,
};

/// Optimized and worst-case spend for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    /// Spend buying each item at its cheapest market
    pub optimized: Decimal,

    /// Spend buying each item at its most expensive market
    pub highest: Decimal,
}

impl CategoryTotals {
    /// `highest - optimized`
    pub fn savings(&self) -> Decimal {
        self.highest.saturating_sub(self.optimized)
    }

    /// Savings relative to the worst case; zero when nothing was spent.
    pub fn savings_percent(&self) -> Percentage {
        ratio(self.savings(), self.highest)
    }
}

/// What the optimized cart buys at one market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketShare {
    /// Number of items whose cheapest market is this one
    pub count: usize,

    /// Optimized spend at this market
    pub total_cost: Decimal,
}

/// One displayed row of the category breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryBreakdown<'a> {
    /// Category name
    pub category: &'a str,

    /// Category spend
    pub totals: CategoryTotals,

    /// Share of the optimized total spent in this category
    pub share: Percentage,

    /// Category savings relative to its worst case
    pub savings_percent: Percentage,
}

/// Category and market distribution of an item snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Category totals in first-encounter order
    categories: Vec<(String, CategoryTotals)>,

    /// Category name -> index into `categories`
    category_index: FxHashMap<String, usize>,

    distribution: MarketMap<MarketShare>,
    total_optimized: Decimal,
    total_highest: Decimal,
}

/// Analyzes a snapshot of items.
pub fn analyze(items: &[Item]) -> Analysis {
    let mut analysis = Analysis::default();

    for item in items {
        let Some(pricing) = price_item(item) else {
            continue;
        };

        if let Some(bucket) = analysis.category_mut(grouping_key(item.category())) {
            bucket.optimized = bucket.optimized.saturating_add(pricing.optimized_cost);
            bucket.highest = bucket.highest.saturating_add(pricing.highest_cost);
        }

        let share = analysis.distribution.get_mut(pricing.cheapest.market);
        share.count += 1;
        share.total_cost = share.total_cost.saturating_add(pricing.optimized_cost);

        analysis.total_optimized = analysis
            .total_optimized
            .saturating_add(pricing.optimized_cost);

        analysis.total_highest = analysis.total_highest.saturating_add(pricing.highest_cost);
    }

    analysis
}

impl Analysis {
    /// Totals for a category, if any priced item belongs to it.
    pub fn category(&self, category: &str) -> Option<&CategoryTotals> {
        self.category_index
            .get(category)
            .and_then(|idx| self.categories.get(*idx))
            .map(|(_, totals)| totals)
    }

    /// Every category bucket in first-encounter order, including zero-cost ones.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryTotals)> {
        self.categories
            .iter()
            .map(|(category, totals)| (category.as_str(), totals))
    }

    /// Per-market item counts and optimized spend.
    pub fn distribution(&self) -> &MarketMap<MarketShare> {
        &self.distribution
    }

    /// Distribution entry for one market.
    pub fn market(&self, market: Market) -> &MarketShare {
        self.distribution.get(market)
    }

    /// Share of the optimized total spent at `market`.
    pub fn market_percent(&self, market: Market) -> Percentage {
        ratio(self.market(market).total_cost, self.total_optimized)
    }

    /// Share of the optimized total spent in `category`.
    pub fn category_share_percent(&self, category: &str) -> Percentage {
        let optimized = self
            .category(category)
            .map_or(Decimal::ZERO, |totals| totals.optimized);

        ratio(optimized, self.total_optimized)
    }

    /// Sum of every item's cheapest contribution.
    pub fn total_optimized(&self) -> Decimal {
        self.total_optimized
    }

    /// Sum of every item's most expensive contribution.
    pub fn total_highest(&self) -> Decimal {
        self.total_highest
    }

    /// `total_highest - total_optimized`
    pub fn total_savings(&self) -> Decimal {
        self.total_highest.saturating_sub(self.total_optimized)
    }

    /// Total savings relative to the worst case.
    pub fn total_savings_percent(&self) -> Percentage {
        ratio(self.total_savings(), self.total_highest)
    }

    /// Categories with optimized spend, catalog categories first in catalog
    /// order, then unknown ones in the order they were first seen.
    pub fn breakdown(&self) -> Vec<CategoryBreakdown<'_>> {
        let mut rows: Vec<(usize, CategoryBreakdown<'_>)> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, (_, totals))| !totals.optimized.is_zero())
            .map(|(seen, (category, totals))| {
                let order = catalog_position(category).unwrap_or(CATALOG.len() + seen);

                (
                    order,
                    CategoryBreakdown {
                        category,
                        totals: *totals,
                        share: ratio(totals.optimized, self.total_optimized),
                        savings_percent: totals.savings_percent(),
                    },
                )
            })
            .collect();

        rows.sort_by_key(|(order, _)| *order);

        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// [`Analysis::breakdown`] ranked by descending optimized spend. Equal
    /// spends keep breakdown order.
    pub fn ranked_breakdown(&self) -> Vec<CategoryBreakdown<'_>> {
        let mut rows = self.breakdown();

        rows.sort_by_key(|row| Reverse(row.totals.optimized));

        rows
    }

    fn category_mut(&mut self, category: &str) -> Option<&mut CategoryTotals> {
        let next = self.categories.len();
        let idx = *self
            .category_index
            .entry(category.to_string())
            .or_insert(next);

        if idx == next {
            self.categories
                .push((category.to_string(), CategoryTotals::default()));
        }

        self.categories.get_mut(idx).map(|(_, totals)| totals)
    }
}

/// Converts a fractional percentage to percent points for display.
pub fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// `numerator / denominator` as a percentage clamped to `[0, 1]`; zero when
/// the denominator is not positive.
fn ratio(numerator: Decimal, denominator: Decimal) -> Percentage {
    if denominator <= Decimal::ZERO {
        return Percentage::from(Decimal::ZERO);
    }

    let fraction = numerator
        .checked_div(denominator)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE);

    Percentage::from(fraction)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, category: &str, prices: [i64; 3], quantity: i64) -> Item {
        let [iquegami, proenca, max] = prices;

        Item::new(id, id, Decimal::from(quantity))
            .with_category(category)
            .with_price(Market::Iquegami, Decimal::from(iquegami))
            .with_price(Market::Proenca, Decimal::from(proenca))
            .with_price(Market::Max, Decimal::from(max))
    }

    #[test]
    fn groups_by_category_and_market() -> TestResult {
        let items = [
            item("milk", "Frios e Laticínios", [5, 4, 6], 2),
            item("cheese", "Frios e Laticínios", [20, 25, 0], 1),
            item("soap", "Limpeza", [0, 12, 13], 1),
        ];

        let analysis = analyze(&items);

        let dairy = analysis.category("Frios e Laticínios").ok_or("missing dairy")?;
        assert_eq!(dairy.optimized, Decimal::from(28));
        assert_eq!(dairy.highest, Decimal::from(37));

        assert_eq!(
            *analysis.market(Market::Proenca),
            MarketShare {
                count: 2,
                total_cost: Decimal::from(20),
            }
        );
        assert_eq!(analysis.market(Market::Iquegami).count, 1);
        assert_eq!(analysis.market(Market::Max).count, 0);

        assert_eq!(analysis.total_optimized(), Decimal::from(40));
        assert_eq!(analysis.total_highest(), Decimal::from(50));
        assert_eq!(analysis.total_savings(), Decimal::from(10));

        Ok(())
    }

    #[test]
    fn unpriced_items_are_not_counted() {
        let items = [item("ghost", "Bebidas", [0, 0, 0], 3)];

        let analysis = analyze(&items);

        assert_eq!(analysis.categories().count(), 0);
        assert!(analysis.distribution().values().all(|s| s.count == 0));
        assert_eq!(analysis.total_optimized(), Decimal::ZERO);
    }

    #[test]
    fn category_keys_are_case_sensitive() {
        let items = [
            item("a", "Bebidas", [1, 0, 0], 1),
            item("b", "bebidas", [2, 0, 0], 1),
        ];

        assert_eq!(analyze(&items).categories().count(), 2);
    }

    #[test]
    fn empty_category_goes_to_default_bucket() {
        let items = [item("a", "", [3, 0, 0], 1)];

        let analysis = analyze(&items);

        assert_eq!(
            analysis.category("Outros").map(|t| t.optimized),
            Some(Decimal::from(3))
        );
    }

    #[test]
    fn percentages_default_to_zero_without_spend() {
        let analysis = analyze(&[]);

        assert_eq!(
            percent_points(analysis.market_percent(Market::Max)),
            Decimal::ZERO
        );
        assert_eq!(
            percent_points(analysis.total_savings_percent()),
            Decimal::ZERO
        );
        assert_eq!(
            percent_points(CategoryTotals::default().savings_percent()),
            Decimal::ZERO
        );
    }

    #[test]
    fn market_percentages_split_optimized_total() {
        let items = [
            item("a", "Padaria", [3, 4, 5], 1),
            item("b", "Padaria", [9, 1, 5], 1),
        ];

        let analysis = analyze(&items);

        assert_eq!(
            percent_points(analysis.market_percent(Market::Iquegami)),
            Decimal::from(75)
        );
        assert_eq!(
            percent_points(analysis.market_percent(Market::Proenca)),
            Decimal::from(25)
        );
    }

    #[test]
    fn breakdown_uses_catalog_order_then_unknown_categories() {
        let items = [
            item("treats", "Pet Shop", [7, 0, 0], 1),
            item("bread", "Padaria", [2, 0, 0], 1),
            item("rice", "Alimentos Básicos", [20, 0, 0], 1),
            item("toys", "Brinquedos", [9, 0, 0], 1),
        ];

        let analysis = analyze(&items);
        let order: Vec<&str> = analysis.breakdown().iter().map(|r| r.category).collect();

        assert_eq!(
            order,
            vec!["Alimentos Básicos", "Padaria", "Pet Shop", "Brinquedos"]
        );
    }

    #[test]
    fn ranked_breakdown_sorts_by_spend_and_keeps_ties_stable() {
        let items = [
            item("soap", "Limpeza", [5, 0, 0], 1),
            item("beer", "Bebidas", [5, 0, 0], 1),
            item("steak", "Carnes e Peixes", [40, 0, 0], 1),
        ];

        let analysis = analyze(&items);
        let ranked: Vec<&str> = analysis
            .ranked_breakdown()
            .iter()
            .map(|r| r.category)
            .collect();

        assert_eq!(ranked, vec!["Carnes e Peixes", "Bebidas", "Limpeza"]);
    }

    #[test]
    fn category_savings_percent() {
        let totals = CategoryTotals {
            optimized: Decimal::from(12),
            highest: Decimal::from(20),
        };

        assert_eq!(percent_points(totals.savings_percent()), Decimal::from(40));
    }

    #[test]
    fn breakdown_rows_carry_category_share() {
        let items = [
            item("a", "Bebidas", [1, 0, 0], 3),
            item("b", "Limpeza", [1, 0, 0], 1),
        ];

        let analysis = analyze(&items);
        let shares: Vec<Decimal> = analysis
            .breakdown()
            .iter()
            .map(|row| percent_points(row.share))
            .collect();

        assert_eq!(shares, vec![Decimal::from(75), Decimal::from(25)]);
        assert_eq!(
            percent_points(analysis.category_share_percent("Bebidas")),
            Decimal::from(75)
        );
    }

    #[test]
    fn percentages_are_zero_for_negative_totals() {
        let items = [item("refund", "Limpeza", [12, 20, 0], -1)];

        let analysis = analyze(&items);

        assert_eq!(analysis.total_savings(), Decimal::from(-8));
        assert_eq!(
            percent_points(analysis.total_savings_percent()),
            Decimal::ZERO
        );
        assert_eq!(
            percent_points(analysis.market_percent(Market::Iquegami)),
            Decimal::ZERO
        );
    }

    #[test]
    fn categories_keep_first_encounter_slots() {
        let items = [
            item("a", "Bebidas", [1, 0, 0], 1),
            item("b", "Limpeza", [2, 0, 0], 1),
            item("c", "Bebidas", [3, 0, 0], 1),
        ];

        let analysis = analyze(&items);
        let seen: Vec<(&str, Decimal)> = analysis
            .categories()
            .map(|(category, totals)| (category, totals.optimized))
            .collect();

        assert_eq!(
            seen,
            vec![("Bebidas", Decimal::from(4)), ("Limpeza", Decimal::from(2))]
        );
    }

    #[test]
    fn saturated_totals_stop_adding_up() {
        let items = [
            Item::new("a", "a", Decimal::ONE).with_price(Market::Proenca, Decimal::MAX),
            Item::new("b", "b", Decimal::ONE).with_price(Market::Max, Decimal::MAX),
        ];

        let analysis = analyze(&items);

        assert_eq!(analysis.total_optimized(), Decimal::MAX);
        assert_eq!(
            percent_points(analysis.market_percent(Market::Proenca)),
            Decimal::ONE_HUNDRED
        );
        assert_eq!(
            percent_points(analysis.market_percent(Market::Max)),
            Decimal::ONE_HUNDRED
        );
    }
}
