//! Items

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    categories::DEFAULT_CATEGORY,
    markets::{Market, MarketMap},
    prices::UnitPrice,
    units::Unit,
};

/// Reasons an item is not fit to enter a shopping list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The item has an empty identifier.
    #[error("item identifier must not be empty")]
    EmptyId,

    /// The item has an empty name (item id).
    #[error("item {0} has an empty name")]
    EmptyName(String),

    /// The quantity is zero or negative.
    #[error("item {id} has non-positive quantity {quantity}")]
    NonPositiveQuantity {
        /// Item identifier
        id: String,

        /// Rejected quantity
        quantity: Decimal,
    },
}

/// A shopping list entry with one unit price per market.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    id: String,
    name: String,
    quantity: Decimal,
    unit: Unit,
    category: String,
    prices: MarketMap<UnitPrice>,
    barcode: Option<String>,
}

impl Item {
    /// Creates a new item with no recorded prices, in the default category.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit: Unit::default(),
            category: DEFAULT_CATEGORY.to_string(),
            prices: MarketMap::default(),
            barcode: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit of measure.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the unit price at one market.
    #[must_use]
    pub fn with_price(mut self, market: Market, price: impl Into<UnitPrice>) -> Self {
        self.prices.set(market, price.into());
        self
    }

    /// Replaces every market price at once.
    #[must_use]
    pub fn with_prices(mut self, prices: MarketMap<UnitPrice>) -> Self {
        self.prices = prices;
        self
    }

    /// Sets the product barcode this item was created from.
    #[must_use]
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Returns the item identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the quantity
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Returns the unit of measure
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the product barcode, if the item came from the catalog
    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    /// Returns the unit price at a market
    pub fn price(&self, market: Market) -> UnitPrice {
        *self.prices.get(market)
    }

    /// Returns every market price
    pub fn prices(&self) -> &MarketMap<UnitPrice> {
        &self.prices
    }

    /// Changes the quantity in place.
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
    }

    /// Changes one market price in place.
    pub fn set_price(&mut self, market: Market, price: impl Into<UnitPrice>) {
        self.prices.set(market, price.into());
    }

    /// Recorded prices in market tie-break order, skipping absent ones.
    pub fn valid_prices(&self) -> impl Iterator<Item = (Market, Decimal)> + '_ {
        self.prices
            .iter()
            .filter_map(|(market, price)| price.valid().map(|price| (market, price)))
    }

    /// Checks the preconditions the pricing engine relies on.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptyId`]: the identifier is empty.
    /// - [`ItemError::EmptyName`]: the name is empty or whitespace.
    /// - [`ItemError::NonPositiveQuantity`]: the quantity is zero or negative.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.id.is_empty() {
            return Err(ItemError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(ItemError::EmptyName(self.id.clone()));
        }

        if self.quantity <= Decimal::ZERO {
            return Err(ItemError::NonPositiveQuantity {
                id: self.id.clone(),
                quantity: self.quantity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Item {
        Item::new("rice", "Arroz Branco Tipo 1 (5kg)", Decimal::ONE)
            .with_category("Alimentos Básicos")
            .with_price(Market::Iquegami, Decimal::new(2599, 2))
            .with_price(Market::Max, Decimal::new(2390, 2))
    }

    #[test]
    fn new_item_has_no_prices() {
        let item = Item::new("a", "Água", Decimal::TWO);

        assert_eq!(item.valid_prices().count(), 0);
        assert_eq!(item.category(), DEFAULT_CATEGORY);
        assert_eq!(item.unit(), Unit::Each);
        assert_eq!(item.barcode(), None);
    }

    #[test]
    fn valid_prices_skip_absent_markets_in_order() {
        let prices: Vec<(Market, Decimal)> = rice().valid_prices().collect();

        assert_eq!(
            prices,
            vec![
                (Market::Iquegami, Decimal::new(2599, 2)),
                (Market::Max, Decimal::new(2390, 2)),
            ]
        );
    }

    #[test]
    fn negative_price_is_stored_as_absent() {
        let item = rice().with_price(Market::Iquegami, Decimal::NEGATIVE_ONE);

        assert_eq!(item.price(Market::Iquegami), UnitPrice::ABSENT);
    }

    #[test]
    fn setters_mutate_in_place() {
        let mut item = rice();
        item.set_quantity(Decimal::new(15, 1));
        item.set_price(Market::Proenca, Decimal::new(2450, 2));

        assert_eq!(item.quantity(), Decimal::new(15, 1));
        assert_eq!(*item.price(Market::Proenca), Decimal::new(2450, 2));
    }

    #[test]
    fn validate_accepts_well_formed_item() {
        assert_eq!(rice().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_non_positive_quantity() {
        let mut item = rice();
        item.set_quantity(Decimal::ZERO);

        assert_eq!(
            item.validate(),
            Err(ItemError::NonPositiveQuantity {
                id: "rice".to_string(),
                quantity: Decimal::ZERO,
            })
        );
    }

    #[test]
    fn validate_rejects_blank_name_and_id() {
        let blank_name = Item::new("x", "  ", Decimal::ONE);
        let blank_id = Item::new("", "Sal", Decimal::ONE);

        assert_eq!(
            blank_name.validate(),
            Err(ItemError::EmptyName("x".to_string()))
        );
        assert_eq!(blank_id.validate(), Err(ItemError::EmptyId));
    }
}
