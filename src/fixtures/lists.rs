//! Shopping List Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        products::{AmountFixture, PricesFixture},
    },
    items::Item,
    markets::Market,
    products::ProductCatalog,
    units::Unit,
};

/// Wrapper for a shopping list in YAML
#[derive(Debug, Deserialize)]
pub struct ListFixture {
    /// ISO currency code, defaults to BRL
    #[serde(default)]
    pub currency: Option<String>,

    /// List entries in order
    #[serde(default)]
    pub items: Vec<ListItemFixture>,
}

/// One list entry, either spelled out or resolved from the catalog by barcode.
#[derive(Debug, Deserialize)]
pub struct ListItemFixture {
    /// Item identifier; generated from the position when missing
    #[serde(default)]
    pub id: Option<String>,

    /// Product barcode to resolve from the catalog
    #[serde(default)]
    pub barcode: Option<String>,

    /// Display name, overrides the catalog name
    #[serde(default)]
    pub name: Option<String>,

    /// Quantity, defaults to one
    #[serde(default)]
    pub quantity: Option<AmountFixture>,

    /// Unit tag, overrides the catalog unit
    #[serde(default)]
    pub unit: Option<Unit>,

    /// Category, overrides the catalog category
    #[serde(default)]
    pub category: Option<String>,

    /// Prices, laid over the catalog prices market by market
    #[serde(default)]
    pub prices: PricesFixture,
}

impl ListItemFixture {
    /// Build the list item at position `idx`.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::ProductNotFound`]: the barcode is not in the catalog.
    /// - [`FixtureError::MissingName`]: neither a name nor a barcode was given.
    /// - [`FixtureError::InvalidQuantity`]: the quantity is not a number.
    pub fn into_item(self, idx: usize, catalog: &ProductCatalog) -> Result<Item, FixtureError> {
        let id = self.id.unwrap_or_else(|| format!("item-{}", idx + 1));

        let quantity = match &self.quantity {
            None => Decimal::ONE,
            Some(amount) => amount.to_decimal().ok_or_else(|| {
                FixtureError::InvalidQuantity(format!("{amount:?} for item {id}"))
            })?,
        };

        let mut item = match (self.barcode.as_deref(), self.name) {
            (Some(barcode), name) => {
                let item = catalog
                    .lookup(barcode)
                    .ok_or_else(|| FixtureError::ProductNotFound(barcode.to_string()))?
                    .to_item(id, quantity);

                match name {
                    Some(name) => item.with_name(name),
                    None => item,
                }
            }
            (None, Some(name)) => Item::new(id, name, quantity),
            (None, None) => return Err(FixtureError::MissingName(idx)),
        };

        if let Some(unit) = self.unit {
            item = item.with_unit(unit);
        }

        if let Some(category) = self.category {
            item = item.with_category(category);
        }

        let overrides = [
            (Market::Iquegami, &self.prices.iquegami),
            (Market::Proenca, &self.prices.proenca),
            (Market::Max, &self.prices.max),
        ];

        for (market, amount) in overrides {
            if let Some(amount) = amount {
                item.set_price(market, amount.to_unit_price());
            }
        }

        Ok(item)
    }
}
