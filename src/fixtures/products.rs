//! Product Fixtures

use rust_decimal::{Decimal, prelude::FromPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{BRL, Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    categories::DEFAULT_CATEGORY,
    fixtures::FixtureError,
    markets::MarketMap,
    prices::UnitPrice,
    products::Product,
    units::Unit,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of barcode -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Unit tag (e.g. "kg")
    #[serde(default)]
    pub unit: Unit,

    /// Product category
    #[serde(default)]
    pub category: Option<String>,

    /// Unit price per market
    #[serde(default)]
    pub prices: PricesFixture,
}

/// Unit prices keyed by market; missing markets have no price.
#[derive(Debug, Default, Deserialize)]
pub struct PricesFixture {
    /// Iquegami price
    #[serde(default)]
    pub iquegami: Option<AmountFixture>,

    /// Proença price
    #[serde(default)]
    pub proenca: Option<AmountFixture>,

    /// Max price
    #[serde(default)]
    pub max: Option<AmountFixture>,
}

/// A number written either as a YAML number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountFixture {
    /// Plain number, e.g. `4.99`
    Number(f64),

    /// Quoted text, e.g. `"4,99"`
    Text(String),
}

impl AmountFixture {
    /// Interpret the amount as a unit price; anything unusable is absent.
    pub fn to_unit_price(&self) -> UnitPrice {
        match self {
            AmountFixture::Number(value) => UnitPrice::from_f64(*value),
            AmountFixture::Text(text) => UnitPrice::parse(text),
        }
    }

    /// Interpret the amount as an exact decimal.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            AmountFixture::Number(value) => Decimal::from_f64(*value),
            AmountFixture::Text(text) => text.trim().replace(',', ".").parse().ok(),
        }
    }
}

impl PricesFixture {
    /// Convert to per-market unit prices.
    pub fn to_prices(&self) -> MarketMap<UnitPrice> {
        let price = |amount: &Option<AmountFixture>| {
            amount
                .as_ref()
                .map_or(UnitPrice::ABSENT, AmountFixture::to_unit_price)
        };

        MarketMap::new(price(&self.iquegami), price(&self.proenca), price(&self.max))
    }
}

impl ProductFixture {
    /// Build a catalog product for the given barcode.
    pub fn into_product(self, barcode: String) -> Product {
        Product {
            barcode,
            name: self.name,
            unit: self.unit,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            prices: self.prices.to_prices(),
        }
    }
}

/// Resolve an ISO currency code supported by fixtures.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_uppercase().as_str() {
        "BRL" => Ok(BRL),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        _ => Err(FixtureError::UnknownCurrency(code.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::markets::Market;

    use super::*;

    #[test]
    fn parse_currency_accepts_known_codes() -> TestResult {
        assert_eq!(parse_currency("brl")?, BRL);
        assert_eq!(parse_currency("GBP")?, GBP);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_codes() {
        let result = parse_currency("ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn product_fixture_parses_mixed_price_formats() -> TestResult {
        let yaml = r#"
name: Sabão em Pó (1kg)
unit: kg
category: Limpeza
prices:
  iquegami: "12,50"
  proenca: 11.99
  max: "sem preço"
"#;

        let fixture: ProductFixture = serde_norway::from_str(yaml)?;
        let product = fixture.into_product("7896000000010".to_string());

        assert_eq!(product.unit, Unit::Kilogram);
        assert_eq!(
            *product.prices.get(Market::Iquegami),
            UnitPrice::new(Decimal::new(1250, 2))
        );
        assert_eq!(
            product.prices.get(Market::Proenca).round_dp(2),
            Decimal::new(1199, 2)
        );
        assert_eq!(*product.prices.get(Market::Max), UnitPrice::ABSENT);

        Ok(())
    }

    #[test]
    fn product_fixture_defaults() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str("name: Sal")?;
        let product = fixture.into_product("1".to_string());

        assert_eq!(product.unit, Unit::Each);
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert!(product.prices.values().all(|price| !price.is_valid()));

        Ok(())
    }

    #[test]
    fn amount_to_decimal() {
        assert_eq!(
            AmountFixture::Text("1,5".to_string()).to_decimal(),
            Some(Decimal::new(15, 1))
        );
        assert_eq!(AmountFixture::Number(f64::NAN).to_decimal(), None);
        assert_eq!(AmountFixture::Text("dois".to_string()).to_decimal(), None);
    }
}
