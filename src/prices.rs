//! Prices

use std::ops::Deref;

use rust_decimal::{Decimal, prelude::FromPrimitive};

/// A per-market unit price.
///
/// Zero is the "no price recorded" sentinel. Every constructor folds
/// non-positive and non-numeric input into that sentinel, so a `UnitPrice`
/// is always either a genuine positive price or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitPrice {
    value: Decimal,
}

impl UnitPrice {
    /// No price recorded.
    pub const ABSENT: UnitPrice = UnitPrice {
        value: Decimal::ZERO,
    };

    /// Creates a new unit price.
    pub fn new(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            UnitPrice { value }
        } else {
            Self::ABSENT
        }
    }

    /// Creates a unit price from a float, treating NaN and infinities as absent.
    pub fn from_f64(value: f64) -> Self {
        Decimal::from_f64(value).map_or(Self::ABSENT, Self::new)
    }

    /// Parses a unit price leniently.
    ///
    /// Accepts a comma as the decimal separator. Anything that does not parse
    /// is absent.
    pub fn parse(s: &str) -> Self {
        s.trim()
            .replace(',', ".")
            .parse::<Decimal>()
            .map_or(Self::ABSENT, Self::new)
    }

    /// Whether a price was recorded.
    pub fn is_valid(self) -> bool {
        self.value > Decimal::ZERO
    }

    /// The price, if one was recorded.
    pub fn valid(self) -> Option<Decimal> {
        self.is_valid().then_some(self.value)
    }

    /// Cost of `quantity` units at this price. Absent prices cost nothing.
    pub fn cost(self, quantity: Decimal) -> Decimal {
        self.value.saturating_mul(quantity)
    }
}

impl Deref for UnitPrice {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Decimal> for UnitPrice {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = UnitPrice::new(Decimal::new(1099, 2));

        assert_eq!(*price, Decimal::new(1099, 2));
        assert!(price.is_valid());
    }

    #[test]
    fn non_positive_prices_are_absent() {
        assert_eq!(UnitPrice::new(Decimal::ZERO), UnitPrice::ABSENT);
        assert_eq!(UnitPrice::new(Decimal::NEGATIVE_ONE), UnitPrice::ABSENT);
        assert_eq!(UnitPrice::new(Decimal::NEGATIVE_ONE).valid(), None);
    }

    #[test]
    fn non_finite_floats_are_absent() {
        assert_eq!(UnitPrice::from_f64(f64::NAN), UnitPrice::ABSENT);
        assert_eq!(UnitPrice::from_f64(f64::INFINITY), UnitPrice::ABSENT);
        assert_eq!(UnitPrice::from_f64(-3.5), UnitPrice::ABSENT);
    }

    #[test]
    fn parse_accepts_comma_separator() {
        assert_eq!(UnitPrice::parse("4,99"), UnitPrice::new(Decimal::new(499, 2)));
        assert_eq!(UnitPrice::parse(" 12.5 "), UnitPrice::new(Decimal::new(125, 1)));
    }

    #[test]
    fn parse_garbage_is_absent() {
        assert_eq!(UnitPrice::parse("n/a"), UnitPrice::ABSENT);
        assert_eq!(UnitPrice::parse(""), UnitPrice::ABSENT);
    }

    #[test]
    fn absent_price_costs_nothing() {
        assert_eq!(UnitPrice::ABSENT.cost(Decimal::TEN), Decimal::ZERO);
        assert_eq!(
            UnitPrice::new(Decimal::new(25, 1)).cost(Decimal::TWO),
            Decimal::new(50, 1)
        );
    }
}
