//! Units of measure
//!
//! Informational only: prices are per unit and quantities are in units, the
//! engine never converts between them.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while parsing a unit tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// The tag is not one of the known units.
    #[error("unknown unit: {0}")]
    Unknown(String),
}

/// Unit of measure for an item's quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Unit {
    /// Units
    #[default]
    #[serde(rename = "un")]
    Each,

    /// Kilograms
    #[serde(rename = "kg")]
    Kilogram,

    /// Grams
    #[serde(rename = "g")]
    Gram,

    /// Litres
    #[serde(rename = "L")]
    Litre,

    /// Millilitres
    #[serde(rename = "ml")]
    Millilitre,

    /// Dozens
    #[serde(rename = "dz")]
    Dozen,
}

impl Unit {
    /// Every unit, in catalog order.
    pub const ALL: [Unit; 6] = [
        Unit::Each,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Litre,
        Unit::Millilitre,
        Unit::Dozen,
    ];

    /// Short tag, e.g. `kg`.
    pub fn tag(self) -> &'static str {
        match self {
            Unit::Each => "un",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Litre => "L",
            Unit::Millilitre => "ml",
            Unit::Dozen => "dz",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();

        Unit::ALL
            .into_iter()
            .find(|unit| unit.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnitError::Unknown(s.to_string()))
    }
}
