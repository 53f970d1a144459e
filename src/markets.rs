//! Markets
//!
//! The closed set of supermarkets whose prices are compared. The declaration
//! order of [`Market::ALL`] is the tie-break order used everywhere a "first
//! market wins" decision is made.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors raised while parsing a market identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketError {
    /// The identifier does not name one of the known markets.
    #[error("unknown market: {0}")]
    Unknown(String),
}

/// A supermarket price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Market {
    /// Iquegami
    Iquegami,

    /// Proença
    Proenca,

    /// Max
    Max,
}

impl Market {
    /// Every market, in tie-break order.
    pub const ALL: [Market; 3] = [Market::Iquegami, Market::Proenca, Market::Max];

    /// Stable lowercase key used in fixtures and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Market::Iquegami => "iquegami",
            Market::Proenca => "proenca",
            Market::Max => "max",
        }
    }

    /// Human readable market name.
    pub fn name(self) -> &'static str {
        match self {
            Market::Iquegami => "Iquegami",
            Market::Proenca => "Proença",
            Market::Max => "Max",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Market {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();

        Market::ALL
            .into_iter()
            .find(|market| market.key() == needle || market.name().to_lowercase() == needle)
            .ok_or_else(|| MarketError::Unknown(s.to_string()))
    }
}

/// One value per market.
///
/// Iteration always follows [`Market::ALL`], never hash or insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarketMap<T> {
    iquegami: T,
    proenca: T,
    max: T,
}

impl<T> MarketMap<T> {
    /// Create a map from one value per market.
    pub const fn new(iquegami: T, proenca: T, max: T) -> Self {
        Self {
            iquegami,
            proenca,
            max,
        }
    }

    /// Build a map by calling `f` once per market, in tie-break order.
    pub fn from_fn(mut f: impl FnMut(Market) -> T) -> Self {
        Self {
            iquegami: f(Market::Iquegami),
            proenca: f(Market::Proenca),
            max: f(Market::Max),
        }
    }

    /// Value for a market.
    pub fn get(&self, market: Market) -> &T {
        match market {
            Market::Iquegami => &self.iquegami,
            Market::Proenca => &self.proenca,
            Market::Max => &self.max,
        }
    }

    /// Value for a market, mutably.
    pub fn get_mut(&mut self, market: Market) -> &mut T {
        match market {
            Market::Iquegami => &mut self.iquegami,
            Market::Proenca => &mut self.proenca,
            Market::Max => &mut self.max,
        }
    }

    /// Replace the value for a market.
    pub fn set(&mut self, market: Market, value: T) {
        *self.get_mut(market) = value;
    }

    /// Iterate `(market, value)` pairs in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Market, &T)> {
        Market::ALL
            .into_iter()
            .map(move |market| (market, self.get(market)))
    }

    /// Iterate the values in tie-break order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Transform every value, keeping the market association.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> MarketMap<U> {
        MarketMap::from_fn(|market| f(self.get(market)))
    }
}
