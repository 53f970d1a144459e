//! Command line configuration

use std::path::PathBuf;

use clap::Parser;

use cesta::list::{SortDirection, SortKey};

/// Compare a shopping list across Iquegami, Proença and Max
#[derive(Debug, Parser)]
#[command(name = "cesta", about = "Optimized cart across three supermarkets", long_about = None)]
pub struct CompareArgs {
    /// Directory holding `products/` and `lists/` fixture files
    #[arg(long, env = "CESTA_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to load
    #[arg(short, long, env = "CESTA_SET", default_value = "default")]
    pub set: String,

    /// Number of list items to price
    #[arg(short, long)]
    pub n: Option<usize>,

    /// Item table ordering
    #[arg(long, value_enum, default_value_t = SortKey::None)]
    pub sort: SortKey,

    /// Item table direction
    #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
    pub direction: SortDirection,

    /// Rank categories by optimized spend instead of catalog order
    #[arg(long)]
    pub ranked: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl CompareArgs {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
