//! Cesta command line
//!
//! Loads a fixture set, prices the optimized cart and prints the report.
//!
//! Use `--set` to load a fixture set by name
//! Use `-n` to limit the number of items
//! Use `--sort` and `--direction` to order the item table

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::debug;

use cesta::{
    fixtures::Fixture,
    report::{CartReport, CategoryOrder},
};

use crate::config::CompareArgs;

mod config;
mod logging;

/// Cesta entry point
pub fn main() -> Result<()> {
    let args = CompareArgs::load().unwrap_or_else(|e| e.exit());

    logging::init_subscriber(&args.log_level)?;

    let fixture = Fixture::from_set_in(&args.fixtures, &args.set)?;
    let list = fixture.shopping_list(args.n)?;

    let start = Instant::now();
    let report = CartReport::compute(list.items());
    let elapsed = start.elapsed();

    debug!(items = list.len(), optimized = %report.totals().optimized(), "computed report");

    let order = if args.ranked {
        CategoryOrder::Ranked
    } else {
        CategoryOrder::Catalog
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    report.write_to(
        &mut handle,
        &list.sorted(args.sort, args.direction),
        list.currency(),
        order,
    )?;

    writeln!(
        handle,
        " {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
