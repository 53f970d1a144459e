//! Cart report
//!
//! [`CartReport::compute`] is the single entry point collaborators call
//! whenever the item collection changes. It derives every output from the
//! snapshot it is given and keeps nothing between calls.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    analysis::{Analysis, analyze, percent_points},
    items::Item,
    markets::Market,
    pricing::{cheapest_markets, optimal_cost},
    totals::Totals,
};

/// Errors that can occur when rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An amount is too large to print in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    AmountOutOfRange(Decimal),

    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// How the category table is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Catalog order
    #[default]
    Catalog,

    /// Descending optimized spend
    Ranked,
}

/// Every figure derived from one item snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CartReport {
    totals: Totals,
    analysis: Analysis,
}

impl CartReport {
    /// Computes totals and analysis for a snapshot of items.
    pub fn compute(items: &[Item]) -> Self {
        Self {
            totals: Totals::compute(items),
            analysis: analyze(items),
        }
    }

    /// Per-market and optimized totals
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Category and market distribution
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Writes the report as tables.
    ///
    /// `rows` is the display order of the items the report was computed from.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        rows: &[&Item],
        currency: &'static Currency,
        order: CategoryOrder,
    ) -> Result<(), ReportError> {
        let fmt = MoneyFormat { currency };

        writeln!(out, "\n{}", items_table(rows, &fmt)?)?;
        writeln!(out, "\n{}", self.totals_table(&fmt)?)?;
        writeln!(out, "\n{}", self.distribution_table(&fmt)?)?;

        if let Some(table) = self.category_table(&fmt, order)? {
            writeln!(out, "\n{table}")?;
        }

        writeln!(out, "\n{}", self.summary_table(&fmt)?)?;

        Ok(())
    }

    fn totals_table(&self, fmt: &MoneyFormat) -> Result<Table, ReportError> {
        let mut builder = Builder::default();
        builder.push_record(["Market", "Subtotal"]);

        for (market, total) in self.totals.markets().iter() {
            builder.push_record([market.name().to_string(), fmt.amount(*total)?]);
        }

        builder.push_record([
            "Optimized cart".to_string(),
            fmt.amount(self.totals.optimized())?,
        ]);

        let mut table = builder.build();
        style(&mut table, 1..2);

        if let Some(cheapest) = self.totals.cheapest_market() {
            let row = market_row(cheapest);
            table.modify((row, 0), Color::FG_GREEN);
            table.modify((row, 1), Color::FG_GREEN);
        }

        table.modify(Rows::last(), Color::BOLD);

        Ok(table)
    }

    fn distribution_table(&self, fmt: &MoneyFormat) -> Result<Table, ReportError> {
        let mut builder = Builder::default();
        builder.push_record(["Market", "Items", "Optimized Cost", "Share"]);

        for (market, share) in self.analysis.distribution().iter() {
            builder.push_record([
                market.name().to_string(),
                share.count.to_string(),
                fmt.amount(share.total_cost)?,
                format!("{:.2}%", percent_points(self.analysis.market_percent(market))),
            ]);
        }

        let mut table = builder.build();
        style(&mut table, 1..4);

        Ok(table)
    }

    fn category_table(
        &self,
        fmt: &MoneyFormat,
        order: CategoryOrder,
    ) -> Result<Option<Table>, ReportError> {
        let rows = match order {
            CategoryOrder::Catalog => self.analysis.breakdown(),
            CategoryOrder::Ranked => self.analysis.ranked_breakdown(),
        };

        if rows.is_empty() {
            return Ok(None);
        }

        let mut builder = Builder::default();
        builder.push_record(["Category", "Optimized", "Share", "Highest", "Savings"]);

        for row in rows {
            builder.push_record([
                row.category.to_string(),
                fmt.amount(row.totals.optimized)?,
                format!("{:.2}%", percent_points(row.share)),
                fmt.amount(row.totals.highest)?,
                format!(
                    "({:.2}%) {}",
                    percent_points(row.savings_percent),
                    fmt.amount(row.totals.savings())?
                ),
            ]);
        }

        let mut table = builder.build();
        style(&mut table, 1..5);

        Ok(Some(table))
    }

    fn summary_table(&self, fmt: &MoneyFormat) -> Result<Table, ReportError> {
        let analysis = &self.analysis;

        let mut builder = Builder::default();
        builder.push_record(["Optimized total:".to_string(), fmt.amount(analysis.total_optimized())?]);
        builder.push_record(["Highest total:".to_string(), fmt.amount(analysis.total_highest())?]);
        builder.push_record([
            "Savings:".to_string(),
            format!(
                "({:.2}%) {}",
                percent_points(analysis.total_savings_percent()),
                fmt.amount(analysis.total_savings())?
            ),
        ]);
        builder.push_record([
            "Savings vs. priciest market:".to_string(),
            fmt.amount(self.totals.savings_vs_highest_market())?,
        ]);

        let mut table = builder.build();
        table.with(Style::blank());
        table.modify(Columns::first(), Alignment::right());
        table.modify(Columns::new(1..2), Alignment::right());
        table.modify(Rows::first(), Color::BOLD);

        Ok(table)
    }
}

fn items_table(rows: &[&Item], fmt: &MoneyFormat) -> Result<Table, ReportError> {
    let mut builder = Builder::default();

    let mut header = vec![String::new(), "Item".to_string(), "Qty".to_string()];
    header.push("Category".to_string());
    header.extend(Market::ALL.iter().map(|market| market.name().to_string()));
    header.push("Optimized".to_string());
    builder.push_record(header);

    let mut highlights: SmallVec<[(usize, usize); 32]> = SmallVec::new();

    for (idx, item) in rows.iter().enumerate() {
        let row = idx + 1;
        let cheapest = cheapest_markets(item);

        let mut record = vec![
            format!("#{row:<3}"),
            item.name().to_string(),
            format!("{} {}", item.quantity().normalize(), item.unit()),
            item.category().to_string(),
        ];

        for (market, price) in item.prices().iter() {
            record.push(match price.valid() {
                Some(unit_price) => format!(
                    "{} ({}/{})",
                    fmt.amount(price.cost(item.quantity()))?,
                    fmt.amount(unit_price)?,
                    item.unit()
                ),
                None => "-".to_string(),
            });

            if cheapest.contains(&market) {
                highlights.push((row, market_column(market)));
            }
        }

        record.push(fmt.amount(optimal_cost(item))?);
        builder.push_record(record);
    }

    let mut table = builder.build();
    style(&mut table, 4..8);

    for (row, col) in highlights {
        table.modify((row, col), Color::FG_GREEN);
    }

    Ok(table)
}

/// Formats decimal amounts as money in one currency.
struct MoneyFormat {
    currency: &'static Currency,
}

impl MoneyFormat {
    /// Rounds to the currency's minor unit, half away from zero.
    fn amount(&self, amount: Decimal) -> Result<String, ReportError> {
        let exponent = self.currency.exponent;

        let mut rounded =
            amount.round_dp_with_strategy(exponent, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(exponent);

        let minor = i64::try_from(rounded.mantissa())
            .ok()
            .filter(|_| rounded.scale() == exponent)
            .ok_or(ReportError::AmountOutOfRange(amount))?;

        Ok(Money::from_minor(minor, self.currency).to_string())
    }
}

/// Table row of a market in the totals table (header is row 0).
fn market_row(market: Market) -> usize {
    Market::ALL
        .iter()
        .position(|candidate| *candidate == market)
        .map_or(0, |idx| idx + 1)
}

/// Table column of a market in the items table.
fn market_column(market: Market) -> usize {
    market_row(market) + 3
}

fn style(table: &mut Table, numeric_columns: std::ops::Range<usize>) {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());
}
