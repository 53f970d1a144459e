//! Integration test for the fixture sets shipped in `fixtures/`.

use std::path::PathBuf;

use rust_decimal::Decimal;
use rusty_money::iso::BRL;
use testresult::TestResult;

use cesta::{
    fixtures::Fixture,
    list::{SortDirection, SortKey},
    markets::Market,
    report::{CartReport, CategoryOrder},
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn default_set_loads_catalog_and_list() -> TestResult {
    let fixture = Fixture::from_set_in(fixtures_dir(), "default")?;

    assert_eq!(fixture.catalog().len(), 3);
    assert_eq!(fixture.currency(), BRL);

    let list = fixture.shopping_list(None)?;
    assert_eq!(list.len(), fixture.items().len());

    let milk = list.get("milk").ok_or("milk is on the list")?;
    assert_eq!(milk.name(), "Leite Integral (1L)");
    assert_eq!(*milk.price(Market::Max), Decimal::new(475, 2));

    Ok(())
}

#[test]
fn default_set_prices_catalog_items() -> TestResult {
    let fixture = Fixture::from_set_in(fixtures_dir(), "default")?;
    let list = fixture.shopping_list(Some(3))?;

    let report = CartReport::compute(list.items());

    // rice 2 x 23.90 + milk 12 x 4.75 + detergent 1 x 11.99
    assert_eq!(report.totals().optimized(), Decimal::new(11679, 2));
    assert_eq!(report.analysis().market(Market::Max).count, 2);
    assert_eq!(report.analysis().market(Market::Proenca).count, 1);
    assert_eq!(report.totals().cheapest_market(), Some(Market::Max));

    Ok(())
}

#[test]
fn default_set_renders_report() -> TestResult {
    let fixture = Fixture::from_set_in(fixtures_dir(), "default")?;
    let list = fixture.shopping_list(None)?;
    let report = CartReport::compute(list.items());

    let mut out = Vec::new();
    report.write_to(
        &mut out,
        &list.sorted(SortKey::Category, SortDirection::Asc),
        list.currency(),
        CategoryOrder::Ranked,
    )?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Pilhas AA"));
    assert!(text.contains("Hortifruti"));
    assert!(text.contains("Optimized total:"));

    Ok(())
}
