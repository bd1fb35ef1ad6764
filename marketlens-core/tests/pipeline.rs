//! End-to-end pipeline tests: messy fixture CSVs in, query results out.
//!
//! Exercises the whole chain (catalog → loader → metrics → queries) the way
//! the server uses it, including the documented cleaning behaviors: row drops,
//! gap fills, duplicate dates, and empty sources.

use marketlens_core::data::{SeriesLoader, SymbolCatalog};
use marketlens_core::domain::Symbol;
use marketlens_core::query::QueryService;
use marketlens_core::DataError;
use std::fs;
use std::path::Path;

const HEADER: &str = "Date,Open,High,Low,Close,Volume\n";

/// A deliberately messy but contract-conforming source:
/// out of order, one unparsable date, one missing close, one gap in volume,
/// one duplicate date.
const MESSY: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-05,104,106,103,105,1500
2024-01-02,101,103,100,102,1100
bogus-date,999,999,999,999,9999
2024-01-03,102,104,101,,1200
2024-01-04,103,105,102,104,
2024-01-02,201,203,200,202,2100
2024-01-01,100,102,99,101,1000
";

fn write_fixture(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn messy_source_cleans_into_an_ordered_fully_populated_series() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "MESSY.csv", MESSY);

    let series = SeriesLoader::new(dir.path())
        .load(&Symbol::new("MESSY"))
        .unwrap();

    // Row with the bogus date and the row with no close are dropped.
    assert_eq!(series.len(), 5);

    // Non-decreasing dates; the duplicate 2024-01-02 pair sits adjacent in
    // arrival order.
    let dates: Vec<_> = series.bars.iter().map(|b| b.bar.date).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(dates[1], dates[2]);
    assert_eq!(series.bars[1].bar.open, 101.0);
    assert_eq!(series.bars[2].bar.open, 201.0);

    // The 2024-01-04 volume gap forward-fills from the previous retained row.
    let jan4 = series
        .bars
        .iter()
        .find(|b| b.bar.date == chrono::NaiveDate::from_ymd_opt(2024, 1, 4).unwrap())
        .unwrap();
    assert_eq!(jan4.bar.volume, 2100.0);

    // Every retained bar is fully populated and has a defined MA7.
    for bar in &series.bars {
        assert!(bar.bar.open.is_finite());
        assert!(bar.bar.volume.is_finite());
        assert!(bar.ma7.is_finite());
    }
}

#[test]
fn every_cataloged_symbol_loads_ordered_or_fails_with_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "GOOD.csv", &format!("{HEADER}2024-01-01,1,2,0.5,1.5,10\n"));
    write_fixture(dir.path(), "MESSY.csv", MESSY);
    write_fixture(dir.path(), "EMPTY.csv", HEADER);
    write_fixture(dir.path(), "BROKEN.csv", "Date,Open\n2024-01-01,1\n");

    let catalog = SymbolCatalog::new(dir.path());
    let loader = SeriesLoader::new(dir.path());

    for symbol in catalog.list().unwrap() {
        match loader.load(&symbol) {
            Ok(series) => {
                let dates: Vec<_> = series.bars.iter().map(|b| b.bar.date).collect();
                assert!(dates.windows(2).all(|w| w[0] <= w[1]), "unordered: {symbol}");
            }
            Err(err) => assert!(err.is_schema_violation(), "unexpected error: {err}"),
        }
    }
}

#[test]
fn service_results_are_reproducible_and_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "RELIANCE.csv", MESSY);
    let service = QueryService::new(dir.path());

    let lower = service.tail("reliance", 30).unwrap();
    let upper = service.tail("RELIANCE", 30).unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.symbol.as_str(), "RELIANCE");

    let again = service.tail("RELIANCE", 30).unwrap();
    assert_eq!(upper, again);
}

#[test]
fn unknown_symbol_surfaces_not_found_from_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "AAA.csv", &format!("{HEADER}2024-01-01,1,2,0.5,1.5,10\n"));
    let service = QueryService::new(dir.path());

    assert!(matches!(
        service.tail("GHOST", 30).unwrap_err(),
        DataError::SymbolNotFound { .. }
    ));
    assert!(matches!(
        service.summary("GHOST").unwrap_err(),
        DataError::SymbolNotFound { .. }
    ));
    assert!(matches!(
        service.compare("AAA", "GHOST").unwrap_err(),
        DataError::PairNotFound
    ));
}

#[test]
fn tail_json_exposes_date_as_a_plain_field_with_wire_names() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(
        dir.path(),
        "SPY.csv",
        &format!("{HEADER}2024-01-01,100,101,99,100.5,1000\n2024-01-02,100.5,102,100,101.5,1100\n"),
    );
    let report = QueryService::new(dir.path()).tail("SPY", 30).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["symbol"], "SPY");
    let first = &value["bars"][0];
    assert_eq!(first["date"], "2024-01-01");
    assert!(first["MA7"].is_number());
    assert!(first.get("daily_return").is_some());
    assert!(first.get("volatility30").is_some());
    assert!(value["summary"].get("52_week_high").is_some());
}
