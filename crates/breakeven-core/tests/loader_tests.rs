use breakeven_core::loader::{load_csv, try_load_csv};
use breakeven_core::summary::summarize_portfolio;
use breakeven_core::SafetyLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

// ===========================================================================
// CSV loader
// ===========================================================================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_valid_file() {
    init_logging();
    let file = write_csv(
        "company_name,variable_cost_ratio,fixed_cost,sales\n\
         North,0.6,1000,2000\n\
         South,0.5,0,1000\n",
    );
    let p = load_csv(file.path());
    assert_eq!(p.len(), 2);
    let north = p.find("North").unwrap();
    assert_eq!(north.variable_cost_ratio(), dec!(0.6));
    assert_eq!(north.break_even_point(), dec!(2500));
}

#[test]
fn test_float_typed_amount_columns_load() {
    init_logging();
    let file = write_csv(
        "company_name,variable_cost_ratio,fixed_cost,sales\n\
         North,0.6,1000.0,2000.0\n",
    );
    let p = try_load_csv(file.path()).unwrap();
    let north = p.find("North").unwrap();
    assert_eq!(north.fixed_cost(), 1000);
    assert_eq!(north.sales(), 2000);
    assert_eq!(north.profit(), -200);
}

#[test]
fn test_near_one_ratio_row_loads_and_summarizes() {
    init_logging();
    let file = write_csv(
        "company_name,variable_cost_ratio,fixed_cost,sales\n\
         Edge,0.9999999999999999999999,40000000,90000000\n",
    );
    let p = try_load_csv(file.path()).unwrap();
    let out = summarize_portfolio(&p);
    let edge = &out.result.companies[0];
    assert_eq!(edge.break_even_point, Decimal::MAX);
    assert_eq!(edge.safety_level, SafetyLevel::Low);
}

#[test]
fn test_missing_file_yields_empty_portfolio() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.csv");
    assert!(load_csv(&path).is_empty());
    let err = try_load_csv(&path).unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
}

#[test]
fn test_parse_failure_yields_empty_portfolio() {
    init_logging();
    let file = write_csv(
        "company_name,variable_cost_ratio,fixed_cost,sales\n\
         North,0.6,1000,2000\n\
         South,half,0,1000\n",
    );
    assert!(load_csv(file.path()).is_empty());
    assert!(try_load_csv(file.path()).is_err());
}

#[test]
fn test_header_only_file_is_empty_without_error() {
    init_logging();
    let file = write_csv("company_name,variable_cost_ratio,fixed_cost,sales\n");
    let p = try_load_csv(file.path()).unwrap();
    assert!(p.is_empty());
}
