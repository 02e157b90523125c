//! CSV ingestion of company records.
//!
//! Expected header: `company_name,variable_cost_ratio,fixed_cost,sales`.
//! Extra columns are ignored. Any bad row fails the whole load.
//! `fixed_cost` and `sales` may be written with a fractional part
//! (`1000.0`); it is truncated toward zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::BreakevenError;
use crate::portfolio::Portfolio;
use crate::record::FinancialRecord;
use crate::BreakevenResult;

/// One row of the input table.
#[derive(Debug, Deserialize)]
struct CompanyRow {
    company_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    variable_cost_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    fixed_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    sales: Decimal,
}

/// Load a portfolio, falling back to an empty one on any failure.
///
/// Failures are logged rather than returned; callers surface an empty
/// portfolio as a "no data" state.
pub fn load_csv(path: impl AsRef<Path>) -> Portfolio {
    let path = path.as_ref();
    log::info!("loading company data from {}", path.display());

    match try_load_csv(path) {
        Ok(portfolio) => {
            log::info!("loaded {} company records", portfolio.len());
            portfolio
        }
        Err(e) => {
            log::warn!("{e}");
            Portfolio::default()
        }
    }
}

/// Load a portfolio from a CSV file, reporting why it failed.
pub fn try_load_csv(path: impl AsRef<Path>) -> BreakevenResult<Portfolio> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BreakevenError::DataLoad(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }
    let file = File::open(path).map_err(|e| {
        BreakevenError::DataLoad(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    read_portfolio(file)
}

/// Parse CSV text from any reader into a portfolio.
pub fn read_portfolio<R: Read>(reader: R) -> BreakevenResult<Portfolio> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut portfolio = Portfolio::default();
    for (idx, row) in rdr.deserialize::<CompanyRow>().enumerate() {
        // Header is line 1, so data row `idx` sits on line idx + 2.
        let line = idx + 2;
        let row = row.map_err(|e| BreakevenError::DataLoad(format!("line {line}: {e}")))?;
        let fixed_cost = whole_units(row.fixed_cost, "fixed_cost", line)?;
        let sales = whole_units(row.sales, "sales", line)?;
        let record = FinancialRecord::new(
            row.company_name,
            row.variable_cost_ratio,
            fixed_cost,
            sales,
        )
        .map_err(|e| BreakevenError::DataLoad(format!("line {line}: {e}")))?;
        portfolio.push(record);
    }

    Ok(portfolio)
}

/// Truncate a currency cell to whole units, rejecting values outside `i64`.
fn whole_units(value: Decimal, field: &str, line: usize) -> BreakevenResult<i64> {
    value.trunc().to_i64().ok_or_else(|| {
        BreakevenError::DataLoad(format!(
            "line {line}: {field} value {value} is outside the supported range"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_preserves_row_order() {
        let csv = "company_name,variable_cost_ratio,fixed_cost,sales\n\
                   Beta,0.6,1000,2000\n\
                   Alpha,0.5,0,1000\n";
        let p = read_portfolio(csv.as_bytes()).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.records()[0].name(), "Beta");
        assert_eq!(p.records()[0].variable_cost_ratio(), dec!(0.6));
        assert_eq!(p.records()[1].sales(), 1000);
    }

    #[test]
    fn test_read_ignores_extra_columns_and_whitespace() {
        let csv = "sector,company_name,variable_cost_ratio,fixed_cost,sales\n\
                   retail, Gamma , 0.25 , 300 , 900\n";
        let p = read_portfolio(csv.as_bytes()).unwrap();
        let r = &p.records()[0];
        assert_eq!(r.name(), "Gamma");
        assert_eq!(r.fixed_cost(), 300);
    }

    #[test]
    fn test_read_rejects_bad_number() {
        let csv = "company_name,variable_cost_ratio,fixed_cost,sales\n\
                   Beta,0.6,lots,2000\n";
        let err = read_portfolio(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn test_read_truncates_fractional_amounts() {
        let csv = "company_name,variable_cost_ratio,fixed_cost,sales\n\
                   A,0.6,1000.0,2000\n\
                   B,0.5,299.9,-10.7\n";
        let p = read_portfolio(csv.as_bytes()).unwrap();
        assert_eq!(p.records()[0].fixed_cost(), 1000);
        assert_eq!(p.records()[0].sales(), 2000);
        assert_eq!(p.records()[1].fixed_cost(), 299);
        assert_eq!(p.records()[1].sales(), -10);
    }

    #[test]
    fn test_read_rejects_amount_beyond_i64() {
        let csv = "company_name,variable_cost_ratio,fixed_cost,sales\n\
                   A,0.6,1000,99999999999999999999\n";
        let err = read_portfolio(csv.as_bytes()).unwrap_err();
        match err {
            BreakevenError::DataLoad(msg) => {
                assert!(msg.contains("line 2"), "got: {msg}");
                assert!(msg.contains("sales"), "got: {msg}");
            }
            other => panic!("Expected DataLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rejects_out_of_range_ratio() {
        let csv = "company_name,variable_cost_ratio,fixed_cost,sales\n\
                   Beta,1.2,1000,2000\n";
        assert!(read_portfolio(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_missing_column_fails() {
        let csv = "company_name,fixed_cost,sales\nBeta,1000,2000\n";
        assert!(read_portfolio(csv.as_bytes()).is_err());
    }
}
