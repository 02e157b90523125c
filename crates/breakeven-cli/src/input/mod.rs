pub mod file;
pub mod stdin;

use breakeven_core::Portfolio;

/// Input file used when neither `--input` nor stdin supplies data.
pub const DEFAULT_INPUT: &str = "companies.csv";

/// Resolve the portfolio from `--input`, piped stdin, or the default file.
///
/// Missing or malformed data yields an empty portfolio; only a stdin read
/// failure is an error.
pub fn load_portfolio(path: Option<&str>) -> Result<Portfolio, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_portfolio_csv(path);
    }
    if let Some(portfolio) = stdin::read_stdin()? {
        return Ok(portfolio);
    }
    file::read_portfolio_csv(DEFAULT_INPUT)
}
