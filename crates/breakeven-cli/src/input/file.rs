use breakeven_core::loader;
use breakeven_core::Portfolio;
use std::path::{Path, PathBuf};

/// Read a company CSV file into a portfolio.
///
/// A missing or unparsable file gives an empty portfolio; the reason is
/// logged by the loader.
pub fn read_portfolio_csv(path: &str) -> Result<Portfolio, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    Ok(loader::load_csv(&canonical))
}

/// Resolve relative paths against the working directory.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    if p.is_absolute() {
        Ok(p.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(p))
    }
}
