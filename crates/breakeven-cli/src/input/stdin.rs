use breakeven_core::loader;
use breakeven_core::Portfolio;
use std::io::{self, Read};

/// Attempt to read company CSV from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Portfolio>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    let portfolio = match loader::read_portfolio(buffer.as_bytes()) {
        Ok(p) => {
            log::info!("loaded {} company records from stdin", p.len());
            p
        }
        Err(e) => {
            log::warn!("{e}");
            Portfolio::default()
        }
    };
    Ok(Some(portfolio))
}
