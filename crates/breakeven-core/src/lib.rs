pub mod error;
pub mod format;
pub mod portfolio;
pub mod record;
pub mod summary;
pub mod types;

#[cfg(feature = "charts")]
pub mod chart;

#[cfg(feature = "loader")]
pub mod loader;

pub use error::BreakevenError;
pub use portfolio::Portfolio;
pub use record::{FinancialRecord, SafetyLevel};
pub use types::*;

/// Standard result type for all break-even operations
pub type BreakevenResult<T> = Result<T, BreakevenError>;
