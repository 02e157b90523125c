use thiserror::Error;

#[derive(Debug, Error)]
pub enum BreakevenError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Data load error: {0}")]
    DataLoad(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BreakevenError {
    fn from(e: serde_json::Error) -> Self {
        BreakevenError::SerializationError(e.to_string())
    }
}

impl From<std::fmt::Error> for BreakevenError {
    fn from(e: std::fmt::Error) -> Self {
        BreakevenError::Render(e.to_string())
    }
}
