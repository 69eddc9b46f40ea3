use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum PasarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("API error: {0}")]
    Api(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("{0} falls on a Saturday or Sunday (no market data)")]
    WeekendDate(NaiveDate),

    #[error("No data for {prev} or {curr} in the API response (available: {})", .available.join(", "))]
    DatesUnavailable {
        prev: String,
        curr: String,
        available: Vec<String>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PasarError>;
