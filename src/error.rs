use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty input: {context}")]
    EmptyInput { context: String },

    #[error("Unrecognized {category} code: {code}")]
    UnrecognizedCategory { category: &'static str, code: i64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl AnalyticsError {
    pub fn empty_input(context: impl Into<String>) -> Self {
        AnalyticsError::EmptyInput {
            context: context.into(),
        }
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalyticsError::EmptyInput { .. })
    }
}
