//! Error taxonomy shared by the store, pipeline, gateway and tabular utilities.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CordataError>;

#[derive(Debug, Error)]
pub enum CordataError {
    /// Lookup by `hash_id` matched no record.
    #[error("use case {hash_id} not found")]
    NotFound { hash_id: u32 },

    /// Lookup by `hash_id` matched more than one record: the store is corrupt.
    #[error("use case id {hash_id} appears {count} times in the catalog")]
    DuplicateId { hash_id: u32, count: usize },

    #[error("no translation for {field} value '{value}'")]
    TranslationMissing { field: String, value: String },

    #[error("failed to fetch remote catalog (status code {status})")]
    RemoteFetch { status: u16 },

    #[error("unrecognized date '{value}'")]
    MalformedDate { value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl CordataError {
    /// HTTP status code used by the local API when this error reaches a route.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidInput(_) | Self::Parse(_) | Self::MalformedDate { .. } => 400,
            Self::TranslationMissing { .. } => 422,
            Self::RemoteFetch { .. } | Self::Http(_) => 502,
            _ => 500,
        }
    }
}
