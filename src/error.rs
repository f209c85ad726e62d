use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Expected column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    #[error("No API key provided")]
    MissingCredential,

    #[error("SPARQL endpoint error (status {status}): {body}")]
    SparqlStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Seed generation failed (status {status}): {body}")]
    GenerationFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;
