//! Error handling for the region health analytics pipeline.

/// Errors that can occur while running the analytics pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The flattener was invoked on an empty batch of records
    #[error("cannot flatten an empty batch of records")]
    EmptyBatch,

    /// Error talking to the record store
    #[error("record store error: {0}")]
    RecordStore(String),

    /// Transport-level HTTP error from either external collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error from the text-generation service, or a malformed response
    #[error("text generation error: {0}")]
    Generation(String),

    /// Error while assembling the statistical data package
    #[error("data packaging error: {0}")]
    Packaging(String),

    /// A fetched record could not be interpreted
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

/// Result type for analytics pipeline operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
