use thiserror::Error;

/// Fatal errors. Anything that only degrades the output (missing logo, failed
/// product image, malformed money string) is logged and never surfaces here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid quotation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid quotation: {0}")]
    InvalidInput(String),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}
