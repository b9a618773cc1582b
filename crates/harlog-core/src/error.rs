use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read or write HAR data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode HAR JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid HAR structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
