use thiserror::Error;

/// Everything that can go wrong while looking up a word
///
/// Nothing here is fatal. `InvalidInput` never leaves the UI, `Provider`
/// is shown to the user as-is and `Storage` is only ever logged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Provider(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<shobdo_store::StoreError> for Error {
    fn from(err: shobdo_store::StoreError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<shobdo_api::GeminiError> for Error {
    fn from(err: shobdo_api::GeminiError) -> Self {
        Error::Provider(err.to_string())
    }
}
