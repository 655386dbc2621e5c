use crate::{models::TranslationEntry, Result};

/// Anything that can turn an English word into dictionary entries
///
/// An empty vector is a valid answer ("nothing found"), failures come back
/// as `Error::Provider` with a message fit for the user. One call is one
/// request: no retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn fetch_translations(&self, word: &str) -> Result<Vec<TranslationEntry>>;
}
