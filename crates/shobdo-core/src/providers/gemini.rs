use crate::{models::TranslationEntry, search::TranslationProvider, Result};
use shobdo_api::GeminiClient;
use tracing::info;

/// Gemini-backed translation provider
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn with_base_url(api_key: Option<String>, model: String, base_url: String) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::with_base_url(api_key, model, base_url)?,
        })
    }
}

#[async_trait::async_trait]
impl TranslationProvider for GeminiProvider {
    async fn fetch_translations(&self, word: &str) -> Result<Vec<TranslationEntry>> {
        info!("Looking up '{}' with {}", word, self.client.model());

        let entries = self.client.fetch_entries(word).await?;
        Ok(entries.into_iter().map(TranslationEntry::from).collect())
    }
}
