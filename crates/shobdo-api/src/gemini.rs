use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured. Set GEMINI_API_KEY or add it to the config file.")]
    MissingApiKey,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Rate limit exceeded, try again in a moment")]
    RateLimitExceeded,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected response from the translation service: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GeminiError>;

/// One dictionary entry exactly as the model returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiEntry {
    pub english_word: String,
    pub bengali_word: String,
    pub part_of_speech: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub example_sentence_english: Option<String>,
    #[serde(default)]
    pub example_sentence_bengali: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// `base_url` is normally `DEFAULT_BASE_URL`, proxies and test servers aside
    pub fn with_base_url(api_key: Option<String>, model: String, base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!("Shobdo/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for every Bengali translation of `word`
    ///
    /// One request per call. An empty vector means the model found nothing,
    /// which is a perfectly valid answer.
    pub async fn fetch_entries(&self, word: &str) -> Result<Vec<GeminiEntry>> {
        let api_key = match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(GeminiError::MissingApiKey),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Requesting translations for '{}' from {}", word, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&build_request(word))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response.text().await?;
        let entries = parse_generate_response(&body)?;
        debug!("Model returned {} entries for '{}'", entries.len(), word);
        Ok(entries)
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> GeminiError {
    let message = api_error_message(body).unwrap_or_else(|| body.trim().to_string());

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return GeminiError::AuthFailed(message);
    }

    // Gemini reports a bad key as 400 INVALID_ARGUMENT
    if status == reqwest::StatusCode::BAD_REQUEST && message.contains("API key") {
        return GeminiError::AuthFailed(message);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return GeminiError::RateLimitExceeded;
    }

    GeminiError::RequestFailed(format!("Status {}: {}", status, message))
}

fn api_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

pub fn build_prompt(word: &str) -> String {
    format!(
        "You are an English to Bengali dictionary. Translate the English word \"{word}\" into Bengali. \
         Return one entry per distinct meaning with the Bengali word, the part of speech, \
         an English pronunciation guide, one English example sentence with its Bengali translation, \
         and up to five English synonyms and antonyms. \
         If \"{word}\" is not an English word, return an empty array."
    )
}

/// Request body for `generateContent` with a JSON response schema
pub fn build_request(word: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_prompt(word) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": entry_schema()
        }
    })
}

fn entry_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "englishWord": { "type": "STRING" },
                "bengaliWord": { "type": "STRING" },
                "partOfSpeech": { "type": "STRING" },
                "pronunciation": { "type": "STRING" },
                "exampleSentenceEnglish": { "type": "STRING" },
                "exampleSentenceBengali": { "type": "STRING" },
                "synonyms": { "type": "ARRAY", "items": { "type": "STRING" } },
                "antonyms": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["englishWord", "bengaliWord", "partOfSpeech"]
        }
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Pull the entry list out of a raw `generateContent` response body
pub fn parse_generate_response(body: &str) -> Result<Vec<GeminiEntry>> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GeminiError::MalformedResponse(format!("invalid response body: {}", e)))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GeminiError::RequestFailed(format!("Request blocked: {}", reason)));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GeminiError::MalformedResponse("response contained no text".into()));
    }

    serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| GeminiError::MalformedResponse(format!("could not read entries: {}", e)))
}

// Models occasionally wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
