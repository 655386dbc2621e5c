// Client for the generative-language translation backend
pub mod gemini;

pub use gemini::{GeminiClient, GeminiEntry, GeminiError, DEFAULT_BASE_URL, DEFAULT_MODEL};
