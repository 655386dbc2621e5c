// Translation backends
pub mod gemini;

pub use gemini::GeminiProvider;
