// Core dictionary logic - history, providers and the search state machine
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod providers;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::Error;
pub use history::{HistoryManager, SearchHistory, HISTORY_STORAGE_KEY, MAX_HISTORY_ENTRIES};
pub use models::TranslationEntry;
pub use providers::GeminiProvider;
pub use search::TranslationProvider;
pub use session::{SearchSession, SearchState, SearchTicket};

pub type Result<T> = std::result::Result<T, Error>;
