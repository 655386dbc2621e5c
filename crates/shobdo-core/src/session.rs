// Search orchestration - one in-flight lookup at a time
use crate::{
    history::HistoryManager, models::TranslationEntry, search::TranslationProvider, Error, Result,
};
use tracing::{debug, info};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a word to search.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while fetching the translation.";

/// What the UI should be showing right now
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        term: String,
    },
    Success {
        term: String,
        entries: Vec<TranslationEntry>,
    },
    /// The provider answered but had nothing for this term
    Empty {
        term: String,
        message: String,
    },
    Error {
        message: String,
    },
}

impl SearchState {
    pub fn entries(&self) -> &[TranslationEntry] {
        match self {
            SearchState::Success { entries, .. } => entries,
            _ => &[],
        }
    }

    /// Message to show in red, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            SearchState::Empty { message, .. } | SearchState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Handle for one submitted search
///
/// Results must be handed back with the ticket they belong to, so late
/// answers for an older submission can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub term: String,
}

/// Owns the search state and the history, and moves between states
///
/// Idle -> Loading -> Success | Empty | Error. A new submission supersedes
/// whatever was in flight before it.
pub struct SearchSession {
    history: HistoryManager,
    state: SearchState,
    latest_ticket: u64,
}

impl SearchSession {
    pub fn new(history: HistoryManager) -> Self {
        Self {
            history,
            state: SearchState::Idle,
            latest_ticket: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading { .. })
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn clear_history(&mut self) {
        info!("Clearing search history");
        self.history.clear();
    }

    /// Start a search for `raw`
    ///
    /// Blank input never reaches the provider: the state becomes an error
    /// prompting for input, history stays as it was and `None` comes back.
    pub fn submit(&mut self, raw: &str) -> Option<SearchTicket> {
        let term = match validate_term(raw) {
            Ok(term) => term,
            Err(e) => {
                // Still a submission: whatever is in flight is now stale
                self.latest_ticket += 1;
                self.state = SearchState::Error {
                    message: failure_message(e),
                };
                return None;
            }
        };

        self.history.record(term);
        self.latest_ticket += 1;
        self.state = SearchState::Loading {
            term: term.to_string(),
        };

        info!("Searching for: {}", term);
        Some(SearchTicket {
            id: self.latest_ticket,
            term: term.to_string(),
        })
    }

    /// Deliver the provider's answer for `ticket`
    ///
    /// Returns false when the ticket was superseded and the answer ignored.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<TranslationEntry>>,
    ) -> bool {
        if ticket.id != self.latest_ticket {
            debug!(
                "Dropping stale result for '{}' (ticket {}, latest {})",
                ticket.term, ticket.id, self.latest_ticket
            );
            return false;
        }

        self.state = match result {
            Ok(entries) if entries.is_empty() => SearchState::Empty {
                term: ticket.term.clone(),
                message: format!("No translation found for \"{}\".", ticket.term),
            },
            Ok(entries) => {
                info!("Found {} entries for '{}'", entries.len(), ticket.term);
                SearchState::Success {
                    term: ticket.term.clone(),
                    entries,
                }
            }
            Err(e) => SearchState::Error {
                message: failure_message(e),
            },
        };
        true
    }

    /// Submit and wait for the answer in one go
    pub async fn search<P>(&mut self, provider: &P, raw: &str) -> &SearchState
    where
        P: TranslationProvider + ?Sized,
    {
        if let Some(ticket) = self.submit(raw) {
            let result = provider.fetch_translations(&ticket.term).await;
            self.complete(&ticket, result);
        }
        &self.state
    }
}

/// Trimmed search term, or `InvalidInput` when there is nothing to search
pub fn validate_term(raw: &str) -> Result<&str> {
    let term = raw.trim();
    if term.is_empty() {
        Err(Error::InvalidInput(EMPTY_INPUT_MESSAGE.to_string()))
    } else {
        Ok(term)
    }
}

fn failure_message(err: Error) -> String {
    let message = match err {
        Error::Provider(message) | Error::InvalidInput(message) => message,
        other => other.to_string(),
    };

    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockTranslationProvider;
    use shobdo_store::MemoryStore;

    fn session() -> SearchSession {
        SearchSession::new(HistoryManager::load(Box::new(MemoryStore::new())))
    }

    fn entry(word: &str) -> TranslationEntry {
        TranslationEntry::new(word, "শব্দ", "noun")
    }

    #[test]
    fn test_starts_idle() {
        let session = session();
        assert_eq!(session.state(), &SearchState::Idle);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_blank_submit_prompts_for_input() {
        let mut session = session();
        assert!(session.submit("   ").is_none());
        assert_eq!(
            session.state(),
            &SearchState::Error {
                message: EMPTY_INPUT_MESSAGE.to_string()
            }
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_submit_records_and_loads() {
        let mut session = session();
        let ticket = session.submit("  ocean ").unwrap();

        assert_eq!(ticket.term, "ocean");
        assert!(session.is_loading());
        assert_eq!(session.history(), &["ocean"]);
    }

    #[test]
    fn test_submit_clears_previous_results() {
        let mut session = session();
        let ticket = session.submit("sky").unwrap();
        session.complete(&ticket, Ok(vec![entry("sky")]));
        assert_eq!(session.state().entries().len(), 1);

        session.submit("sea").unwrap();
        assert!(session.state().entries().is_empty());
        assert_eq!(session.state().message(), None);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut session = session();
        let slow = session.submit("first").unwrap();
        let fast = session.submit("second").unwrap();

        assert!(session.complete(&fast, Ok(vec![entry("second")])));
        assert!(!session.complete(&slow, Ok(vec![entry("first")])));

        match session.state() {
            SearchState::Success { term, entries } => {
                assert_eq!(term, "second");
                assert_eq!(entries[0].english_word, "second");
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_blank_submit_supersedes_inflight_lookup() {
        let mut session = session();
        let inflight = session.submit("foo").unwrap();
        assert!(session.submit("   ").is_none());

        assert!(!session.complete(&inflight, Ok(vec![entry("foo")])));
        assert_eq!(session.state().message(), Some(EMPTY_INPUT_MESSAGE));
        assert_eq!(session.history(), &["foo"]);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let mut provider = MockTranslationProvider::new();
        provider
            .expect_fetch_translations()
            .withf(|word| word == "xyzzy123")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut session = session();
        let state = session.search(&provider, "xyzzy123").await.clone();

        match state {
            SearchState::Empty { term, message } => {
                assert_eq!(term, "xyzzy123");
                assert!(message.contains("xyzzy123"));
            }
            other => panic!("expected Empty, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_stores_entries() {
        let mut provider = MockTranslationProvider::new();
        provider
            .expect_fetch_translations()
            .times(1)
            .returning(|word| Ok(vec![entry(word)]));

        let mut session = session();
        session.search(&provider, "Light").await;

        assert_eq!(session.state().entries()[0].english_word, "Light");
        assert_eq!(session.history(), &["Light"]);
    }

    #[tokio::test]
    async fn test_provider_failure_message_is_verbatim() {
        let mut provider = MockTranslationProvider::new();
        provider
            .expect_fetch_translations()
            .returning(|_| Err(Error::Provider("Quota exhausted".to_string())));

        let mut session = session();
        let state = session.search(&provider, "night").await;

        assert_eq!(
            state,
            &SearchState::Error {
                message: "Quota exhausted".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_provider_failure_without_message_uses_fallback() {
        let mut provider = MockTranslationProvider::new();
        provider
            .expect_fetch_translations()
            .returning(|_| Err(Error::Provider(String::new())));

        let mut session = session();
        let state = session.search(&provider, "day").await;

        assert_eq!(state.message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_blank_search_never_calls_provider() {
        let mut provider = MockTranslationProvider::new();
        provider.expect_fetch_translations().times(0);

        let mut session = session();
        let state = session.search(&provider, "").await;

        assert_eq!(state.message(), Some(EMPTY_INPUT_MESSAGE));
    }

    #[test]
    fn test_validate_term() {
        assert_eq!(validate_term("  word\t").unwrap(), "word");
        assert!(matches!(validate_term(" \n "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_clear_history() {
        let mut session = session();
        session.submit("one");
        session.submit("two");
        session.clear_history();
        assert!(session.history().is_empty());
    }
}
