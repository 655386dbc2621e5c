// TUI application state and key handling
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use shobdo_core::{SearchSession, SearchState, SearchTicket, TranslationEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Searching, // Typing in the search box
    Normal,    // Scrolling through results
    History,   // Picking a past search
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search_input: String,
    pub session: SearchSession,
    pub history_index: usize,
    pub history_state: ListState,
    pub results_scroll: u16,
}

impl App {
    pub fn new(session: SearchSession) -> Self {
        let mut history_state = ListState::default();
        if !session.history().is_empty() {
            history_state.select(Some(0));
        }

        Self {
            should_quit: false,
            input_mode: InputMode::Searching,
            search_input: String::new(),
            session,
            history_index: 0,
            history_state,
            results_scroll: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        self.session.state()
    }

    pub fn history(&self) -> &[String] {
        self.session.history()
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_history_mode(&mut self) {
        self.input_mode = InputMode::History;
        self.sync_history_selection();
    }

    /// Handle one key press
    ///
    /// Returns a ticket when the key started a search; the caller is
    /// responsible for running it and handing the answer to `apply_result`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchTicket> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.input_mode {
            InputMode::Searching => match key.code {
                KeyCode::Enter => {
                    self.enter_normal_mode();
                    return self.submit_search();
                }
                KeyCode::Char(c) => self.search_input.push(c),
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Esc => self.enter_normal_mode(),
                KeyCode::Tab => self.enter_history_mode(),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('/') | KeyCode::Char('i') => self.enter_search_mode(),
                KeyCode::Char('h') | KeyCode::Tab => self.enter_history_mode(),
                KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                _ => {}
            },
            InputMode::History => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('/') => self.enter_search_mode(),
                KeyCode::Esc | KeyCode::Tab => self.enter_normal_mode(),
                KeyCode::Char('j') | KeyCode::Down => self.next_history(),
                KeyCode::Char('k') | KeyCode::Up => self.previous_history(),
                KeyCode::Char('c') => self.clear_history(),
                KeyCode::Enter => return self.search_selected_history(),
                _ => {}
            },
        }

        None
    }

    /// Search for whatever is in the input box
    pub fn submit_search(&mut self) -> Option<SearchTicket> {
        self.results_scroll = 0;
        let ticket = self.session.submit(&self.search_input);
        if let Some(ticket) = &ticket {
            // Trimmed term goes back in the box, and it is now history entry 0
            self.search_input = ticket.term.clone();
            self.history_index = 0;
            self.sync_history_selection();
        }
        ticket
    }

    /// Re-run the highlighted history entry
    pub fn search_selected_history(&mut self) -> Option<SearchTicket> {
        let term = self.selected_history_term()?.to_string();
        self.search_input = term;
        self.enter_normal_mode();
        self.submit_search()
    }

    pub fn apply_result(
        &mut self,
        ticket: &SearchTicket,
        result: shobdo_core::Result<Vec<TranslationEntry>>,
    ) {
        if self.session.complete(ticket, result) {
            self.results_scroll = 0;
        }
    }

    pub fn selected_history_term(&self) -> Option<&str> {
        self.history().get(self.history_index).map(String::as_str)
    }

    pub fn next_history(&mut self) {
        let len = self.history().len();
        if len > 0 {
            self.history_index = (self.history_index + 1).min(len - 1);
            self.history_state.select(Some(self.history_index));
        }
    }

    pub fn previous_history(&mut self) {
        if self.history_index > 0 {
            self.history_index -= 1;
            self.history_state.select(Some(self.history_index));
        }
    }

    pub fn clear_history(&mut self) {
        self.session.clear_history();
        self.history_index = 0;
        self.history_state.select(None);
    }

    pub fn scroll_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    fn sync_history_selection(&mut self) {
        let len = self.history().len();
        if len == 0 {
            self.history_index = 0;
            self.history_state.select(None);
        } else {
            self.history_index = self.history_index.min(len - 1);
            self.history_state.select(Some(self.history_index));
        }
    }
}
