// UI rendering logic
use crate::{App, InputMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use shobdo_core::{SearchState, TranslationEntry};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Results + history
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    // History is a sidebar, results get the bulk of the width
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[2]);

    render_results(frame, app, content_chunks[0]);
    render_history(frame, app, content_chunks[1]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "শব্দ Shobdo",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  English → Bengali dictionary",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal | InputMode::History => Style::default(),
    };

    let input = Paragraph::new(app.search_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("English word (ESC to navigate, / to search)")
                .border_style(input_style),
        );

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + app.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.state() {
        SearchState::Idle => (
            " Results ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Type an English word and press ENTER",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        SearchState::Loading { term } => (
            " Results (Loading...) ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  Looking up \"{}\"...", term),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
            ],
        ),
        SearchState::Success { term, entries } => (
            format!(" Results for \"{}\" ({}) ", term, entries.len()),
            entries
                .iter()
                .enumerate()
                .flat_map(|(i, entry)| {
                    let mut lines = if i > 0 { vec![Line::from("")] } else { Vec::new() };
                    lines.extend(entry_lines(entry));
                    lines
                })
                .collect(),
        ),
        SearchState::Empty { message, .. } | SearchState::Error { message } => (
            " Results ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(Color::Red),
                )),
            ],
        ),
    };

    let border_style = if app.input_mode == InputMode::Normal {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Lines for one dictionary entry, optional parts only when present
pub fn entry_lines(entry: &TranslationEntry) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            entry.english_word.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            entry.bengali_word.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("({})", entry.part_of_speech),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        ),
    ])];

    if let Some(pronunciation) = &entry.pronunciation {
        lines.push(Line::from(vec![
            Span::styled("  Pronunciation: ", label),
            Span::raw(format!("/{}/", pronunciation)),
        ]));
    }

    if let Some((english, bengali)) = entry.example() {
        lines.push(Line::from(Span::styled("  Example:", label)));
        if let Some(english) = english {
            lines.push(Line::from(format!("    {}", english)));
        }
        if let Some(bengali) = bengali {
            lines.push(Line::from(Span::styled(
                format!("    {}", bengali),
                Style::default().fg(Color::Green),
            )));
        }
    }

    if !entry.synonyms.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Synonyms: ", label),
            Span::styled(entry.synonyms.join(", "), Style::default().fg(Color::Blue)),
        ]));
    }

    if !entry.antonyms.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Antonyms: ", label),
            Span::styled(entry.antonyms.join(", "), Style::default().fg(Color::Yellow)),
        ]));
    }

    lines
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.input_mode == InputMode::History;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" History ({}) ", app.history().len()))
        .border_style(border_style);

    if app.history().is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No searches yet",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history()
        .iter()
        .map(|term| ListItem::new(term.clone()))
        .collect();

    let highlight = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.history_state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH MODE | ENTER: search | TAB: history | ESC: normal mode",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => {
            Span::raw("j/k: scroll | /: search | h/TAB: history | q: quit")
        }
        InputMode::History => Span::styled(
            "HISTORY | j/k: navigate | ENTER: search again | c: clear | ESC: close",
            Style::default().fg(Color::Cyan),
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}
