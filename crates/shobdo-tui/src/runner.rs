// TUI event loop and terminal management
use crate::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use shobdo_core::{SearchTicket, TranslationEntry, TranslationProvider};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type Completion = (SearchTicket, shobdo_core::Result<Vec<TranslationEntry>>);

/// How long to wait for a key before redrawing
const TICK: Duration = Duration::from_millis(100);

pub async fn run_tui(mut app: App, provider: Arc<dyn TranslationProvider>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, provider).await;

    // Restore terminal even if the loop blew up
    let restored = restore_terminal(
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    );

    result.and(restored)
}

/// Every restore step has already run; report the first one that failed
fn restore_terminal(
    raw_mode: io::Result<()>,
    alternate_screen: io::Result<()>,
    cursor: io::Result<()>,
) -> anyhow::Result<()> {
    raw_mode?;
    alternate_screen?;
    cursor?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    provider: Arc<dyn TranslationProvider>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    loop {
        // Answers may arrive out of order, the session drops superseded ones
        while let Ok((ticket, result)) = rx.try_recv() {
            app.apply_result(&ticket, result);
        }

        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(ticket) = app.handle_key(key) {
                        spawn_lookup(Arc::clone(&provider), ticket, tx.clone());
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run the provider call off the UI loop so the screen keeps updating
fn spawn_lookup(
    provider: Arc<dyn TranslationProvider>,
    ticket: SearchTicket,
    tx: mpsc::UnboundedSender<Completion>,
) {
    tokio::spawn(async move {
        let result = provider.fetch_translations(&ticket.term).await;
        if let Err(e) = &result {
            tracing::warn!("Lookup for '{}' failed: {}", ticket.term, e);
        }
        // Receiver gone means the UI already quit
        let _ = tx.send((ticket, result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_reports_first_failure() {
        let err = restore_terminal(
            Err(io::Error::new(io::ErrorKind::Other, "raw mode")),
            Err(io::Error::new(io::ErrorKind::Other, "alternate screen")),
            Ok(()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "raw mode");
    }

    #[test]
    fn test_restore_ok_when_every_step_succeeds() {
        assert!(restore_terminal(Ok(()), Ok(()), Ok(())).is_ok());
    }
}
