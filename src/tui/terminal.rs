//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{OrderDeskError, Result};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode and switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns [`OrderDeskError::Io`] if stdout is not a TTY or the terminal
/// cannot be initialized. Raw mode is undone before returning an error.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(OrderDeskError::Io(
            "the order form needs an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| OrderDeskError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));

    terminal.map_err(|e| {
        let _ = disable_raw_mode();
        OrderDeskError::Io(format!("failed to initialize terminal: {e}"))
    })
}

/// Leaves the alternate screen and disables raw mode.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
