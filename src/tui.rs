//! Terminal setup and teardown.
//!
//! Raw mode and the alternate screen are entered once at start-up and left
//! on exit. A panic hook restores the terminal if the app crashes in between.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{AppError, Result};

/// The terminal type driven by the main loop.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Install the panic hook, then enter the alternate screen and raw mode.
pub fn enter() -> Result<Tui> {
    install_panic_hook();

    terminal::enable_raw_mode()
        .map_err(|e| AppError::terminal(format!("could not enable raw mode: {}", e)))?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
        .map_err(|e| AppError::terminal(format!("could not enter alternate screen: {}", e)))?;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(|e| AppError::terminal(e.to_string()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Leave the alternate screen and disable raw mode.
pub fn exit(terminal: &mut Tui) -> Result<()> {
    terminal::disable_raw_mode()
        .map_err(|e| AppError::terminal(format!("could not disable raw mode: {}", e)))?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Best effort; the terminal may already be restored
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);

        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_hook_restores_and_chains() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let previous = panic::take_hook();
        let chained = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&chained);
        panic::set_hook(Box::new(move |_| flag.store(true, Ordering::SeqCst)));

        // Restoring without a tty fails silently instead of panicking again
        install_panic_hook();
        let result = panic::catch_unwind(|| panic!("boom"));

        let _ = panic::take_hook();
        panic::set_hook(previous);

        assert!(result.is_err());
        assert!(chained.load(Ordering::SeqCst));
    }
}
