//! Terminal front end: crossterm input and ratatui rendering.

mod input;
mod ui;

pub use input::{CrosstermInput, map_key};
pub use ui::{TerminalRenderer, draw, scale_region};

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use strictly_simon::{Console, GameSession, Grid, SequenceGenerator, SimonSays, ThreadPacer};
use tracing::{debug, info, instrument, warn};

use crate::SimonConfig;

/// Restores the terminal on drop, whatever way the game ends.
#[derive(Debug)]
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen, and asks for key-release
    /// reporting where the terminal supports it.
    #[instrument]
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            // Plain-text keys only report releases as escape codes.
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES;
            execute!(stdout, PushKeyboardEnhancementFlags(flags))
                .context("Failed to enable key release reporting")?;
        }
        info!(keyboard_enhanced, "Terminal prepared");
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        debug!("Restoring terminal");
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if let Err(e) = execute!(stdout, LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to disable raw mode");
        }
    }
}

/// Runs the game in the current terminal until the player quits.
#[instrument(skip_all)]
pub fn run_tui(config: &SimonConfig) -> Result<()> {
    info!("Starting Simon Says TUI");

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    let board = config.board();
    let session = GameSession::new(
        Grid::classic(board.width, board.height),
        SequenceGenerator::new(*config.seed()),
    );
    let console = Console::new(
        Box::new(TerminalRenderer::new(terminal)),
        Box::new(CrosstermInput::new()),
        Box::new(ThreadPacer),
        *config.timing(),
    );

    let mut game = SimonSays::new(session, console);
    game.restart();
    let result = game.run();

    drop(game);
    drop(guard);
    result.context("Game stopped on a device error")?;

    info!("Simon Says TUI exited");
    Ok(())
}
