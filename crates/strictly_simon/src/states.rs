//! Per-state `enter`/`leave` behavior.
//!
//! Each state is a stateless unit struct; [`StateId::handler`] is the state
//! table mapping identifiers to them. `enter` returns the [`Step`] it wants
//! instead of calling into the next state, so the driver loop decides what
//! runs next.

use tracing::{debug, info, instrument};

use crate::console::{Console, EventKind, Interrupt, Key};
use crate::machine::{StateId, Step};
use crate::session::{GameSession, GuessError};

/// Behavior attached to one [`StateId`].
pub trait State {
    /// Runs when the state becomes active.
    fn enter(&self, session: &mut GameSession, console: &mut Console) -> Result<Step, Interrupt>;

    /// Runs before a table transition away from this state.
    ///
    /// Redraws the board and holds it for the transition delay.
    fn leave(&self, session: &mut GameSession, console: &mut Console) -> Result<(), Interrupt> {
        console.draw(session.grid(), None)?;
        let delay = console.timing().transition();
        console.pause(delay);
        Ok(())
    }
}

impl StateId {
    /// Looks up the behavior for this state.
    pub fn handler(self) -> &'static dyn State {
        match self {
            StateId::Start => &StartState,
            StateId::Computer => &ComputerState,
            StateId::Player => &PlayerState,
            StateId::Lost => &LostState,
        }
    }
}

/// Prompts the player to begin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartState;

impl State for StartState {
    #[instrument(skip_all)]
    fn enter(&self, session: &mut GameSession, console: &mut Console) -> Result<Step, Interrupt> {
        console.draw(session.grid(), Some(StartState::PROMPT))?;
        console.wait_for_confirm()?;
        info!("Game started");
        Ok(Step::Implicit)
    }
}

impl StartState {
    /// Overlay shown while waiting.
    pub const PROMPT: &'static str = "Press enter";
}

/// Extends the sequence and plays the whole of it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputerState;

impl State for ComputerState {
    #[instrument(skip_all, fields(level = session.level()))]
    fn enter(&self, session: &mut GameSession, console: &mut Console) -> Result<Step, Interrupt> {
        session.append_computer_value();
        let timing = *console.timing();

        // Every level replays from the first value, not just the new one.
        let playback = session.sequence().clone();
        for quadrant in playback {
            session.grid_mut().press(quadrant);
            console.draw(session.grid(), None)?;
            console.pause(timing.highlight());

            session.grid_mut().release(quadrant);
            console.draw(session.grid(), None)?;
            console.pause(timing.gap());
        }
        debug!(length = session.sequence().len(), "Playback finished");
        Ok(Step::Implicit)
    }
}

/// Collects the player's replay of the sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerState;

impl State for PlayerState {
    #[instrument(skip_all, fields(level = session.level()))]
    fn enter(&self, session: &mut GameSession, console: &mut Console) -> Result<Step, Interrupt> {
        while !session.is_replayed() {
            let event = console.wait_for(EventKind::KeyDown)?;
            let Key::Square(quadrant) = event.key else {
                debug!(key = ?event.key, "Ignoring non-square key");
                continue;
            };

            let guess = session.record_guess(quadrant);
            console.draw(session.grid(), None)?;
            match guess {
                Ok(()) => {}
                Err(GuessError::Mismatch { position, .. }) => {
                    info!(position, "Mismatch, game lost");
                    return Ok(Step::Explicit(StateId::Lost));
                }
                Err(err @ GuessError::Overrun { .. }) => {
                    // The loop condition rules this out.
                    debug!(error = %err, "Guess ignored");
                    break;
                }
            }

            // Only the release of the guessed square ends the debounce.
            while console.wait_for(EventKind::KeyUp)?.key != Key::Square(quadrant) {}
            session.grid_mut().clear();
            console.draw(session.grid(), None)?;
        }
        Ok(session.advance_level(console.renderer())?)
    }
}

/// Reports the level reached and waits to start over.
#[derive(Debug, Clone, Copy, Default)]
pub struct LostState;

impl LostState {
    /// Overlay text for a loss at `level`.
    pub fn message(level: usize) -> String {
        format!("Lost: {}", level)
    }
}

impl State for LostState {
    #[instrument(skip_all, fields(level = session.level_reached()))]
    fn enter(&self, session: &mut GameSession, console: &mut Console) -> Result<Step, Interrupt> {
        let message = LostState::message(session.level_reached());
        console.draw(session.grid(), Some(&message))?;
        session.grid_mut().clear();

        console.wait_for_confirm()?;
        let delay = console.timing().transition();
        console.pause(delay);
        Ok(session.restart())
    }
}
