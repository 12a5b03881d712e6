//! Game loop tying the session, the state table and the console together.

use tracing::{error, info, instrument};

use crate::console::{Console, DeviceError, Interrupt};
use crate::machine::{StateId, Step};
use crate::session::GameSession;

/// Runs a game until the player quits.
#[derive(Debug)]
pub struct SimonSays {
    session: GameSession,
    console: Console,
}

impl SimonSays {
    /// Creates a game from a session and its devices.
    pub fn new(session: GameSession, console: Console) -> Self {
        Self { session, console }
    }

    /// The session state.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Resets the session so the next step enters Start.
    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Runs the active state's `enter` hook and applies the transition it
    /// requests. Returns the state that is active afterwards.
    #[instrument(skip(self), fields(state = %self.session.machine().current()))]
    pub fn step(&mut self) -> Result<StateId, Interrupt> {
        let current = self.session.machine().current();
        let step = current.handler().enter(&mut self.session, &mut self.console)?;
        self.apply(current, step)
    }

    fn apply(&mut self, current: StateId, step: Step) -> Result<StateId, Interrupt> {
        match step {
            Step::Restarted => Ok(self.session.machine().current()),
            Step::Implicit | Step::Explicit(_) => {
                current
                    .handler()
                    .leave(&mut self.session, &mut self.console)?;
                Ok(self.session.machine_mut().transition(step.target()))
            }
        }
    }

    /// Steps until a quit request or a device failure.
    ///
    /// A quit is a normal end and returns `Ok`.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<(), DeviceError> {
        info!("Game loop started");
        loop {
            match self.step() {
                Ok(_) => {}
                Err(Interrupt::Quit) => {
                    info!(level = self.session.level(), "Player quit");
                    return Ok(());
                }
                Err(Interrupt::Device(err)) => {
                    error!(error = %err, "Device failure, stopping game loop");
                    return Err(err);
                }
            }
        }
    }
}
