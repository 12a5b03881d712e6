//! Game session: the sequence, the replay position and the state machine.

use derive_getters::Getters;
use derive_more::Display;
use tracing::{debug, info, instrument};

use crate::console::{DeviceError, Renderer};
use crate::machine::{StateMachine, Step};
use crate::sequence::SequenceGenerator;
use crate::{Grid, Quadrant};

/// A guess that does not continue the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
pub enum GuessError {
    /// The player pressed the wrong square.
    #[display("Expected square {} at position {}, got {}", expected, position, actual)]
    Mismatch {
        /// Zero-based index of the guess within the sequence.
        position: usize,
        /// Square the sequence called for.
        expected: Quadrant,
        /// Square the player pressed.
        actual: Quadrant,
    },

    /// A guess arrived after the whole sequence was already replayed.
    #[display("Guess past the end of a sequence of length {}", length)]
    Overrun {
        /// Sequence length at the time of the guess.
        length: usize,
    },
}

/// State shared by every phase of one game.
///
/// Invariant: `position <= sequence.len()`, and the sequence only grows until
/// [`GameSession::restart`].
#[derive(Debug, Getters)]
pub struct GameSession {
    grid: Grid,
    sequence: Vec<Quadrant>,
    #[getter(skip)]
    position: usize,
    #[getter(skip)]
    level_reached: usize,
    machine: StateMachine,
    #[getter(skip)]
    generator: SequenceGenerator,
}

impl GameSession {
    /// Creates a session over `grid`, drawing values from `generator`.
    #[instrument(skip_all)]
    pub fn new(grid: Grid, generator: SequenceGenerator) -> Self {
        Self {
            grid,
            sequence: Vec::new(),
            position: 0,
            level_reached: 0,
            machine: StateMachine::new(),
            generator,
        }
    }

    /// Index of the next value the player must reproduce.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of correct guesses made before the last mismatch.
    pub fn level_reached(&self) -> usize {
        self.level_reached
    }

    /// Mutable access to the board, for highlight changes.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Mutable access to the state machine.
    pub fn machine_mut(&mut self) -> &mut StateMachine {
        &mut self.machine
    }

    /// Current level: the length of the sequence.
    pub fn level(&self) -> usize {
        self.sequence.len()
    }

    /// True once every value of the sequence has been guessed.
    pub fn is_replayed(&self) -> bool {
        self.position >= self.sequence.len()
    }

    /// Empties the sequence and puts the machine back in Start directly.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Step {
        info!(previous_level = self.sequence.len(), "Restarting session");
        self.sequence.clear();
        self.position = 0;
        self.level_reached = 0;
        self.grid.clear();
        self.machine.reset();
        Step::Restarted
    }

    /// Records a player guess.
    ///
    /// The pressed square is highlighted and the guess is consumed whether or
    /// not it matches.
    #[instrument(skip(self), fields(position = self.position))]
    pub fn record_guess(&mut self, guess: Quadrant) -> Result<(), GuessError> {
        self.grid.clear();
        self.grid.press(guess);

        let Some(&expected) = self.sequence.get(self.position) else {
            return Err(GuessError::Overrun {
                length: self.sequence.len(),
            });
        };
        let position = self.position;
        self.position += 1;

        if expected != guess {
            info!(%expected, %guess, "Wrong guess");
            self.level_reached = position;
            return Err(GuessError::Mismatch {
                position,
                expected,
                actual: guess,
            });
        }
        debug!(%guess, remaining = self.sequence.len() - self.position, "Correct guess");
        Ok(())
    }

    /// Starts the next level: rewinds the replay position, redraws and asks
    /// for the implicit transition.
    #[instrument(skip(self, renderer))]
    pub fn advance_level(&mut self, renderer: &mut dyn Renderer) -> Result<Step, DeviceError> {
        info!(level = self.sequence.len(), "Level complete");
        self.position = 0;
        renderer.draw(&self.grid, None)?;
        Ok(Step::Implicit)
    }

    /// Appends a random value to the sequence and returns it.
    #[instrument(skip(self))]
    pub fn append_computer_value(&mut self) -> Quadrant {
        let (value, sequence) = self.generator.extend(&mut self.sequence);
        debug!(%value, length = sequence.len(), "Computer value appended");
        value
    }
}
