//! Random sequence generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::Quadrant;

/// Produces uniformly random squares and appends them to a running sequence.
///
/// Owns its generator so a session can be seeded for reproducible play.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    rng: StdRng,
}

impl SequenceGenerator {
    /// Creates a generator seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic generator.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draws the next square, uniform over 1-4.
    pub fn next_value(&mut self) -> Quadrant {
        let number: u8 = self.rng.random_range(1..=4);
        // random_range(1..=4) only yields valid square numbers
        Quadrant::ALL[usize::from(number - 1)]
    }

    /// Appends one value to `sequence`, returning it along with the whole
    /// updated sequence for playback.
    pub fn extend<'a>(&mut self, sequence: &'a mut Vec<Quadrant>) -> (Quadrant, &'a [Quadrant]) {
        let value = self.next_value();
        sequence.push(value);
        debug!(%value, length = sequence.len(), "Sequence extended");
        (value, sequence.as_slice())
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
