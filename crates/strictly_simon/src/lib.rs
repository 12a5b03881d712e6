//! Strictly Simon - pure Simon Says game logic.
//!
//! A 2x2 grid of colored squares plays back a growing sequence which the
//! player must repeat. This crate holds everything except the actual drawing
//! and keyboard handling, which are supplied through the [`Renderer`],
//! [`InputSource`] and [`Pacer`] traits.
//!
//! # Architecture
//!
//! - **Grid**: four squares with fixed quadrant regions and a pressed flag
//! - **Sequence**: seedable generator of square numbers 1-4
//! - **Session**: sequence, replay position and guess validation
//! - **Machine / States**: Start → Computer → Player → Computer …, with Lost
//!   reached explicitly on a wrong guess and left only by restarting
//! - **Driver**: the loop that runs `enter`/`leave` hooks until the player quits
//!
//! # Example
//!
//! ```no_run
//! use strictly_simon::{Console, GameSession, Grid, SequenceGenerator, SimonSays, ThreadPacer, Timing};
//! # fn devices() -> (Box<dyn strictly_simon::Renderer>, Box<dyn strictly_simon::InputSource>) { unimplemented!() }
//!
//! let (renderer, input) = devices();
//! let session = GameSession::new(Grid::classic(1024, 768), SequenceGenerator::seeded(7));
//! let console = Console::new(renderer, input, Box::new(ThreadPacer), Timing::default());
//! let mut game = SimonSays::new(session, console);
//! game.restart();
//! game.run()?;
//! # Ok::<(), strictly_simon::DeviceError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod console;
mod driver;
mod grid;
mod machine;
mod sequence;
mod session;
mod states;

pub use console::{
    Console, DeviceError, EventKind, InputEvent, InputSource, Interrupt, Key, Pacer, Renderer,
    ThreadPacer, Timing,
};
pub use driver::SimonSays;
pub use grid::{Grid, GridError, Quadrant, Region, Rgb, Square};
pub use machine::{StateId, StateMachine, Step};
pub use sequence::SequenceGenerator;
pub use session::{GameSession, GuessError};
pub use states::{ComputerState, LostState, PlayerState, StartState, State};
