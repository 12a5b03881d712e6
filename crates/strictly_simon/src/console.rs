//! Collaborators the game drives but does not own: drawing, input and pacing.

use std::time::Duration;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{Grid, Quadrant};

/// Category of key event a wait is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
}

/// Key identity as seen by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// One of the four squares.
    Square(Quadrant),
    /// Accept / continue.
    Confirm,
    /// Quit request.
    Cancel,
    /// Anything else.
    Other,
}

/// A single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    /// Press or release.
    pub kind: EventKind,
    /// Which key.
    pub key: Key,
}

impl InputEvent {
    /// Creates a key-down event.
    pub fn down(key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            key,
        }
    }

    /// Creates a key-up event.
    pub fn up(key: Key) -> Self {
        Self {
            kind: EventKind::KeyUp,
            key,
        }
    }
}

/// Failure of a rendering or input device.
#[derive(Debug, Clone, Display, Error)]
#[display("Device error: {} at {}:{}", message, file, line)]
pub struct DeviceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DeviceError {
    /// Creates a new device error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for DeviceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Reasons the game loop stops.
#[derive(Debug, Clone, Display, Error)]
pub enum Interrupt {
    /// The player asked to quit.
    #[display("Quit requested")]
    Quit,
    /// A device failed.
    #[display("{}", _0)]
    Device(DeviceError),
}

impl From<DeviceError> for Interrupt {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}

/// Draws the board.
pub trait Renderer {
    /// Draws the grid with an optional text overlay on top.
    fn draw(&mut self, grid: &Grid, overlay: Option<&str>) -> Result<(), DeviceError>;

    /// Draws the grid dimmed behind a centered message.
    fn render_overlay(&mut self, grid: &Grid, text: &str) -> Result<(), DeviceError> {
        self.draw(grid, Some(text))
    }
}

/// Blocking source of key events.
///
/// Implementations block without timeout. Events whose kind differs from the
/// requested one are discarded so they cannot satisfy a later wait.
/// [`Key::Cancel`] may be returned for either kind.
pub trait InputSource {
    /// Blocks until an event of `kind` (or a cancel) arrives.
    fn wait_for_event(&mut self, kind: EventKind) -> Result<InputEvent, DeviceError>;
}

/// Sleep primitive used to pace animation.
pub trait Pacer {
    /// Blocks for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// [`Pacer`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Animation delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How long a square stays lit during playback.
    pub highlight_ms: u64,
    /// Gap after a square goes dark during playback.
    pub gap_ms: u64,
    /// Pause when leaving a state, and before restarting after a loss.
    pub transition_ms: u64,
}

impl Timing {
    /// Playback highlight as a duration.
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    /// Playback gap as a duration.
    pub fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }

    /// State-change pause as a duration.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            highlight_ms: 400,
            gap_ms: 200,
            transition_ms: 1000,
        }
    }
}

/// Bundle of devices handed to each state.
pub struct Console {
    renderer: Box<dyn Renderer>,
    input: Box<dyn InputSource>,
    pacer: Box<dyn Pacer>,
    timing: Timing,
}

impl Console {
    /// Creates a console from its devices.
    pub fn new(
        renderer: Box<dyn Renderer>,
        input: Box<dyn InputSource>,
        pacer: Box<dyn Pacer>,
        timing: Timing,
    ) -> Self {
        Self {
            renderer,
            input,
            pacer,
            timing,
        }
    }

    /// Configured delays.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Draws the grid, with an optional overlay.
    pub fn draw(&mut self, grid: &Grid, overlay: Option<&str>) -> Result<(), Interrupt> {
        trace!(pressed = ?grid.pressed(), ?overlay, "Drawing");
        match overlay {
            Some(text) => self.renderer.render_overlay(grid, text)?,
            None => self.renderer.draw(grid, None)?,
        }
        Ok(())
    }

    /// The renderer, for operations that redraw on their own.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Sleeps for `duration`.
    pub fn pause(&mut self, duration: Duration) {
        self.pacer.pause(duration);
    }

    /// Waits for the next event of `kind`.
    ///
    /// A cancel key turns into [`Interrupt::Quit`] here, whatever state is
    /// waiting.
    #[instrument(skip(self))]
    pub fn wait_for(&mut self, kind: EventKind) -> Result<InputEvent, Interrupt> {
        let event = self.input.wait_for_event(kind)?;
        if event.key == Key::Cancel {
            debug!("Cancel key observed");
            return Err(Interrupt::Quit);
        }
        trace!(?event, "Input received");
        Ok(event)
    }

    /// Waits until a confirm key is released, discarding everything else.
    pub fn wait_for_confirm(&mut self) -> Result<(), Interrupt> {
        while self.wait_for(EventKind::KeyUp)?.key != Key::Confirm {}
        Ok(())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
