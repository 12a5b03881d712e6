//! Scripted devices for driving the game loop in tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use strictly_simon::{
    Console, DeviceError, EventKind, GameSession, Grid, InputEvent, InputSource, Key, Pacer,
    Quadrant, Renderer, SequenceGenerator, SimonSays, Timing,
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub pressed: Vec<Quadrant>,
    pub overlay: Option<String>,
}

/// Renderer that records every frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Rc<RefCell<Vec<Frame>>>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, grid: &Grid, overlay: Option<&str>) -> Result<(), DeviceError> {
        self.frames.borrow_mut().push(Frame {
            pressed: grid.pressed(),
            overlay: overlay.map(str::to_string),
        });
        Ok(())
    }
}

/// Input that replays a fixed script, then cancels.
///
/// Mirrors a real source: events of the wrong kind are dropped.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: Rc::new(RefCell::new(events.into_iter().collect())),
        }
    }
}

impl InputSource for ScriptedInput {
    fn wait_for_event(&mut self, kind: EventKind) -> Result<InputEvent, DeviceError> {
        let mut events = self.events.borrow_mut();
        while let Some(event) = events.pop_front() {
            if event.kind == kind || event.key == Key::Cancel {
                return Ok(event);
            }
        }
        Ok(InputEvent::up(Key::Cancel))
    }
}

/// Pacer that records requested pauses without sleeping.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pub pauses: Rc<RefCell<Vec<Duration>>>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

/// A game wired to recording devices, with handles to inspect them.
pub struct Harness {
    pub game: SimonSays,
    pub frames: Rc<RefCell<Vec<Frame>>>,
    pub pauses: Rc<RefCell<Vec<Duration>>>,
    pub input: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl Harness {
    pub fn new(seed: u64, script: impl IntoIterator<Item = InputEvent>) -> Self {
        let renderer = RecordingRenderer::default();
        let input = ScriptedInput::new(script);
        let pacer = RecordingPacer::default();
        let frames = renderer.frames.clone();
        let pauses = pacer.pauses.clone();
        let queue = input.events.clone();

        let session = GameSession::new(Grid::classic(1024, 768), SequenceGenerator::seeded(seed));
        let console = Console::new(
            Box::new(renderer),
            Box::new(input),
            Box::new(pacer),
            Timing::default(),
        );
        let mut game = SimonSays::new(session, console);
        game.restart();

        Self {
            game,
            frames,
            pauses,
            input: queue,
        }
    }

    /// Appends events to the remaining script.
    pub fn push(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.input.borrow_mut().extend(events);
    }
}

/// Key-down then key-up of a square.
pub fn tap(quadrant: Quadrant) -> [InputEvent; 2] {
    [
        InputEvent::down(Key::Square(quadrant)),
        InputEvent::up(Key::Square(quadrant)),
    ]
}

/// Key-down then key-up of the confirm key.
pub fn confirm() -> [InputEvent; 2] {
    [InputEvent::down(Key::Confirm), InputEvent::up(Key::Confirm)]
}

/// The first `n` values a generator seeded with `seed` produces.
pub fn expected_values(seed: u64, n: usize) -> Vec<Quadrant> {
    let mut generator = SequenceGenerator::seeded(seed);
    (0..n).map(|_| generator.next_value()).collect()
}

/// A square other than `quadrant`.
pub fn other_than(quadrant: Quadrant) -> Quadrant {
    Quadrant::ALL[(quadrant.to_index() + 1) % 4]
}
