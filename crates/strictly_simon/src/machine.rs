//! Turn state machine: state identifiers and the transition table.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// The four phases of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum StateId {
    /// Waiting for the player to begin.
    Start,
    /// The computer extends and plays back the sequence.
    Computer,
    /// The player replays the sequence.
    Player,
    /// The player made a mistake.
    Lost,
}

impl StateId {
    /// Successor used when a transition names no explicit target.
    ///
    /// Lost has none: it only leaves through a session restart.
    pub fn implicit_successor(self) -> Option<StateId> {
        match self {
            StateId::Start => Some(StateId::Computer),
            StateId::Computer => Some(StateId::Player),
            StateId::Player => Some(StateId::Computer),
            StateId::Lost => None,
        }
    }
}

/// What a state asks for once its `enter` hook completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Follow the implicit table.
    Implicit,
    /// Go straight to the named state.
    Explicit(StateId),
    /// The session was restarted and already sits in Start.
    Restarted,
}

impl Step {
    /// The explicit target, if any.
    pub fn target(self) -> Option<StateId> {
        match self {
            Step::Explicit(target) => Some(target),
            Step::Implicit | Step::Restarted => None,
        }
    }
}

/// Tracks the single active state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine {
    current: StateId,
}

impl StateMachine {
    /// Creates a machine in Start.
    pub fn new() -> Self {
        Self {
            current: StateId::Start,
        }
    }

    /// The active state.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Computes where a transition from the current state lands.
    ///
    /// An explicit target always wins. Without one the implicit table is
    /// consulted; a state with no successor stays where it is.
    pub fn resolve(&self, target: Option<StateId>) -> StateId {
        target
            .or_else(|| self.current.implicit_successor())
            .unwrap_or(self.current)
    }

    /// Moves to the next state and returns it.
    #[instrument(skip(self), fields(from = %self.current))]
    pub fn transition(&mut self, target: Option<StateId>) -> StateId {
        let next = self.resolve(target);
        if target.is_none() && next == self.current {
            warn!(state = %self.current, "No implicit successor, staying put");
        }
        info!(to = %next, explicit = target.is_some(), "State transition");
        self.current = next;
        next
    }

    /// Places the machine in Start without consulting the table.
    pub fn reset(&mut self) {
        self.current = StateId::Start;
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
