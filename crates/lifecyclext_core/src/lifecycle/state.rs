use crate::error::{CoreError, Result};

/// Raw lifecycle state held by a `LifecycleRegistry`.
///
/// The registry treats these as opaque, host-defined values. `State` below is a
/// convenience set of constants for hosts that follow the usual component lifecycle.
pub type StateId = i32;

/// Host lifecycle stages, ordered from least to most active.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum State {
    Destroyed,
    Initialized,
    Created,
    Started,
    Resumed,
}

impl State {
    pub const fn id(self) -> StateId {
        match self {
            State::Destroyed => 0,
            State::Initialized => 1,
            State::Created => 2,
            State::Started => 3,
            State::Resumed => 4,
        }
    }

    pub const fn from_id(id: StateId) -> Option<State> {
        match id {
            0 => Some(State::Destroyed),
            1 => Some(State::Initialized),
            2 => Some(State::Created),
            3 => Some(State::Started),
            4 => Some(State::Resumed),
            _ => None,
        }
    }

    /// Stable, human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            State::Destroyed => "destroyed",
            State::Initialized => "initialized",
            State::Created => "created",
            State::Started => "started",
            State::Resumed => "resumed",
        }
    }

    /// Parse a label (case-insensitive).
    pub fn parse(input: &str) -> Result<State> {
        let wanted = input.trim();
        ALL_STATES
            .into_iter()
            .find(|state| state.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::unknown_state(input))
    }

    /// True when `self` is `other` or a more active stage.
    pub fn is_at_least(self, other: State) -> bool {
        self >= other
    }
}

impl From<State> for StateId {
    fn from(state: State) -> Self {
        state.id()
    }
}

/// Canonical list of all lifecycle states, least active first.
pub const ALL_STATES: [State; 5] = [
    State::Destroyed,
    State::Initialized,
    State::Created,
    State::Started,
    State::Resumed,
];
