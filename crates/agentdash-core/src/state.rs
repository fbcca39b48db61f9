//! Current activity state with repeat suppression.

use serde::Serialize;

use crate::types::StateId;

/// Everything the renderer needs to draw the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateDisplay {
    pub id: StateId,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<StateId> for StateDisplay {
    fn from(id: StateId) -> Self {
        Self {
            id,
            label: id.label(),
            color: id.color(),
        }
    }
}

/// Holds exactly one current state once the first candidate is applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StateTracker {
    current: Option<StateId>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `candidate` (unknown → sleeping) and make it current.
    ///
    /// Returns `None` when the resolved state is already current, so repeated
    /// identical polls never cause a redraw.
    pub fn set_state(&mut self, candidate: &str) -> Option<StateDisplay> {
        let id = StateId::resolve(candidate);
        if self.current == Some(id) {
            return None;
        }
        self.current = Some(id);
        Some(StateDisplay::from(id))
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn display(&self) -> Option<StateDisplay> {
        self.current.map(StateDisplay::from)
    }
}
