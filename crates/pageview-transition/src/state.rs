//! Transition bookkeeping

use pageview_geometry::Point;
use serde::{Deserialize, Serialize};

/// A begin has been issued for `from -> to` without its matching end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTransition {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub current_index: usize,
    /// Index a transition is heading toward; `None` when idle
    pub potential_index: Option<usize>,
    pub last_committed_offset: Point,
    pub last_committed_index: usize,
    pub open: Option<OpenTransition>,
}

impl TransitionState {
    pub fn new(current_index: usize) -> Self {
        Self {
            current_index,
            potential_index: None,
            last_committed_offset: Point::ZERO,
            last_committed_index: current_index,
            open: None,
        }
    }

    pub fn has_open_transition(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.open.is_none() && self.potential_index.is_none()
    }

    /// Page indices that are mid-lifecycle and must not be destroyed
    pub fn pinned(&self) -> Vec<usize> {
        match self.open {
            Some(open) => vec![open.from, open.to],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward higher indices
    Forward,
    Backward,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Option<Direction> {
        if delta > 0.0 {
            Some(Direction::Forward)
        } else if delta < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// Neighbour of `index` in this direction, if it exists
    pub fn step(&self, index: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1),
            Direction::Backward => index.checked_sub(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionOutcome {
    Completed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = TransitionState::new(4);
        assert!(state.is_idle());
        assert!(!state.has_open_transition());
        assert_eq!(state.last_committed_index, 4);
        assert!(state.pinned().is_empty());
    }

    #[test]
    fn test_open_transition_pins_both_pages() {
        let mut state = TransitionState::new(1);
        state.potential_index = Some(2);
        state.open = Some(OpenTransition { from: 1, to: 2 });
        assert!(state.has_open_transition());
        assert_eq!(state.pinned(), vec![1, 2]);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_delta(3.5), Some(Direction::Forward));
        assert_eq!(Direction::from_delta(-0.1), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(0.0), None);
        assert_eq!(Direction::Forward.step(2), Some(3));
        assert_eq!(Direction::Backward.step(0), None);
    }
}
