//! Appearance state of a single content instance

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Not on screen, no transition in flight
    #[default]
    Hidden,
    /// `begin show` issued, waiting for its end
    Appearing,
    /// Fully on screen
    Visible,
    /// `begin hide` issued, waiting for its end
    Disappearing,
}

impl Appearance {
    /// Check if moving to `target` is a legal lifecycle step
    pub fn can_transition_to(&self, target: Appearance) -> bool {
        match (self, target) {
            // Begin show
            (Appearance::Hidden, Appearance::Appearing) => true,
            // End show
            (Appearance::Appearing, Appearance::Visible) => true,
            // Begin hide
            (Appearance::Visible, Appearance::Disappearing) => true,
            // End hide
            (Appearance::Disappearing, Appearance::Hidden) => true,
            // Reversals while a swipe is cancelled
            (Appearance::Disappearing, Appearance::Appearing) => true,
            (Appearance::Appearing, Appearance::Disappearing) => true,
            // Doubled begins, doubled ends and skipped halves are all rejected
            _ => false,
        }
    }

    /// True while a begin call is waiting for its end
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Appearance::Appearing | Appearance::Disappearing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Hidden => "hidden",
            Appearance::Appearing => "appearing",
            Appearance::Visible => "visible",
            Appearance::Disappearing => "disappearing",
        }
    }
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(Appearance::Hidden.can_transition_to(Appearance::Appearing));
        assert!(Appearance::Appearing.can_transition_to(Appearance::Visible));
        assert!(Appearance::Visible.can_transition_to(Appearance::Disappearing));
        assert!(Appearance::Disappearing.can_transition_to(Appearance::Hidden));
        // Cancelled swipe reversals
        assert!(Appearance::Disappearing.can_transition_to(Appearance::Appearing));
        assert!(Appearance::Appearing.can_transition_to(Appearance::Disappearing));
    }

    #[test]
    fn test_invalid_transitions() {
        // Doubled begins
        assert!(!Appearance::Appearing.can_transition_to(Appearance::Appearing));
        assert!(!Appearance::Disappearing.can_transition_to(Appearance::Disappearing));
        // End without begin
        assert!(!Appearance::Hidden.can_transition_to(Appearance::Visible));
        assert!(!Appearance::Visible.can_transition_to(Appearance::Hidden));
        // Showing what is already shown
        assert!(!Appearance::Visible.can_transition_to(Appearance::Appearing));
        assert!(!Appearance::Hidden.can_transition_to(Appearance::Disappearing));
    }

    #[test]
    fn test_is_transitioning() {
        assert!(Appearance::Appearing.is_transitioning());
        assert!(Appearance::Disappearing.is_transitioning());
        assert!(!Appearance::Visible.is_transitioning());
        assert!(!Appearance::Hidden.is_transitioning());
    }
}
