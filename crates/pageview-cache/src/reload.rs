//! Reload modes and their survival predicates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadMode {
    /// Drop every cached page
    #[default]
    All,
    /// Keep only the current page, if it is still in range
    ExceptCurrent,
    /// Keep every page that is still in range
    NoneIfStillValid,
}

impl ReloadMode {
    /// Whether a cached page at `index` is kept by this mode
    pub fn survives(&self, index: usize, current: usize, page_count: usize) -> bool {
        match self {
            ReloadMode::All => false,
            ReloadMode::ExceptCurrent => index == current && index < page_count,
            ReloadMode::NoneIfStillValid => index < page_count,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadMode::All => "all",
            ReloadMode::ExceptCurrent => "except_current",
            ReloadMode::NoneIfStillValid => "none_if_still_valid",
        }
    }
}

impl std::fmt::Display for ReloadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
