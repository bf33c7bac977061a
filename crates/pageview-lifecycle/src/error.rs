//! Lifecycle error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Invalid appearance transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
