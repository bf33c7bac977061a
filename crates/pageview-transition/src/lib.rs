//! PageView Transition State Machine
//!
//! Reconciles drag updates, programmatic index requests and reloads into one
//! notion of "current page".
//! ```text
//! Idle --begin--> Pending --commit--> Idle (completed | cancelled)
//! ```
//! Only one transition is open at a time. Opening a new one while another is
//! open always commits the old one as cancelled first.

mod machine;
mod observer;
mod state;

pub use machine::TransitionMachine;
pub use observer::{ObserverSet, TransitionObserver};
pub use state::{Direction, OpenTransition, TransitionOutcome, TransitionState};
