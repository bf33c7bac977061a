//! PageView Lifecycle
//!
//! The pager disables any automatic appearance forwarding and drives it itself.
//! Each content instance moves through a small state machine:
//! ```text
//! Hidden --begin show--> Appearing --end--> Visible
//! Visible --begin hide--> Disappearing --end--> Hidden
//! ```
//! plus the two reversals (Appearing <-> Disappearing) a cancelled swipe needs.

mod appearance;
mod content;
mod error;
mod forwarder;

pub use appearance::Appearance;
pub use content::{ManagedContent, PageContent};
pub use error::LifecycleError;
pub use forwarder::LifecycleForwarder;

pub type Result<T> = std::result::Result<T, LifecycleError>;
