//! PageView Core
//!
//! The paging container and the tab bar controller built on it.
//! Hosts feed layout, appearance and scroll signals in; pages and observers
//! get lifecycle calls and transition events out.

mod config;
mod controller;
mod error;
mod surface;
mod tab_bar;

pub use config::Config;
pub use controller::PageViewController;
pub use error::CoreError;
pub use surface::{ScrollAnimation, ScrollSurface};
pub use tab_bar::{PageTabBarController, TabBar, TabBarSource};

// Re-export the building blocks
pub use pageview_cache::{ContentSource, PageCache, ReloadMode};
pub use pageview_geometry::{Orientation, PageGeometry, Point, Rect, Size};
pub use pageview_lifecycle::{Appearance, LifecycleError, ManagedContent, PageContent};
pub use pageview_transition::{
    Direction, ObserverSet, OpenTransition, TransitionObserver, TransitionOutcome,
    TransitionState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
