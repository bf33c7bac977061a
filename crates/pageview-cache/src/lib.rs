//! PageView Page Cache
//!
//! Holds at most one live content instance per page index. The cache is the
//! only owner of a page's attachment to the scroll surface: loading attaches,
//! eviction detaches, always in pairs.

mod cache;
mod reload;
mod source;

pub use cache::PageCache;
pub use reload::ReloadMode;
pub use source::ContentSource;
