//! Content source collaborator

use pageview_lifecycle::PageContent;

/// Supplies pages to the pager.
///
/// Implementations are shared with the host, which may change `page_count`
/// between reads (e.g. a deferred "load more"). Failures are expected to be
/// reported as placeholder content, never as a panic.
pub trait ContentSource {
    type Content: PageContent;

    fn page_count(&self) -> usize;

    fn content_at(&self, index: usize) -> Self::Content;

    /// Page to show first; clamped into range by the pager
    fn default_index(&self) -> Option<usize> {
        None
    }
}
