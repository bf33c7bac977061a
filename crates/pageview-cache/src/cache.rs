//! Page Cache
//!
//! In-memory map from page index to the live content instance for it.

use std::collections::HashMap;

use pageview_geometry::{PageGeometry, Rect};
use pageview_lifecycle::{ManagedContent, PageContent};

use crate::reload::ReloadMode;
use crate::source::ContentSource;

pub struct PageCache<C> {
    /// Live pages, keyed by index
    pages: HashMap<usize, ManagedContent<C>>,
    /// Back-to-front drawing order of attached pages
    stacking: Vec<usize>,
}

impl<C: PageContent> PageCache<C> {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            stacking: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pages.contains_key(&index)
    }

    /// Cached indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.pages.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn get(&self, index: usize) -> Option<&ManagedContent<C>> {
        self.pages.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ManagedContent<C>> {
        self.pages.get_mut(&index)
    }

    /// Return the cached page at `index`, creating and attaching it on a miss.
    ///
    /// Out-of-range indices (per the source's current count) yield `None`.
    pub fn load(
        &mut self,
        index: usize,
        source: &dyn ContentSource<Content = C>,
        geometry: &PageGeometry,
    ) -> Option<&mut ManagedContent<C>> {
        if index >= source.page_count() {
            return None;
        }

        if !self.pages.contains_key(&index) {
            let mut page = ManagedContent::new(index, source.content_at(index));
            page.attach(geometry.frame_of(index));
            self.pages.insert(index, page);
            self.stacking.push(index);

            tracing::debug!(index, cached = self.pages.len(), "Loaded page content");
        }

        self.pages.get_mut(&index)
    }

    /// Drop every page the reload mode does not keep, except `pinned` ones.
    ///
    /// Returns the evicted indices in ascending order.
    pub fn evict(
        &mut self,
        mode: ReloadMode,
        current: usize,
        page_count: usize,
        pinned: &[usize],
    ) -> Vec<usize> {
        let mut evicted: Vec<usize> = self
            .pages
            .keys()
            .copied()
            .filter(|&index| !mode.survives(index, current, page_count))
            .filter(|index| !pinned.contains(index))
            .collect();
        evicted.sort_unstable();

        for index in &evicted {
            if let Some(mut page) = self.pages.remove(index) {
                page.detach();
            }
        }
        self.stacking.retain(|index| self.pages.contains_key(index));

        if !evicted.is_empty() {
            tracing::debug!(
                mode = %mode,
                current,
                page_count,
                evicted = ?evicted,
                "Evicted cached pages"
            );
        }

        evicted
    }

    /// Move every cached page back to its slot after a surface resize
    pub fn relayout(&mut self, geometry: &PageGeometry) {
        for (index, page) in self.pages.iter_mut() {
            page.set_frame(geometry.frame_of(*index));
        }
    }

    pub fn set_frame(&mut self, index: usize, frame: Rect) {
        if let Some(page) = self.pages.get_mut(&index) {
            page.set_frame(frame);
        }
    }

    pub fn bring_to_front(&mut self, index: usize) {
        if !self.pages.contains_key(&index) {
            return;
        }
        self.stacking.retain(|&i| i != index);
        self.stacking.push(index);
    }

    /// Topmost attached page
    pub fn front(&self) -> Option<usize> {
        self.stacking.last().copied()
    }
}

impl<C: PageContent> Default for PageCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageview_geometry::{Orientation, Size};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Page {
        serial: usize,
        detached: Arc<Mutex<Vec<usize>>>,
        index: usize,
    }

    impl PageContent for Page {
        fn will_detach(&mut self) {
            self.detached.lock().push(self.index);
        }
    }

    struct Source {
        count: AtomicUsize,
        created: AtomicUsize,
        detached: Arc<Mutex<Vec<usize>>>,
    }

    impl Source {
        fn new(count: usize) -> Self {
            Self {
                count: AtomicUsize::new(count),
                created: AtomicUsize::new(0),
                detached: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ContentSource for Source {
        type Content = Page;

        fn page_count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }

        fn content_at(&self, index: usize) -> Page {
            Page {
                serial: self.created.fetch_add(1, Ordering::SeqCst),
                detached: Arc::clone(&self.detached),
                index,
            }
        }
    }

    fn geometry(count: usize) -> PageGeometry {
        PageGeometry::new(Orientation::Horizontal, Size::new(100.0, 50.0), count)
    }

    #[test]
    fn test_load_caches_one_instance_per_index() {
        let source = Source::new(5);
        let mut cache = PageCache::new();

        let first = cache.load(2, &source, &geometry(5)).unwrap().content().serial;
        let second = cache.load(2, &source, &geometry(5)).unwrap().content().serial;
        assert_eq!(first, second);
        assert_eq!(source.created.load(Ordering::SeqCst), 1);

        let page = cache.get(2).unwrap();
        assert!(page.is_attached());
        assert_eq!(page.frame(), Rect::new(200.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_load_out_of_range() {
        let source = Source::new(3);
        let mut cache = PageCache::new();
        assert!(cache.load(3, &source, &geometry(3)).is_none());
        assert!(cache.is_empty());
        assert_eq!(source.created.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_evict_except_current_detaches_others() {
        let source = Source::new(5);
        let mut cache = PageCache::new();
        for i in 0..5 {
            cache.load(i, &source, &geometry(5));
        }

        let evicted = cache.evict(ReloadMode::ExceptCurrent, 3, 5, &[]);
        assert_eq!(evicted, vec![0, 1, 2, 4]);
        assert_eq!(cache.indices(), vec![3]);

        let mut detached = source.detached.lock().clone();
        detached.sort_unstable();
        assert_eq!(detached, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_evict_none_if_still_valid_after_shrink() {
        let source = Source::new(5);
        let mut cache = PageCache::new();
        for i in 0..5 {
            cache.load(i, &source, &geometry(5));
        }

        source.count.store(3, Ordering::SeqCst);
        let evicted = cache.evict(ReloadMode::NoneIfStillValid, 1, 3, &[]);
        assert_eq!(evicted, vec![3, 4]);
        assert_eq!(cache.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_evict_respects_pins() {
        let source = Source::new(5);
        let mut cache = PageCache::new();
        for i in 0..3 {
            cache.load(i, &source, &geometry(5));
        }

        cache.evict(ReloadMode::ExceptCurrent, 1, 5, &[2]);
        assert_eq!(cache.indices(), vec![1, 2]);
    }

    #[test]
    fn test_relayout_and_stacking() {
        let source = Source::new(4);
        let mut cache = PageCache::new();
        cache.load(0, &source, &geometry(4));
        cache.load(1, &source, &geometry(4));
        assert_eq!(cache.front(), Some(1));

        cache.bring_to_front(0);
        assert_eq!(cache.front(), Some(0));
        cache.bring_to_front(3);
        assert_eq!(cache.front(), Some(0));

        let wider = PageGeometry::new(Orientation::Horizontal, Size::new(300.0, 50.0), 4);
        cache.relayout(&wider);
        assert_eq!(cache.get(1).unwrap().frame(), Rect::new(300.0, 0.0, 300.0, 50.0));

        cache.evict(ReloadMode::All, 0, 4, &[]);
        assert_eq!(cache.front(), None);
    }
}
