//! Tab bar controller
//!
//! A pager composed with a tab bar. The bar follows the pager through an
//! observer; taps on the bar are routed back into the pager as offset
//! requests.

use std::sync::Arc;

use parking_lot::Mutex;

use pageview_cache::{ContentSource, ReloadMode};
use pageview_geometry::{Point, Rect, Size};
use pageview_lifecycle::PageContent;
use pageview_transition::TransitionObserver;

use crate::config::Config;
use crate::controller::PageViewController;

/// Selection bar that tracks the pager. Drawing is left to the implementation.
pub trait TabBar {
    fn reload(&mut self, _titles: &[String], _selected: usize) {}

    fn select(&mut self, _index: usize, _animated: bool) {}

    fn update_progress(&mut self, _from: usize, _to: usize, _percent: f64) {}

    fn content_offset_changed(&mut self, _offset: Point, _page_extent: f64) {}

    fn set_frame(&mut self, _frame: Rect) {}
}

/// Items for a tab bar controller: one title and one page per item
pub trait TabBarSource {
    type Content: PageContent;

    fn item_count(&self) -> usize;

    fn title_at(&self, index: usize) -> String;

    fn content_at(&self, index: usize) -> Self::Content;

    fn default_selected_index(&self) -> Option<usize> {
        None
    }

    /// Defaults to a full-width strip of `tab_bar_height` at the top
    fn tab_bar_frame(&self, _bounds: Size) -> Option<Rect> {
        None
    }

    /// Defaults to everything below the tab bar
    fn container_frame(&self, _bounds: Size) -> Option<Rect> {
        None
    }
}

/// Presents a tab bar source as the pager's content source
struct TabPages<S>(Arc<S>);

impl<S: TabBarSource> ContentSource for TabPages<S> {
    type Content = S::Content;

    fn page_count(&self) -> usize {
        self.0.item_count()
    }

    fn content_at(&self, index: usize) -> S::Content {
        self.0.content_at(index)
    }

    fn default_index(&self) -> Option<usize> {
        self.0.default_selected_index()
    }
}

/// Keeps the bar in step with the pager
struct TabBarSync<T> {
    tab_bar: Arc<Mutex<T>>,
    selected: Mutex<usize>,
}

impl<T: TabBar> TransitionObserver for TabBarSync<T> {
    fn dragging(&self, from: usize, to: usize, percent: f64) {
        self.tab_bar.lock().update_progress(from, to, percent);
    }

    fn did_select(&self, index: usize) {
        *self.selected.lock() = index;
        self.tab_bar.lock().select(index, true);
    }

    fn content_offset_changed(&self, offset: Point, page_extent: f64) {
        self.tab_bar.lock().content_offset_changed(offset, page_extent);
    }
}

pub struct PageTabBarController<S, T>
where
    S: TabBarSource + 'static,
    T: TabBar + 'static,
{
    source: Arc<S>,
    tab_bar: Arc<Mutex<T>>,
    sync: Arc<TabBarSync<T>>,
    pager: PageViewController<S::Content>,
    container_frame: Rect,
}

impl<S, T> PageTabBarController<S, T>
where
    S: TabBarSource + 'static,
    T: TabBar + 'static,
{
    pub fn new(source: Arc<S>, tab_bar: Arc<Mutex<T>>, config: Config) -> Self {
        let pages: Arc<dyn ContentSource<Content = S::Content>> =
            Arc::new(TabPages(Arc::clone(&source)));
        let mut pager = PageViewController::with_config(config, pages);

        let sync = Arc::new(TabBarSync {
            tab_bar: Arc::clone(&tab_bar),
            selected: Mutex::new(pager.current_index()),
        });
        pager.add_observer(sync.clone());

        Self {
            source,
            tab_bar,
            sync,
            pager,
            container_frame: Rect::default(),
        }
    }

    pub fn pager(&self) -> &PageViewController<S::Content> {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut PageViewController<S::Content> {
        &mut self.pager
    }

    pub fn tab_bar(&self) -> &Arc<Mutex<T>> {
        &self.tab_bar
    }

    pub fn selected_index(&self) -> usize {
        *self.sync.selected.lock()
    }

    /// Frame the pager was last laid out in, relative to the controller
    pub fn container_frame(&self) -> Rect {
        self.container_frame
    }

    pub fn add_observer(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.pager.add_observer(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn TransitionObserver>) {
        self.pager.remove_observer(observer);
    }

    pub fn view_did_load(&mut self) {
        self.pager.view_did_load();
        self.reload_tab_bar();
    }

    /// Split `bounds` between the tab bar and the pager
    pub fn layout(&mut self, bounds: Size) {
        let bar_height = self.pager.config().tab_bar_height.min(bounds.height);

        let tab_bar_frame = self
            .source
            .tab_bar_frame(bounds)
            .unwrap_or_else(|| Rect::new(0.0, 0.0, bounds.width, bar_height));
        let container_frame = self.source.container_frame(bounds).unwrap_or_else(|| {
            Rect::new(0.0, bar_height, bounds.width, bounds.height - bar_height)
        });

        self.tab_bar.lock().set_frame(tab_bar_frame);
        self.container_frame = container_frame;
        self.pager.layout(container_frame.size);
    }

    /// Tap on a tab bar item
    pub fn select_item(&mut self, index: usize, animated: bool) {
        if index >= self.source.item_count() {
            return;
        }
        tracing::debug!(index, animated, "Tab bar item selected");

        if self.pager.geometry().page_extent() > 0.0 {
            let offset = self.pager.offset_for_index(index);
            self.pager.set_content_offset(offset, animated);
        } else {
            self.pager.set_index(index, animated);
        }

        if !self.pager.is_loaded() {
            *self.sync.selected.lock() = self.pager.current_index();
        }
    }

    pub fn reload_data(&mut self, mode: ReloadMode) {
        self.pager.reload_data(mode);
        self.reload_tab_bar();
    }

    fn reload_tab_bar(&mut self) {
        let titles: Vec<String> = (0..self.source.item_count())
            .map(|index| self.source.title_at(index))
            .collect();
        let selected = self.pager.current_index();
        *self.sync.selected.lock() = selected;

        tracing::debug!(items = titles.len(), selected, "Reloaded tab bar");
        self.tab_bar.lock().reload(&titles, selected);
    }
}
