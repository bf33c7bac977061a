//! Transition Machine
//!
//! Owns the page cache and the transition bookkeeping. The scroll surface
//! lives with the container; every call here receives the geometry and the
//! offsets it needs.

use std::sync::Arc;

use pageview_cache::{ContentSource, PageCache, ReloadMode};
use pageview_geometry::{PageGeometry, Point};
use pageview_lifecycle::{LifecycleForwarder, PageContent};

use crate::observer::{ObserverSet, TransitionObserver};
use crate::state::{Direction, OpenTransition, TransitionOutcome, TransitionState};

pub struct TransitionMachine<C: PageContent + 'static> {
    source: Arc<dyn ContentSource<Content = C>>,
    cache: PageCache<C>,
    forwarder: LifecycleForwarder,
    observers: ObserverSet,
    state: TransitionState,
}

impl<C: PageContent + 'static> TransitionMachine<C> {
    /// Starts at the source's default index, clamped into range
    pub fn new(source: Arc<dyn ContentSource<Content = C>>) -> Self {
        let page_count = source.page_count();
        let current = source
            .default_index()
            .map(|index| clamp_index(index, page_count))
            .unwrap_or(0);

        Self {
            source,
            cache: PageCache::new(),
            forwarder: LifecycleForwarder::new(),
            observers: ObserverSet::new(),
            state: TransitionState::new(current),
        }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource<Content = C>> {
        &self.source
    }

    pub fn page_count(&self) -> usize {
        self.source.page_count()
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn cache(&self) -> &PageCache<C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PageCache<C> {
        &mut self.cache
    }

    pub fn observers(&self) -> &ObserverSet {
        &self.observers
    }

    pub fn add_observer(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.observers.add(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn TransitionObserver>) {
        self.observers.remove(observer);
    }

    pub fn content(&self, index: usize) -> Option<&C> {
        self.cache.get(index).map(|page| page.content())
    }

    pub fn current_content(&self) -> Option<&C> {
        self.content(self.state.current_index)
    }

    /// Move to `index` without any lifecycle, for use before the first load.
    ///
    /// Ignored when out of range or while a transition is open.
    pub fn set_initial_index(&mut self, index: usize) -> bool {
        if index >= self.page_count() || !self.state.is_idle() {
            return false;
        }
        self.state.current_index = index;
        self.state.last_committed_index = index;
        true
    }

    /// Make sure the current page is cached and attached.
    ///
    /// A page created here gets a full show pair when `forward_appearance`
    /// is set; a page that was already cached is left alone.
    pub fn load_current(&mut self, geometry: &PageGeometry, forward_appearance: bool) -> bool {
        let index = self.state.current_index;
        let was_cached = self.cache.contains(index);
        let forwarder = self.forwarder;
        let source = Arc::clone(&self.source);

        let Some(page) = self.cache.load(index, source.as_ref(), geometry) else {
            return false;
        };
        if forward_appearance && !was_cached {
            log_rejected(forwarder.show(page, true), index, "show");
        }
        true
    }

    /// Re-base drag deltas on `offset` after a layout pass.
    ///
    /// An open transition is left untouched; it is settled by its own commit.
    pub fn sync(&mut self, offset: Point, geometry: &PageGeometry) {
        if self.state.has_open_transition() {
            return;
        }
        self.state.potential_index = None;
        self.state.last_committed_offset = offset;
        self.state.last_committed_index = self.state.current_index;

        let settled = self.settled_index(offset, geometry);
        if settled != self.state.current_index {
            self.jump_to(settled, geometry);
            self.state.last_committed_index = self.state.current_index;
        }
    }

    /// Programmatic index change. Returns false when the request is ignored.
    ///
    /// Out-of-range targets and the current index are rejected. A still-open
    /// transition is committed as cancelled before the new one begins; the
    /// caller is responsible for having moved the surface back first.
    pub fn request_index(&mut self, target: usize, animated: bool, geometry: &PageGeometry) -> bool {
        if target >= self.page_count() || target == self.state.current_index {
            return false;
        }
        if self.state.has_open_transition() {
            self.close_open(TransitionOutcome::Cancelled);
        }

        self.state.potential_index = Some(target);
        if !self.begin(target, animated, geometry) {
            self.state.potential_index = None;
            return false;
        }
        true
    }

    /// Every scroll position change while dragging or decelerating
    pub fn drag_update(&mut self, offset: Point, geometry: &PageGeometry) {
        let current = self.state.current_index;
        let delta = geometry.delta(self.state.last_committed_offset, offset);

        if let Some(direction) = Direction::from_delta(delta) {
            let page_count = self.page_count();
            let target = direction.step(current).filter(|&index| index < page_count);

            if self.state.potential_index != target {
                // Direction reversed: the stale transition is closed first
                if let Some(open) = self.state.open {
                    if Some(open.to) != target {
                        self.close_open(TransitionOutcome::Cancelled);
                    }
                }
                self.state.potential_index = target;
                if let Some(target) = target {
                    self.begin(target, true, geometry);
                }
            }
        }

        let percent = geometry.progress(self.state.last_committed_offset, offset);
        let to = self.state.potential_index.unwrap_or(current);
        self.observers.dragging(current, to, percent);
    }

    /// Settle on the page under `offset` and close the open transition.
    ///
    /// Returns the outcome, or `None` when no transition was open.
    pub fn commit(&mut self, offset: Point, geometry: &PageGeometry) -> Option<TransitionOutcome> {
        let settled = self.settled_index(offset, geometry);
        self.state.last_committed_offset = offset;
        self.commit_index(settled, geometry)
    }

    /// Settle on `settled` directly, for callers that know where the surface
    /// will rest when there is no page extent to derive it from.
    pub fn commit_index(
        &mut self,
        settled: usize,
        geometry: &PageGeometry,
    ) -> Option<TransitionOutcome> {
        let previous = self.state.current_index;
        let settled = clamp_index(settled, self.page_count());

        let outcome = match self.state.open {
            Some(open) if settled == open.to => {
                self.state.current_index = settled;
                self.close_open(TransitionOutcome::Completed);
                Some(TransitionOutcome::Completed)
            }
            Some(_) => {
                self.close_open(TransitionOutcome::Cancelled);
                Some(TransitionOutcome::Cancelled)
            }
            None => None,
        };
        self.state.potential_index = None;

        // Landed somewhere neither end of the transition pointed at
        if self.state.current_index != settled {
            self.jump_to(settled, geometry);
        }
        self.state.last_committed_index = self.state.current_index;

        tracing::debug!(
            from = previous,
            current = self.state.current_index,
            outcome = ?outcome,
            "Committed transition"
        );

        outcome
    }

    /// Evict per `mode`, then keep `current_index` inside the new range.
    ///
    /// An open transition whose pages both survive `mode` stays open and its
    /// pages are kept; any other open transition is cancelled before anything
    /// is evicted. The caller re-adds the current page with `load_current`.
    pub fn reload(&mut self, mode: ReloadMode) -> Vec<usize> {
        let page_count = self.page_count();
        let current = self.state.current_index;

        if let Some(open) = self.state.open {
            let keep = mode.survives(open.from, current, page_count)
                && mode.survives(open.to, current, page_count);
            if !keep {
                self.close_open(TransitionOutcome::Cancelled);
            }
        }
        if !self.state.has_open_transition() {
            self.state.potential_index = None;
        }

        let pinned = self.state.pinned();
        let evicted = self.cache.evict(mode, current, page_count, &pinned);

        let clamped = clamp_index(current, page_count);
        if clamped != current {
            tracing::info!(
                from = current,
                to = clamped,
                page_count,
                "Current index out of range after reload, clamped"
            );
            self.state.current_index = clamped;
            self.state.last_committed_index = clamped;
        }

        tracing::info!(mode = %mode, page_count, evicted = evicted.len(), "Reloaded pages");
        evicted
    }

    /// Low-memory eviction: keep the current page only.
    ///
    /// With `pin_open` the pages of an open transition are kept as well;
    /// otherwise that transition is cancelled first.
    pub fn trim_memory(&mut self, pin_open: bool) -> Vec<usize> {
        if !pin_open && self.state.has_open_transition() {
            self.close_open(TransitionOutcome::Cancelled);
        }
        let pinned = self.state.pinned();
        let page_count = self.page_count();
        let evicted = self
            .cache
            .evict(ReloadMode::ExceptCurrent, self.state.current_index, page_count, &pinned);

        tracing::info!(
            current = self.state.current_index,
            evicted = evicted.len(),
            "Trimmed page cache"
        );
        evicted
    }

    pub fn current_will_appear(&mut self, animated: bool) {
        let index = self.state.current_index;
        if let Some(page) = self.cache.get_mut(index) {
            log_rejected(self.forwarder.begin_show(page, animated), index, "begin_show");
        }
    }

    pub fn current_did_appear(&mut self) {
        let index = self.state.current_index;
        if let Some(page) = self.cache.get_mut(index) {
            log_rejected(self.forwarder.end_show(page), index, "end_show");
        }
    }

    pub fn current_will_disappear(&mut self, animated: bool) {
        let index = self.state.current_index;
        if let Some(page) = self.cache.get_mut(index) {
            log_rejected(self.forwarder.begin_hide(page, animated), index, "begin_hide");
        }
    }

    pub fn current_did_disappear(&mut self) {
        let index = self.state.current_index;
        if let Some(page) = self.cache.get_mut(index) {
            log_rejected(self.forwarder.end_hide(page), index, "end_hide");
        }
    }

    /// Open `current -> target`: hide begins on the outgoing page, show
    /// begins on the incoming one.
    fn begin(&mut self, target: usize, animated: bool, geometry: &PageGeometry) -> bool {
        let from = self.state.current_index;
        if from == target {
            return false;
        }
        if self.state.has_open_transition() {
            self.close_open(TransitionOutcome::Cancelled);
        }

        let source = Arc::clone(&self.source);
        if self.cache.load(target, source.as_ref(), geometry).is_none() {
            return false;
        }
        if let Some(page) = self.cache.load(from, source.as_ref(), geometry) {
            log_rejected(self.forwarder.begin_hide(page, animated), from, "begin_hide");
        }
        if let Some(page) = self.cache.get_mut(target) {
            log_rejected(self.forwarder.begin_show(page, animated), target, "begin_show");
        }

        self.state.open = Some(OpenTransition { from, to: target });
        tracing::debug!(from, to = target, animated, "Began transition");
        self.observers.will_transition(from, target);
        true
    }

    /// Issue the end half of the open transition, exactly once
    fn close_open(&mut self, outcome: TransitionOutcome) {
        let Some(open) = self.state.open.take() else {
            return;
        };
        self.state.potential_index = None;

        match outcome {
            TransitionOutcome::Completed => {
                if let Some(page) = self.cache.get_mut(open.from) {
                    log_rejected(self.forwarder.end_hide(page), open.from, "end_hide");
                }
                if let Some(page) = self.cache.get_mut(open.to) {
                    log_rejected(self.forwarder.end_show(page), open.to, "end_show");
                }
                self.observers.did_finish_transition(open.from, open.to);
                self.observers.did_select(self.state.current_index);
            }
            TransitionOutcome::Cancelled => {
                if let Some(page) = self.cache.get_mut(open.from) {
                    log_rejected(self.forwarder.show(page, true), open.from, "show");
                }
                if let Some(page) = self.cache.get_mut(open.to) {
                    log_rejected(self.forwarder.hide(page, true), open.to, "hide");
                }
                self.observers.did_cancel_transition(open.from, open.to);
            }
        }
    }

    /// Immediate completed transition to `target`, used when the surface
    /// settles on a page no open transition was heading for
    fn jump_to(&mut self, target: usize, geometry: &PageGeometry) {
        if target == self.state.current_index {
            return;
        }
        self.state.potential_index = Some(target);
        if self.begin(target, false, geometry) {
            self.state.current_index = target;
            self.close_open(TransitionOutcome::Completed);
        } else {
            self.state.potential_index = None;
            self.state.current_index = target;
        }
    }

    fn settled_index(&self, offset: Point, geometry: &PageGeometry) -> usize {
        if !(geometry.page_extent() > 0.0) {
            return self.state.current_index;
        }
        clamp_index(geometry.index_of(offset), self.page_count())
    }
}

/// Clamp into `[0, page_count)`, or 0 for an empty source
fn clamp_index(index: usize, page_count: usize) -> usize {
    if page_count == 0 {
        0
    } else {
        index.min(page_count - 1)
    }
}

fn log_rejected(result: pageview_lifecycle::Result<()>, index: usize, call: &'static str) {
    if let Err(e) = result {
        tracing::warn!(index, call, error = %e, "Rejected lifecycle call");
    }
}
