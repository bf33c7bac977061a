//! Paging container
//!
//! Owns the scroll surface and forwards raw host signals into the transition
//! machine. All calls are expected on one thread, in host event order.

use std::sync::Arc;
use std::time::Duration;

use pageview_cache::{ContentSource, ReloadMode};
use pageview_geometry::{Orientation, PageGeometry, Point, Size};
use pageview_lifecycle::PageContent;
use pageview_transition::{TransitionMachine, TransitionObserver, TransitionState};

use crate::config::Config;
use crate::surface::{Relocation, ScrollAnimation, ScrollSurface};

pub struct PageViewController<C: PageContent + 'static> {
    config: Config,
    machine: TransitionMachine<C>,
    surface: ScrollSurface,
    /// Host view exists; before this only the index is recorded
    loaded: bool,
}

impl<C: PageContent + 'static> PageViewController<C> {
    pub fn new(orientation: Orientation, source: Arc<dyn ContentSource<Content = C>>) -> Self {
        Self::with_config(Config::new(orientation), source)
    }

    pub fn with_config(config: Config, source: Arc<dyn ContentSource<Content = C>>) -> Self {
        let machine = TransitionMachine::new(source);

        tracing::debug!(
            orientation = %config.orientation,
            page_count = machine.page_count(),
            current = machine.current_index(),
            "Created page view controller"
        );

        Self {
            config,
            machine,
            surface: ScrollSurface::default(),
            loaded: false,
        }
    }

    // === Read-only state ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn current_index(&self) -> usize {
        self.machine.current_index()
    }

    /// Content of the current page, if it is cached
    pub fn current_content(&self) -> Option<&C> {
        self.machine.current_content()
    }

    pub fn content(&self, index: usize) -> Option<&C> {
        self.machine.content(index)
    }

    pub fn page_count(&self) -> usize {
        self.machine.page_count()
    }

    pub fn content_offset(&self) -> Point {
        self.surface.offset
    }

    pub fn surface(&self) -> &ScrollSurface {
        &self.surface
    }

    pub fn cached_indices(&self) -> Vec<usize> {
        self.machine.cache().indices()
    }

    pub fn transition_state(&self) -> &TransitionState {
        self.machine.state()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_animating(&self) -> bool {
        self.surface.is_animating()
    }

    pub fn is_dragging(&self) -> bool {
        self.surface.tracking
    }

    /// Resting offset of a page on the current surface
    pub fn offset_for_index(&self, index: usize) -> Point {
        self.geometry().offset_of(index)
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(
            self.config.orientation,
            self.surface.size,
            self.machine.page_count(),
        )
    }

    pub fn add_observer(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.machine.add_observer(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn TransitionObserver>) {
        self.machine.remove_observer(observer);
    }

    // === Host signals ===

    pub fn view_did_load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.reload_pages(false);
    }

    /// Layout pass with the surface's new bounds
    pub fn layout(&mut self, size: Size) {
        self.surface.size = size;
        if self.loaded {
            self.relayout();
        }
    }

    pub fn view_will_appear(&mut self, animated: bool) {
        self.machine.current_will_appear(animated);
    }

    pub fn view_did_appear(&mut self) {
        self.machine.current_did_appear();
    }

    pub fn view_will_disappear(&mut self, animated: bool) {
        self.machine.current_will_disappear(animated);
    }

    pub fn view_did_disappear(&mut self) {
        self.machine.current_did_disappear();
    }

    /// Drop every cached page except the visible one
    pub fn did_receive_memory_warning(&mut self) {
        let had_open = self.machine.state().has_open_transition();
        self.machine.trim_memory(self.config.pin_transition_pages);
        self.abort_animation_if_closed(had_open);
    }

    // === Public operations ===

    /// Move to `index`. Out-of-range indices and the current index are ignored.
    pub fn set_index(&mut self, index: usize, animated: bool) {
        if !self.loaded {
            self.machine.set_initial_index(index);
            return;
        }
        if index >= self.page_count() || index == self.current_index() {
            return;
        }

        self.interrupt();
        let geometry = self.geometry();
        let from = self.current_index();
        if !self.machine.request_index(index, animated, &geometry) {
            return;
        }

        if animated {
            self.start_animation(from, index, &geometry);
        } else {
            let offset = geometry.offset_of(index);
            self.set_offset(offset, &geometry);
            self.settle_on(index, &geometry);
        }
    }

    /// Programmatic offset change, routed through the page it lands on
    pub fn set_content_offset(&mut self, offset: Point, animated: bool) {
        let index = self.geometry().index_of(offset);
        self.set_index(index, animated);
    }

    pub fn reload_data(&mut self, mode: ReloadMode) {
        let had_open = self.machine.state().has_open_transition();
        self.machine.reload(mode);
        self.abort_animation_if_closed(had_open);
        self.reload_pages(true);
    }

    // === Scroll signals ===

    pub fn begin_dragging(&mut self) {
        self.cancel_animation();
        self.surface.tracking = true;
        self.surface.decelerating = false;
    }

    /// Offset moved by the user (while tracking or decelerating)
    pub fn scroll_to(&mut self, offset: Point) {
        let geometry = self.geometry();
        let offset = geometry.clamp_offset(offset);
        self.set_offset(offset, &geometry);

        if self.surface.is_user_driven() {
            self.machine.drag_update(offset, &geometry);
        }
    }

    pub fn end_dragging(&mut self, will_decelerate: bool) {
        self.surface.tracking = false;
        self.surface.decelerating = will_decelerate;
        if !will_decelerate && !self.machine.state().is_idle() {
            let geometry = self.geometry();
            self.settle(&geometry);
        }
    }

    pub fn end_decelerating(&mut self) {
        self.surface.decelerating = false;
        if !self.machine.state().is_idle() {
            let geometry = self.geometry();
            self.settle(&geometry);
        }
    }

    /// Step the programmatic animation. Returns true while it is still running.
    pub fn advance_animation(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.surface.animation.as_mut() else {
            return false;
        };
        animation.advance(dt);
        let offset = animation.offset();
        let finished = animation.is_finished();

        let geometry = self.geometry();
        self.set_offset(offset, &geometry);
        if finished {
            self.finish_animation();
        }
        !finished
    }

    /// Jump the programmatic animation to its end and commit it
    pub fn finish_animation(&mut self) {
        let Some(animation) = self.surface.animation.take() else {
            return;
        };
        self.restore_relocation(&animation);

        let geometry = self.geometry();
        self.set_offset(animation.destination(), &geometry);
        self.settle_on(animation.target, &geometry);
    }

    // === Internals ===

    fn reload_pages(&mut self, forward_appearance: bool) {
        if !self.loaded {
            return;
        }
        self.relayout();
        let geometry = self.geometry();
        self.machine.load_current(&geometry, forward_appearance);
    }

    fn relayout(&mut self) {
        let geometry = self.geometry();
        self.surface.content_size = geometry.content_size();

        // Leave the offset alone while the user or an animation owns it
        if !self.surface.is_user_driven() && !self.surface.is_animating() {
            let offset = geometry.offset_of(self.current_index());
            self.set_offset(offset, &geometry);
        }

        if self.surface.laid_out_size != Some(self.surface.size) {
            self.surface.laid_out_size = Some(self.surface.size);
            self.machine.cache_mut().relayout(&geometry);
            // A parked page stays parked across the resize
            if let Some(animation) = &self.surface.animation {
                if let Some(relocation) = animation.relocation {
                    let nearest = nearest_neighbour(relocation.index, animation.target);
                    self.machine
                        .cache_mut()
                        .set_frame(relocation.index, geometry.frame_of(nearest));
                }
            }
        }

        if !self.surface.is_user_driven() && !self.surface.is_animating() {
            self.machine.sync(self.surface.offset, &geometry);
        }
    }

    /// Park the outgoing page next to the target so a long jump slides like
    /// a single-page swipe, then animate onto the target
    fn start_animation(&mut self, from: usize, to: usize, geometry: &PageGeometry) {
        let nearest = nearest_neighbour(from, to);

        let relocation = if nearest != from && self.machine.cache().contains(from) {
            self.machine
                .cache_mut()
                .set_frame(from, geometry.frame_of(nearest));
            Some(Relocation { index: from })
        } else {
            None
        };
        self.machine.cache_mut().bring_to_front(from);

        let start = geometry.offset_of(nearest);
        self.set_offset(start, geometry);
        self.surface.animation = Some(ScrollAnimation::new(
            start,
            geometry.offset_of(to),
            self.config.animation_duration(),
            to,
            relocation,
        ));

        tracing::debug!(from, to, nearest, "Started page animation");

        if self
            .surface
            .animation
            .as_ref()
            .is_some_and(|animation| animation.is_finished())
        {
            self.finish_animation();
        }
    }

    /// Close whatever a new request would otherwise abandon
    fn interrupt(&mut self) {
        self.cancel_animation();

        if self.surface.is_user_driven() {
            self.surface.tracking = false;
            self.surface.decelerating = false;
            if self.machine.state().has_open_transition() {
                let geometry = self.geometry();
                let origin = geometry.offset_of(self.current_index());
                self.set_offset(origin, &geometry);
                self.settle(&geometry);
            }
        }
    }

    /// Stop an in-flight animation and return to the page it started from;
    /// the open transition commits as cancelled
    fn cancel_animation(&mut self) {
        let Some(animation) = self.surface.animation.take() else {
            return;
        };
        self.restore_relocation(&animation);

        let geometry = self.geometry();
        let origin = geometry.offset_of(self.current_index());
        self.set_offset(origin, &geometry);
        self.settle(&geometry);

        tracing::debug!(to = animation.target, "Interrupted page animation");
    }

    /// The machine dropped the open transition under a running animation
    fn abort_animation_if_closed(&mut self, had_open: bool) {
        if !had_open || self.machine.state().has_open_transition() {
            return;
        }
        if let Some(animation) = self.surface.animation.take() {
            self.restore_relocation(&animation);
            let geometry = self.geometry();
            let origin = geometry.offset_of(self.current_index());
            self.set_offset(origin, &geometry);
            self.machine.sync(origin, &geometry);
        }
    }

    /// Put a parked page back in its own slot
    fn restore_relocation(&mut self, animation: &ScrollAnimation) {
        if let Some(relocation) = animation.relocation {
            let frame = self.geometry().frame_of(relocation.index);
            self.machine.cache_mut().set_frame(relocation.index, frame);
        }
    }

    /// Commit at the current offset, then rest the surface on a page boundary
    fn settle(&mut self, geometry: &PageGeometry) {
        self.machine.commit(self.surface.offset, geometry);

        let resting = geometry.offset_of(self.current_index());
        if resting != self.surface.offset {
            self.set_offset(resting, geometry);
        }
        self.machine.sync(resting, geometry);
    }

    /// Settle a programmatic request on `index`. Without a page extent the
    /// offset cannot say where the surface rests, so the target is committed
    /// and the first sized layout places it.
    fn settle_on(&mut self, index: usize, geometry: &PageGeometry) {
        if geometry.page_extent() > 0.0 {
            self.settle(geometry);
            return;
        }
        self.machine.commit_index(index, geometry);
        self.machine.sync(self.surface.offset, geometry);
    }

    fn set_offset(&mut self, offset: Point, geometry: &PageGeometry) {
        self.surface.offset = offset;
        self.machine
            .observers()
            .content_offset_changed(offset, geometry.page_extent());
    }
}

/// Slot adjacent to `to` on the side facing `from`
fn nearest_neighbour(from: usize, to: usize) -> usize {
    if from > to {
        to + 1
    } else {
        to.saturating_sub(1)
    }
}
