//! Page content contract and the tracked wrapper the pager owns

use pageview_geometry::Rect;

use crate::appearance::Appearance;
use crate::error::LifecycleError;
use crate::Result;

/// A unit of pageable content.
///
/// Every hook has a no-op default so hosts only implement what they observe.
/// The pager guarantees begin/end calls arrive in legal pairs and that
/// `did_attach` / `will_detach` are always balanced.
pub trait PageContent {
    fn begin_appearance_transition(&mut self, _appearing: bool, _animated: bool) {}

    fn end_appearance_transition(&mut self) {}

    /// Installed into the scroll surface at `frame`
    fn did_attach(&mut self, _frame: Rect) {}

    /// Moved within the scroll surface
    fn set_frame(&mut self, _frame: Rect) {}

    /// About to be removed from the scroll surface and dropped
    fn will_detach(&mut self) {}
}

/// A content instance owned by the pager, with its appearance state
#[derive(Debug)]
pub struct ManagedContent<C> {
    index: usize,
    content: C,
    appearance: Appearance,
    frame: Rect,
    attached: bool,
}

impl<C: PageContent> ManagedContent<C> {
    pub fn new(index: usize, content: C) -> Self {
        Self {
            index,
            content,
            appearance: Appearance::Hidden,
            frame: Rect::default(),
            attached: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attempt to move to a new appearance state
    pub fn transition_to(&mut self, target: Appearance) -> Result<()> {
        if !self.appearance.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: self.appearance.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(
            index = self.index,
            from = %self.appearance,
            to = %target,
            "Page appearance transition"
        );

        self.appearance = target;
        Ok(())
    }

    /// Install into the surface. A second attach only moves the frame.
    pub fn attach(&mut self, frame: Rect) {
        self.frame = frame;
        if self.attached {
            self.content.set_frame(frame);
            return;
        }
        self.attached = true;
        self.content.did_attach(frame);
    }

    pub fn set_frame(&mut self, frame: Rect) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        self.content.set_frame(frame);
    }

    /// Remove from the surface; safe to call on a detached page
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.content.will_detach();
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        attached: u32,
        detached: u32,
        frames: Vec<Rect>,
    }

    impl PageContent for Probe {
        fn did_attach(&mut self, _frame: Rect) {
            self.attached += 1;
        }

        fn set_frame(&mut self, frame: Rect) {
            self.frames.push(frame);
        }

        fn will_detach(&mut self) {
            self.detached += 1;
        }
    }

    #[test]
    fn test_new_content_is_hidden() {
        let page = ManagedContent::new(2, Probe::default());
        assert_eq!(page.index(), 2);
        assert_eq!(page.appearance(), Appearance::Hidden);
        assert!(!page.is_attached());
    }

    #[test]
    fn test_transition_rejects_doubled_begin() {
        let mut page = ManagedContent::new(0, Probe::default());
        page.transition_to(Appearance::Appearing).unwrap();
        let err = page.transition_to(Appearance::Appearing).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: "appearing".to_string(),
                to: "appearing".to_string(),
            }
        );
        assert_eq!(page.appearance(), Appearance::Appearing);
    }

    #[test]
    fn test_attach_detach_are_paired() {
        let mut page = ManagedContent::new(1, Probe::default());
        let frame = Rect::new(100.0, 0.0, 100.0, 100.0);
        page.attach(frame);
        page.attach(frame);
        assert_eq!(page.content().attached, 1);

        page.set_frame(Rect::new(200.0, 0.0, 100.0, 100.0));
        page.set_frame(Rect::new(200.0, 0.0, 100.0, 100.0));
        assert_eq!(page.content().frames.len(), 2);

        page.detach();
        page.detach();
        assert_eq!(page.content().detached, 1);
        assert!(!page.is_attached());
    }
}
