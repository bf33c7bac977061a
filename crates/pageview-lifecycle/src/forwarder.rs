//! Lifecycle Forwarder
//!
//! Issues begin/end appearance calls on managed content. A call is only
//! forwarded to the content once the tracked state accepts it, so content
//! never sees a doubled or interleaved sequence.

use crate::appearance::Appearance;
use crate::content::{ManagedContent, PageContent};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleForwarder;

impl LifecycleForwarder {
    pub fn new() -> Self {
        Self
    }

    pub fn begin_show<C: PageContent>(
        &self,
        page: &mut ManagedContent<C>,
        animated: bool,
    ) -> Result<()> {
        page.transition_to(Appearance::Appearing)?;
        page.content_mut().begin_appearance_transition(true, animated);
        Ok(())
    }

    pub fn end_show<C: PageContent>(&self, page: &mut ManagedContent<C>) -> Result<()> {
        page.transition_to(Appearance::Visible)?;
        page.content_mut().end_appearance_transition();
        Ok(())
    }

    pub fn begin_hide<C: PageContent>(
        &self,
        page: &mut ManagedContent<C>,
        animated: bool,
    ) -> Result<()> {
        page.transition_to(Appearance::Disappearing)?;
        page.content_mut().begin_appearance_transition(false, animated);
        Ok(())
    }

    pub fn end_hide<C: PageContent>(&self, page: &mut ManagedContent<C>) -> Result<()> {
        page.transition_to(Appearance::Hidden)?;
        page.content_mut().end_appearance_transition();
        Ok(())
    }

    /// `begin show` immediately followed by `end show`
    pub fn show<C: PageContent>(&self, page: &mut ManagedContent<C>, animated: bool) -> Result<()> {
        self.begin_show(page, animated)?;
        self.end_show(page)
    }

    /// `begin hide` immediately followed by `end hide`
    pub fn hide<C: PageContent>(&self, page: &mut ManagedContent<C>, animated: bool) -> Result<()> {
        self.begin_hide(page, animated)?;
        self.end_hide(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl PageContent for Recorder {
        fn begin_appearance_transition(&mut self, appearing: bool, _animated: bool) {
            let call = if appearing { "begin_show" } else { "begin_hide" };
            self.calls.lock().push(call.to_string());
        }

        fn end_appearance_transition(&mut self) {
            self.calls.lock().push("end".to_string());
        }
    }

    #[test]
    fn test_show_then_hide() {
        let recorder = Recorder::default();
        let mut page = ManagedContent::new(0, recorder.clone());
        let forwarder = LifecycleForwarder::new();

        forwarder.show(&mut page, true).unwrap();
        assert_eq!(page.appearance(), Appearance::Visible);
        forwarder.hide(&mut page, false).unwrap();
        assert_eq!(page.appearance(), Appearance::Hidden);

        assert_eq!(
            *recorder.calls.lock(),
            vec!["begin_show", "end", "begin_hide", "end"]
        );
    }

    #[test]
    fn test_rejected_call_is_not_forwarded() {
        let recorder = Recorder::default();
        let mut page = ManagedContent::new(0, recorder.clone());
        let forwarder = LifecycleForwarder::new();

        forwarder.begin_show(&mut page, true).unwrap();
        assert!(forwarder.begin_show(&mut page, true).is_err());
        assert!(forwarder.end_hide(&mut page).is_err());

        assert_eq!(*recorder.calls.lock(), vec!["begin_show"]);
    }

    #[test]
    fn test_cancelled_swipe_reversal() {
        let recorder = Recorder::default();
        let mut outgoing = ManagedContent::new(0, recorder.clone());
        let forwarder = LifecycleForwarder::new();

        forwarder.show(&mut outgoing, false).unwrap();
        forwarder.begin_hide(&mut outgoing, true).unwrap();
        // The swipe is abandoned: the outgoing page is shown again
        forwarder.show(&mut outgoing, true).unwrap();

        assert_eq!(outgoing.appearance(), Appearance::Visible);
        assert_eq!(
            *recorder.calls.lock(),
            vec!["begin_show", "end", "begin_hide", "begin_show", "end"]
        );
    }
}
