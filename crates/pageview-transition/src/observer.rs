//! Transition observers

use std::sync::Arc;

use pageview_geometry::Point;

/// Receives transition events. Every method defaults to a no-op.
pub trait TransitionObserver {
    fn will_transition(&self, _from: usize, _to: usize) {}

    fn did_finish_transition(&self, _from: usize, _to: usize) {}

    fn did_cancel_transition(&self, _from: usize, _to: usize) {}

    /// Drag progress; `percent` is not clamped and may exceed 1 on a flick
    fn dragging(&self, _from: usize, _to: usize, _percent: f64) {}

    fn did_select(&self, _index: usize) {}

    /// Raw offset feed for indicators that track the surface directly
    fn content_offset_changed(&self, _offset: Point, _page_extent: f64) {}
}

/// Fan-out list of observers, notified in registration order
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: Arc<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    /// Remove a previously added observer by identity
    pub fn remove(&mut self, observer: &Arc<dyn TransitionObserver>) {
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl TransitionObserver for ObserverSet {
    fn will_transition(&self, from: usize, to: usize) {
        for observer in &self.observers {
            observer.will_transition(from, to);
        }
    }

    fn did_finish_transition(&self, from: usize, to: usize) {
        for observer in &self.observers {
            observer.did_finish_transition(from, to);
        }
    }

    fn did_cancel_transition(&self, from: usize, to: usize) {
        for observer in &self.observers {
            observer.did_cancel_transition(from, to);
        }
    }

    fn dragging(&self, from: usize, to: usize, percent: f64) {
        for observer in &self.observers {
            observer.dragging(from, to, percent);
        }
    }

    fn did_select(&self, index: usize) {
        for observer in &self.observers {
            observer.did_select(index);
        }
    }

    fn content_offset_changed(&self, offset: Point, page_extent: f64) {
        for observer in &self.observers {
            observer.content_offset_changed(offset, page_extent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Selections(Mutex<Vec<usize>>);

    impl TransitionObserver for Selections {
        fn did_select(&self, index: usize) {
            self.0.lock().push(index);
        }
    }

    #[test]
    fn test_fan_out_and_remove() {
        let first = Arc::new(Selections::default());
        let second = Arc::new(Selections::default());
        let second_dyn: Arc<dyn TransitionObserver> = second.clone();

        let mut set = ObserverSet::new();
        set.add(first.clone());
        set.add(second_dyn.clone());
        set.did_select(3);
        // Unimplemented hooks are no-ops
        set.will_transition(0, 1);

        set.remove(&second_dyn);
        assert_eq!(set.len(), 1);
        set.did_select(4);

        assert_eq!(*first.0.lock(), vec![3, 4]);
        assert_eq!(*second.0.lock(), vec![3]);
    }
}
