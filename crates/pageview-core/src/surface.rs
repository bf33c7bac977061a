//! Scroll surface model
//!
//! The numbers a platform scroll view would hold: bounds, content size,
//! offset, gesture flags and the one programmatic animation in flight.

use std::time::Duration;

use pageview_geometry::{Point, Size};

#[derive(Debug, Clone, Default)]
pub struct ScrollSurface {
    pub(crate) size: Size,
    pub(crate) content_size: Size,
    pub(crate) offset: Point,
    pub(crate) tracking: bool,
    pub(crate) decelerating: bool,
    pub(crate) animation: Option<ScrollAnimation>,
    /// Size at the last layout pass that repositioned pages
    pub(crate) laid_out_size: Option<Size>,
}

impl ScrollSurface {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Finger is down
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn is_decelerating(&self) -> bool {
        self.decelerating
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    /// The user, not the pager, is moving the offset
    pub(crate) fn is_user_driven(&self) -> bool {
        self.tracking || self.decelerating
    }
}

/// A page parked in a neighbour slot for the length of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Relocation {
    pub index: usize,
}

/// Animated offset change driven by `advance_animation`
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: Point,
    to: Point,
    duration: Duration,
    elapsed: Duration,
    pub(crate) target: usize,
    pub(crate) relocation: Option<Relocation>,
}

impl ScrollAnimation {
    pub(crate) fn new(
        from: Point,
        to: Point,
        duration: Duration,
        target: usize,
        relocation: Option<Relocation>,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            target,
            relocation,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn destination(&self) -> Point {
        self.to
    }

    /// Linear time fraction in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Offset at the current time, ease-in-out
    pub fn offset(&self) -> Point {
        let t = self.progress();
        let eased = t * t * (3.0 - 2.0 * t);
        Point::new(
            self.from.x + (self.to.x - self.from.x) * eased,
            self.from.y + (self.to.y - self.from.y) * eased,
        )
    }
}
