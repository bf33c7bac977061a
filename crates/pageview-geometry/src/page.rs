//! Offset/index math for a paging surface
//!
//! `index_of` and `offset_of` are not exact inverses at the last page:
//! `offset_of` clamps so the surface can never scroll past the end.

use crate::types::{Orientation, Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub orientation: Orientation,
    /// Size of one page, equal to the visible bounds of the surface
    pub page_size: Size,
    pub page_count: usize,
}

impl PageGeometry {
    pub fn new(orientation: Orientation, page_size: Size, page_count: usize) -> Self {
        Self {
            orientation,
            page_size,
            page_count,
        }
    }

    /// Page length along the scroll axis
    pub fn page_extent(&self) -> f64 {
        self.orientation.extent(self.page_size)
    }

    /// Total scrollable length along the scroll axis
    pub fn content_extent(&self) -> f64 {
        self.page_count as f64 * self.page_extent()
    }

    pub fn content_size(&self) -> Size {
        let extent = self.content_extent();
        match self.orientation {
            Orientation::Horizontal => Size::new(extent, self.page_size.height),
            Orientation::Vertical => Size::new(self.page_size.width, extent),
        }
    }

    /// `max(0, floor(o / S))`; 0 for a zero-size surface
    pub fn index_of(&self, offset: Point) -> usize {
        let extent = self.page_extent();
        if !(extent > 0.0) {
            return 0;
        }
        let value = (self.orientation.main_axis(offset) / extent).floor();
        if value.is_finite() && value > 0.0 {
            value as usize
        } else {
            0
        }
    }

    /// `clamp(i * S, 0, contentExtent - S)`; 0 for a zero-size surface
    pub fn offset_of(&self, index: usize) -> Point {
        let extent = self.page_extent();
        if !(extent > 0.0) {
            return Point::ZERO;
        }
        let mut value = index as f64 * extent;
        let max = self.content_extent();
        if max > 0.0 && value > max - extent {
            value = max - extent;
        }
        self.orientation.point_on_axis(value.max(0.0))
    }

    /// `i * S` without clamping; used to park a page in a neighbour slot
    pub fn unclamped_offset_of(&self, index: usize) -> Point {
        let extent = self.page_extent().max(0.0);
        self.orientation.point_on_axis(index as f64 * extent)
    }

    /// Slot a page occupies on the surface
    pub fn frame_of(&self, index: usize) -> Rect {
        let origin = self.unclamped_offset_of(index);
        Rect {
            origin,
            size: self.page_size,
        }
    }

    /// Fraction of a page travelled between two offsets. May exceed 1.
    pub fn progress(&self, from: Point, to: Point) -> f64 {
        let extent = self.page_extent();
        if !(extent > 0.0) {
            return 0.0;
        }
        let delta = self.orientation.main_axis(to) - self.orientation.main_axis(from);
        (delta / extent).abs()
    }

    /// Signed travel along the scroll axis
    pub fn delta(&self, from: Point, to: Point) -> f64 {
        self.orientation.main_axis(to) - self.orientation.main_axis(from)
    }

    /// Keep an offset inside `[0, contentExtent - S]`
    pub fn clamp_offset(&self, offset: Point) -> Point {
        let extent = self.page_extent();
        let max = (self.content_extent() - extent).max(0.0);
        let value = self.orientation.main_axis(offset).clamp(0.0, max);
        self.orientation.point_on_axis(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(count: usize) -> PageGeometry {
        PageGeometry::new(Orientation::Horizontal, Size::new(100.0, 200.0), count)
    }

    #[test]
    fn test_index_of() {
        let geometry = horizontal(5);
        assert_eq!(geometry.index_of(Point::new(0.0, 0.0)), 0);
        assert_eq!(geometry.index_of(Point::new(99.9, 0.0)), 0);
        assert_eq!(geometry.index_of(Point::new(100.0, 0.0)), 1);
        assert_eq!(geometry.index_of(Point::new(250.0, 0.0)), 2);
        assert_eq!(geometry.index_of(Point::new(-40.0, 0.0)), 0);
    }

    #[test]
    fn test_offset_of_clamps_to_last_page() {
        let geometry = horizontal(5);
        assert_eq!(geometry.offset_of(0), Point::new(0.0, 0.0));
        assert_eq!(geometry.offset_of(3), Point::new(300.0, 0.0));
        assert_eq!(geometry.offset_of(4), Point::new(400.0, 0.0));
        assert_eq!(geometry.offset_of(9), Point::new(400.0, 0.0));
    }

    #[test]
    fn test_round_trip_inside_range() {
        let geometry = horizontal(11);
        for i in 0..=9 {
            assert_eq!(geometry.index_of(geometry.offset_of(i)), i);
        }
        assert_eq!(geometry.index_of(geometry.offset_of(40)), 10);
    }

    #[test]
    fn test_zero_size_surface() {
        let geometry = PageGeometry::new(Orientation::Horizontal, Size::ZERO, 5);
        assert_eq!(geometry.index_of(Point::new(300.0, 0.0)), 0);
        assert_eq!(geometry.offset_of(3), Point::ZERO);
        assert_eq!(geometry.progress(Point::ZERO, Point::new(50.0, 0.0)), 0.0);
    }

    #[test]
    fn test_vertical_axis() {
        let geometry = PageGeometry::new(Orientation::Vertical, Size::new(100.0, 200.0), 4);
        assert_eq!(geometry.content_size(), Size::new(100.0, 800.0));
        assert_eq!(geometry.offset_of(2), Point::new(0.0, 400.0));
        assert_eq!(geometry.index_of(Point::new(999.0, 450.0)), 2);
        assert_eq!(geometry.frame_of(1), Rect::new(0.0, 200.0, 100.0, 200.0));
    }

    #[test]
    fn test_progress_is_unclamped() {
        let geometry = horizontal(5);
        let from = Point::new(100.0, 0.0);
        assert_eq!(geometry.progress(from, Point::new(150.0, 0.0)), 0.5);
        assert_eq!(geometry.progress(from, Point::new(50.0, 0.0)), 0.5);
        assert_eq!(geometry.progress(from, Point::new(280.0, 0.0)), 1.8);
        assert_eq!(geometry.delta(from, Point::new(50.0, 0.0)), -50.0);
    }

    #[test]
    fn test_clamp_offset() {
        let geometry = horizontal(3);
        assert_eq!(geometry.clamp_offset(Point::new(-5.0, 0.0)), Point::ZERO);
        assert_eq!(geometry.clamp_offset(Point::new(999.0, 0.0)), Point::new(200.0, 0.0));
        assert_eq!(horizontal(0).clamp_offset(Point::new(50.0, 0.0)), Point::ZERO);
    }
}
