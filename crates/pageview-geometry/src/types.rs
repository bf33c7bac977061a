//! Geometry value types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or NaN
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self { origin, ..self }
    }
}

/// Scroll axis of a pager, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `point` along the scroll axis
    pub fn main_axis(&self, point: Point) -> f64 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Length of `size` along the scroll axis
    pub fn extent(&self, size: Size) -> f64 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// A point that sits `value` along the scroll axis and 0 on the cross axis
    pub fn point_on_axis(&self, value: f64) -> Point {
        match self {
            Orientation::Horizontal => Point::new(value, 0.0),
            Orientation::Vertical => Point::new(0.0, value),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_helpers() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Orientation::Horizontal.main_axis(p), 3.0);
        assert_eq!(Orientation::Vertical.main_axis(p), 7.0);

        let s = Size::new(320.0, 480.0);
        assert_eq!(Orientation::Horizontal.extent(s), 320.0);
        assert_eq!(Orientation::Vertical.extent(s), 480.0);

        assert_eq!(Orientation::Vertical.point_on_axis(9.0), Point::new(0.0, 9.0));
    }

    #[test]
    fn test_empty_size() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }
}
