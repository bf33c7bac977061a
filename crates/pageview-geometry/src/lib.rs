//! PageView Geometry
//!
//! Maps scroll offsets to page indices and back, per orientation.
//! Every function here is pure; the scroll surface owns the actual numbers.

mod page;
mod types;

pub use page::PageGeometry;
pub use types::{Orientation, Point, Rect, Size};
