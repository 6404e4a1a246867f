mod border;
mod extract;
mod slots;

pub use border::border_polyline;
pub use extract::{crossing_point, extract};
pub use slots::EdgeSlots;

use crate::coords::Vec2;

/// Indexed line geometry for a single isoline level.
///
/// `positions` is a slot array with one entry per unique grid edge (welded
/// between adjacent triangles); `indices` is a restart-separated line strip
/// over those slots. Contents are rewritten from scratch every frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IsolineGeometry {
    pub positions: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl IsolineGeometry {
    pub fn new() -> Self {
        Self::default()
    }
}
