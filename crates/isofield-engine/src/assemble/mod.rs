//! Per-frame upload view handed to the renderer.
//!
//! The engine owns all geometry arrays; `FrameUpload` borrows them for the
//! duration of one frame and carries the dirty signals the renderer needs to
//! decide what to re-upload. Byte views via `bytemuck::cast_slice` match the
//! renderer's ingest layout exactly.

use crate::contour::IsolineGeometry;
use crate::coords::Vec2;

/// Borrowed view of one frame's renderer-ready geometry.
///
/// Grid values and every isoline's geometry are dirty every frame (the field
/// is time-varying); the flags below cover the slower-moving pieces.
#[derive(Debug)]
pub struct FrameUpload<'a> {
    /// Pixel position per lattice vertex.
    pub grid_positions: &'a [Vec2],
    /// Sampled field value per lattice vertex.
    pub grid_values: &'a [f32],
    /// Restart-separated triangle-strip indices over the lattice.
    pub grid_indices: &'a [u32],
    /// One geometry per isoline level; level 0 is the domain border.
    pub isolines: &'a [IsolineGeometry],

    /// Grid positions changed (dimension, viewport, or fit-mode change).
    pub positions_dirty: bool,
    /// Grid index topology changed (dimension change).
    pub topology_dirty: bool,
    /// The number of isoline levels changed; per-level renderer buffers need
    /// to be added or dropped.
    pub isoline_count_changed: bool,
}

impl FrameUpload<'_> {
    #[inline]
    pub fn grid_position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.grid_positions)
    }

    #[inline]
    pub fn grid_value_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.grid_values)
    }

    #[inline]
    pub fn grid_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.grid_indices)
    }
}

impl IsolineGeometry {
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_views_match_element_layout() {
        let positions = vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let values = vec![0.5f32];
        let indices = vec![0u32, 1, u32::MAX];
        let upload = FrameUpload {
            grid_positions: &positions,
            grid_values: &values,
            grid_indices: &indices,
            isolines: &[],
            positions_dirty: false,
            topology_dirty: false,
            isoline_count_changed: false,
        };

        assert_eq!(upload.grid_position_bytes().len(), 2 * 8);
        assert_eq!(upload.grid_value_bytes().len(), 4);
        assert_eq!(upload.grid_index_bytes().len(), 3 * 4);
        // Little-endian spot check on the sentinel.
        assert_eq!(&upload.grid_index_bytes()[8..], &[0xff; 4]);
    }

    #[test]
    fn isoline_byte_views() {
        let geo = IsolineGeometry {
            positions: vec![Vec2::new(0.0, 0.0); 3],
            indices: vec![0, 1, 2, 0],
        };
        assert_eq!(geo.position_bytes().len(), 3 * 8);
        assert_eq!(geo.index_bytes().len(), 4 * 4);
    }
}
