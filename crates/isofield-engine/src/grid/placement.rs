use crate::coords::{Vec2, Viewport};

use super::GridConfig;

/// How the square grid is fitted to a non-square viewport.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FitMode {
    /// Grid fits entirely inside the viewport; bars appear on the longer axis.
    #[default]
    Letterbox,
    /// Grid covers the entire viewport; the shorter axis crops it.
    Overscan,
}

impl FitMode {
    pub fn toggled(self) -> Self {
        match self {
            FitMode::Letterbox => FitMode::Overscan,
            FitMode::Overscan => FitMode::Letterbox,
        }
    }
}

/// Resolved placement of the square grid inside a viewport.
///
/// The grid occupies the square `[dx, dx+limit] × [dy, dy+limit]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Placement {
    pub limit: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Placement {
    pub fn compute(viewport: Viewport, fit: FitMode) -> Self {
        let limit = match fit {
            FitMode::Overscan => viewport.width.max(viewport.height),
            FitMode::Letterbox => viewport.width.min(viewport.height),
        };
        // Centering offset; negative in overscan mode on the cropped axis.
        Placement {
            limit,
            dx: (viewport.width - limit) * 0.5,
            dy: (viewport.height - limit) * 0.5,
        }
    }

    /// Pixel position of lattice vertex `(i, j)`.
    #[inline]
    pub fn vertex(&self, grid: &GridConfig, i: u32, j: u32) -> Vec2 {
        Vec2::new(
            self.limit * i as f32 / grid.width as f32 + self.dx,
            self.limit * j as f32 / grid.height as f32 + self.dy,
        )
    }
}

/// Positions every lattice vertex inside the viewport, writing into `out`.
///
/// Independent of time; callers should invoke this only when the grid
/// dimensions, viewport size, or fit mode change.
pub fn place(grid: &GridConfig, viewport: Viewport, fit: FitMode, out: &mut Vec<Vec2>) {
    let placement = Placement::compute(viewport, fit);
    out.resize(grid.vertex_count(), Vec2::zero());

    for i in 0..=grid.width {
        for j in 0..=grid.height {
            out[grid.vertex_index(i, j) as usize] = placement.vertex(grid, i, j);
        }
    }
}
