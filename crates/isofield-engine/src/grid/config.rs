/// Upper bound on grid cell counts per axis.
pub const MAX_GRID: u32 = 3000;

/// Bounds on the interactive isoline count (level 0 is the domain border).
pub const MAX_ISOLINES: u32 = 100;

/// Half-range of the field values the isoline levels span: levels are evenly
/// spaced over `[-MAX_VALUE, MAX_VALUE)`.
pub const MAX_VALUE: f32 = 10_000.0;

/// Reserved index signaling "end of polyline" to a strip-drawing renderer.
///
/// Sits at the top of the `u32` range so it can never collide with a vertex
/// or edge-slot index (bounded by `MAX_GRID`), and matches the fixed
/// primitive-restart value wgpu applies to `Uint32` strip topologies.
pub const RESTART_INDEX: u32 = u32::MAX;

/// Rectangular sampling domain in field coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DomainBounds {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self {
            x0: -100.0,
            x1: 100.0,
            y0: -100.0,
            y1: 100.0,
        }
    }
}

/// Grid dimensions and sampling domain, passed explicitly into every
/// component entry point. There is no ambient configuration state.
///
/// `width`/`height` count cells; the vertex lattice is `(width+1)×(height+1)`
/// with vertex `(i, j)` flattened as `i·(height+1) + j` (column-major).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub domain: DomainBounds,
}

impl GridConfig {
    pub fn new(width: u32, height: u32, domain: DomainBounds) -> Self {
        Self {
            width: width.clamp(1, MAX_GRID),
            height: height.clamp(1, MAX_GRID),
            domain,
        }
    }

    /// Number of lattice vertices, `(width+1)·(height+1)`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        (self.width as usize + 1) * (self.height as usize + 1)
    }

    /// Flattened index of lattice vertex `(i, j)`, `i ∈ [0, width]`,
    /// `j ∈ [0, height]`.
    #[inline]
    pub fn vertex_index(&self, i: u32, j: u32) -> u32 {
        debug_assert!(i <= self.width && j <= self.height);
        i * (self.height + 1) + j
    }

    /// Domain coordinates of lattice vertex `(i, j)`.
    #[inline]
    pub fn domain_point(&self, i: u32, j: u32) -> (f32, f32) {
        let d = &self.domain;
        let x = d.x0 + (d.x1 - d.x0) * i as f32 / self.width as f32;
        let y = d.y0 + (d.y1 - d.y0) * j as f32 / self.height as f32;
        (x, y)
    }

    /// Iso value for `level` out of `count` levels, evenly spanning
    /// `[-MAX_VALUE, MAX_VALUE)`. Level 0 maps to `-MAX_VALUE` but is never
    /// extracted from samples; it is the domain border polyline.
    #[inline]
    pub fn iso_value(level: u32, count: u32) -> f32 {
        MAX_VALUE * 2.0 * level as f32 / count as f32 - MAX_VALUE
    }
}
