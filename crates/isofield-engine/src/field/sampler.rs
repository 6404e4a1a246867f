use crate::grid::GridConfig;

use super::ScalarField;

/// Evaluates a scalar field over the grid's vertex lattice.
///
/// Owns the sample array; the contour extractor reads it. The full array is
/// rewritten every frame since the field is time-varying, and resized
/// whenever the grid dimensions change.
#[derive(Debug, Default)]
pub struct FieldSampler {
    values: Vec<f32>,
}

impl FieldSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples `field` at every lattice vertex for time `t`.
    ///
    /// Output length is always `(width+1)·(height+1)`; no error conditions.
    pub fn sample(&mut self, field: &dyn ScalarField, grid: &GridConfig, t: f32) {
        self.values.resize(grid.vertex_count(), 0.0);

        for i in 0..=grid.width {
            for j in 0..=grid.height {
                let (x, y) = grid.domain_point(i, j);
                self.values[grid.vertex_index(i, j) as usize] = field.eval(x, y, t);
            }
        }
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DomainBounds;

    fn grid(w: u32, h: u32) -> GridConfig {
        GridConfig::new(w, h, DomainBounds::default())
    }

    #[test]
    fn output_length_matches_lattice() {
        let mut s = FieldSampler::new();
        for (w, h) in [(1, 1), (2, 5), (10, 10), (3, 1)] {
            s.sample(&|_x, _y, _t| 0.0, &grid(w, h), 0.0);
            assert_eq!(s.values().len(), ((w + 1) * (h + 1)) as usize, "W={w} H={h}");
        }
    }

    #[test]
    fn samples_domain_coordinates() {
        let mut s = FieldSampler::new();
        let g = GridConfig::new(
            2,
            2,
            DomainBounds {
                x0: -1.0,
                x1: 1.0,
                y0: -1.0,
                y1: 1.0,
            },
        );
        s.sample(&|x, y, _t| x * x + y * y, &g, 0.0);

        // Corners at distance² = 2, edge midpoints at 1, center at 0.
        assert_eq!(s.values()[g.vertex_index(0, 0) as usize], 2.0);
        assert_eq!(s.values()[g.vertex_index(1, 0) as usize], 1.0);
        assert_eq!(s.values()[g.vertex_index(1, 1) as usize], 0.0);
        assert_eq!(s.values()[g.vertex_index(2, 2) as usize], 2.0);
    }

    #[test]
    fn resizes_between_calls() {
        let mut s = FieldSampler::new();
        s.sample(&|_x, _y, _t| 1.0, &grid(5, 5), 0.0);
        assert_eq!(s.values().len(), 36);
        s.sample(&|_x, _y, _t| 1.0, &grid(2, 2), 0.0);
        assert_eq!(s.values().len(), 9);
    }

    #[test]
    fn passes_time_through() {
        let mut s = FieldSampler::new();
        s.sample(&|_x, _y, t| t, &grid(1, 1), 7.5);
        assert!(s.values().iter().all(|&v| v == 7.5));
    }
}
