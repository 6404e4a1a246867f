use crate::assemble::FrameUpload;
use crate::contour::{self, IsolineGeometry};
use crate::coords::{Vec2, Viewport};
use crate::error::ContourError;
use crate::field::{FieldSampler, ScalarField};
use crate::grid::{self, DomainBounds, GridConfig, Placement};
use crate::quality::{Command, QualityController};

/// Facade driving the whole pipeline once per frame.
///
/// Owns the field, the quality controller, and every geometry array. A tick
/// runs: controller-flag sync → field sampling → vertex placement (only if
/// invalidated) → grid topology (only after dimension changes) → border
/// polyline (level 0, only after placement changes) → contour extraction for
/// every remaining level. The returned `FrameUpload` borrows the arrays until
/// the renderer has consumed them.
pub struct ContourEngine {
    field: Box<dyn ScalarField>,
    quality: QualityController,
    domain: DomainBounds,
    grid: GridConfig,
    viewport: Viewport,
    sim_time: f32,

    sampler: FieldSampler,
    positions: Vec<Vec2>,
    mesh_indices: Vec<u32>,
    isolines: Vec<IsolineGeometry>,

    positions_dirty: bool,
    topology_dirty: bool,
    isoline_count_dirty: bool,
}

impl ContourEngine {
    pub fn new(
        field: Box<dyn ScalarField>,
        domain: DomainBounds,
        quality: QualityController,
    ) -> Self {
        let grid = GridConfig::new(quality.width(), quality.height(), domain);
        Self {
            field,
            quality,
            domain,
            grid,
            viewport: Viewport::default(),
            sim_time: 0.0,
            sampler: FieldSampler::new(),
            positions: Vec::new(),
            mesh_indices: Vec::new(),
            isolines: Vec::new(),
            // Everything is built on the first tick.
            positions_dirty: true,
            topology_dirty: true,
            isoline_count_dirty: true,
        }
    }

    #[inline]
    pub fn quality(&self) -> &QualityController {
        &self.quality
    }

    #[inline]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Forwards an interactive command to the quality controller.
    pub fn apply(&mut self, cmd: Command, dt: f32) {
        self.quality.apply(cmd, dt);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.positions_dirty = true;
        }
    }

    /// Advances simulation time by `dt` and rebuilds the frame's geometry.
    pub fn tick(&mut self, dt: f32) -> Result<FrameUpload<'_>, ContourError> {
        self.sim_time += dt;

        if self.quality.take_dims_changed() {
            self.grid = GridConfig::new(self.quality.width(), self.quality.height(), self.domain);
            self.topology_dirty = true;
            self.positions_dirty = true;
            log::debug!("grid resized to {}x{}", self.grid.width, self.grid.height);
        }
        if self.quality.take_fit_changed() {
            self.positions_dirty = true;
        }
        if self.quality.take_isolines_changed() {
            self.isoline_count_dirty = true;
        }

        self.sampler.sample(self.field.as_ref(), &self.grid, self.sim_time);

        if self.positions_dirty {
            grid::place(
                &self.grid,
                self.viewport,
                self.quality.fit_mode(),
                &mut self.positions,
            );
        }
        if self.topology_dirty {
            grid::strip_indices(&self.grid, &mut self.mesh_indices);
        }

        let count = self.quality.isolines() as usize;
        if self.isolines.len() != count {
            self.isolines.resize_with(count, IsolineGeometry::new);
        }

        // Level 0 depends only on placement, never on samples or count.
        if self.positions_dirty {
            let placement = Placement::compute(self.viewport, self.quality.fit_mode());
            contour::border_polyline(&placement, &mut self.isolines[0]);
        }

        let values = self.sampler.values();
        let grid = &self.grid;
        let positions = &self.positions;
        for (level, geometry) in self.isolines.iter_mut().enumerate().skip(1) {
            let iso = GridConfig::iso_value(level as u32, count as u32);
            contour::extract(values, positions, grid, iso, geometry)?;
        }

        let positions_dirty = std::mem::take(&mut self.positions_dirty);
        let topology_dirty = std::mem::take(&mut self.topology_dirty);
        let isoline_count_changed = std::mem::take(&mut self.isoline_count_dirty);

        Ok(FrameUpload {
            grid_positions: &self.positions,
            grid_values: self.sampler.values(),
            grid_indices: &self.mesh_indices,
            isolines: &self.isolines,
            positions_dirty,
            topology_dirty,
            isoline_count_changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FitMode;

    fn engine(w: u32, h: u32, isolines: u32) -> ContourEngine {
        let mut e = ContourEngine::new(
            Box::new(|x: f32, y: f32, _t: f32| x * x + y * y),
            DomainBounds::default(),
            QualityController::new(w, h, isolines, FitMode::Letterbox),
        );
        e.set_viewport(Viewport::new(200.0, 100.0));
        e
    }

    // ── first frame ───────────────────────────────────────────────────────

    #[test]
    fn first_tick_builds_everything() {
        let mut e = engine(4, 3, 3);
        let upload = e.tick(0.0).unwrap();

        assert_eq!(upload.grid_positions.len(), 5 * 4);
        assert_eq!(upload.grid_values.len(), 5 * 4);
        assert_eq!(upload.grid_indices.len(), 4 * (2 * 4 + 1));
        assert_eq!(upload.isolines.len(), 3);
        assert_eq!(upload.isolines[0].positions.len(), 8);
        assert!(upload.positions_dirty);
        assert!(upload.topology_dirty);
        assert!(upload.isoline_count_changed);
    }

    #[test]
    fn steady_state_is_clean() {
        let mut e = engine(4, 3, 3);
        e.tick(0.0).unwrap();
        let upload = e.tick(0.016).unwrap();
        assert!(!upload.positions_dirty);
        assert!(!upload.topology_dirty);
        assert!(!upload.isoline_count_changed);
    }

    // ── invalidation ──────────────────────────────────────────────────────

    #[test]
    fn dimension_change_rebuilds_grid_arrays() {
        let mut e = engine(4, 4, 2);
        e.tick(0.0).unwrap();

        e.apply(Command::SetResolution(10), 1.0);
        let upload = e.tick(0.016).unwrap();
        assert!(upload.positions_dirty);
        assert!(upload.topology_dirty);
        assert_eq!(upload.grid_positions.len(), 11 * 11);
        assert_eq!(upload.grid_indices.len(), 10 * (2 * 11 + 1));
    }

    #[test]
    fn viewport_change_moves_positions_only() {
        let mut e = engine(4, 4, 2);
        e.tick(0.0).unwrap();

        e.set_viewport(Viewport::new(100.0, 100.0));
        let upload = e.tick(0.016).unwrap();
        assert!(upload.positions_dirty);
        assert!(!upload.topology_dirty);
    }

    #[test]
    fn fit_toggle_moves_positions_only() {
        let mut e = engine(4, 4, 2);
        e.tick(0.0).unwrap();

        e.apply(Command::ToggleFitMode, 0.016);
        let upload = e.tick(0.016).unwrap();
        assert!(upload.positions_dirty);
        assert!(!upload.topology_dirty);
    }

    // ── border stability ──────────────────────────────────────────────────

    #[test]
    fn border_survives_isoline_count_changes_byte_identical() {
        let mut e = engine(2, 2, 3);
        e.tick(0.0).unwrap();
        let before = e.isolines[0].clone();

        while e.quality().isolines() < 30 {
            e.apply(Command::IncreaseIsolines, 1.0);
        }
        let upload = e.tick(0.016).unwrap();
        assert!(upload.isoline_count_changed);
        assert_eq!(upload.isolines.len(), 30);
        assert_eq!(upload.isolines[0].position_bytes(), before.position_bytes());
        assert_eq!(upload.isolines[0].index_bytes(), before.index_bytes());
    }

    // ── time flow ─────────────────────────────────────────────────────────

    #[test]
    fn simulation_time_accumulates() {
        let mut e = ContourEngine::new(
            Box::new(|_x: f32, _y: f32, t: f32| t),
            DomainBounds::default(),
            QualityController::new(1, 1, 2, FitMode::Letterbox),
        );
        e.set_viewport(Viewport::new(100.0, 100.0));
        e.tick(0.5).unwrap();
        let upload = e.tick(0.25).unwrap();
        assert!(upload.grid_values.iter().all(|&v| (v - 0.75).abs() < 1e-6));
    }
}
