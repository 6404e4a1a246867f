use crate::grid::{FitMode, MAX_GRID, MAX_ISOLINES};

/// Seconds between accepted resolution changes while a key is held.
const COOLDOWN: f32 = 0.01;

/// Discrete intents from the interactive layer, applied once per frame with
/// that frame's delta time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    IncreaseWidth,
    DecreaseWidth,
    IncreaseHeight,
    DecreaseHeight,
    /// Set both dimensions to a preset.
    SetResolution(u32),
    IncreaseIsolines,
    DecreaseIsolines,
    ToggleFitMode,
}

/// Owns the interactively adjustable parameters: grid dimensions, isoline
/// count, and fit mode.
///
/// Dimension and isoline setters share a single cool-down countdown so a held
/// key changes resolution at a fixed cadence instead of every frame: while
/// the countdown is positive a call only decrements it (floored at zero) and
/// has no other effect; an accepted call clamps, applies, and re-arms it.
/// `toggle_fit_mode` is edge-triggered and bypasses the countdown.
#[derive(Debug)]
pub struct QualityController {
    width: u32,
    height: u32,
    isolines: u32,
    fit_mode: FitMode,
    cooldown: f32,
    dims_changed: bool,
    isolines_changed: bool,
    fit_changed: bool,
}

impl Default for QualityController {
    fn default() -> Self {
        Self::new(100, 100, 10, FitMode::Letterbox)
    }
}

impl QualityController {
    pub fn new(width: u32, height: u32, isolines: u32, fit_mode: FitMode) -> Self {
        Self {
            width: width.clamp(1, MAX_GRID),
            height: height.clamp(1, MAX_GRID),
            isolines: isolines.clamp(2, MAX_ISOLINES),
            fit_mode,
            cooldown: 0.0,
            dims_changed: false,
            isolines_changed: false,
            fit_changed: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn isolines(&self) -> u32 {
        self.isolines
    }

    #[inline]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Runs the countdown; returns whether this call may apply a change.
    fn pass_cooldown(&mut self, dt: f32) -> bool {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
            return false;
        }
        self.cooldown = COOLDOWN;
        true
    }

    pub fn set_width(&mut self, requested: u32, dt: f32) {
        if !self.pass_cooldown(dt) {
            return;
        }
        let clamped = requested.clamp(1, MAX_GRID);
        if clamped != self.width {
            self.width = clamped;
            self.dims_changed = true;
        }
    }

    pub fn set_height(&mut self, requested: u32, dt: f32) {
        if !self.pass_cooldown(dt) {
            return;
        }
        let clamped = requested.clamp(1, MAX_GRID);
        if clamped != self.height {
            self.height = clamped;
            self.dims_changed = true;
        }
    }

    /// Sets both dimensions under one countdown check.
    pub fn set_resolution(&mut self, requested: u32, dt: f32) {
        if !self.pass_cooldown(dt) {
            return;
        }
        let clamped = requested.clamp(1, MAX_GRID);
        if clamped != self.width || clamped != self.height {
            self.width = clamped;
            self.height = clamped;
            self.dims_changed = true;
        }
    }

    pub fn set_isolines(&mut self, requested: u32, dt: f32) {
        if !self.pass_cooldown(dt) {
            return;
        }
        let clamped = requested.clamp(2, MAX_ISOLINES);
        if clamped != self.isolines {
            self.isolines = clamped;
            self.isolines_changed = true;
        }
    }

    /// Not debounced; callers send this once per key press.
    pub fn toggle_fit_mode(&mut self) {
        self.fit_mode = self.fit_mode.toggled();
        self.fit_changed = true;
    }

    pub fn apply(&mut self, cmd: Command, dt: f32) {
        match cmd {
            Command::IncreaseWidth => self.set_width(self.width + 1, dt),
            Command::DecreaseWidth => self.set_width(self.width.saturating_sub(1), dt),
            Command::IncreaseHeight => self.set_height(self.height + 1, dt),
            Command::DecreaseHeight => self.set_height(self.height.saturating_sub(1), dt),
            Command::SetResolution(n) => self.set_resolution(n, dt),
            Command::IncreaseIsolines => self.set_isolines(self.isolines + 1, dt),
            Command::DecreaseIsolines => self.set_isolines(self.isolines.saturating_sub(1), dt),
            Command::ToggleFitMode => self.toggle_fit_mode(),
        }
    }

    /// True once after any accepted dimension change.
    pub fn take_dims_changed(&mut self) -> bool {
        std::mem::take(&mut self.dims_changed)
    }

    /// True once after any accepted isoline-count change.
    pub fn take_isolines_changed(&mut self) -> bool {
        std::mem::take(&mut self.isolines_changed)
    }

    /// True once after a fit-mode toggle.
    pub fn take_fit_changed(&mut self) -> bool {
        std::mem::take(&mut self.fit_changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> QualityController {
        QualityController::new(10, 10, 5, FitMode::Letterbox)
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn construction_clamps() {
        let q = QualityController::new(0, MAX_GRID + 5, 1, FitMode::Letterbox);
        assert_eq!(q.width(), 1);
        assert_eq!(q.height(), MAX_GRID);
        assert_eq!(q.isolines(), 2);
    }

    #[test]
    fn setters_clamp_at_bounds() {
        let mut q = QualityController::new(1, 1, 2, FitMode::Letterbox);
        q.apply(Command::DecreaseWidth, 1.0);
        assert_eq!(q.width(), 1);
        // First call drains the re-armed countdown; the second one lands.
        q.apply(Command::DecreaseIsolines, 1.0);
        q.apply(Command::DecreaseIsolines, 1.0);
        assert_eq!(q.isolines(), 2);
        assert!(!q.take_dims_changed());
        assert!(!q.take_isolines_changed());
    }

    // ── debounce cadence ──────────────────────────────────────────────────

    #[test]
    fn held_key_changes_at_cooldown_cadence() {
        let mut q = controller();

        // First call lands immediately; subsequent calls at dt = 0.004 must
        // wait until 0.01 s has drained before the next one lands.
        q.apply(Command::IncreaseWidth, 0.004);
        assert_eq!(q.width(), 11);
        q.apply(Command::IncreaseWidth, 0.004); // countdown 0.010 → 0.006
        q.apply(Command::IncreaseWidth, 0.004); // 0.006 → 0.002
        q.apply(Command::IncreaseWidth, 0.004); // 0.002 → 0.000
        assert_eq!(q.width(), 11);
        q.apply(Command::IncreaseWidth, 0.004);
        assert_eq!(q.width(), 12);
    }

    #[test]
    fn rejected_call_still_drains_countdown() {
        let mut q = controller();
        q.apply(Command::IncreaseHeight, 0.0);
        assert_eq!(q.height(), 11);
        // A large dt on a rejected call floors the countdown at zero.
        q.apply(Command::IncreaseHeight, 1.0);
        assert_eq!(q.height(), 11);
        q.apply(Command::IncreaseHeight, 0.0);
        assert_eq!(q.height(), 12);
    }

    #[test]
    fn dimensions_and_isolines_share_one_countdown() {
        let mut q = controller();
        q.apply(Command::IncreaseWidth, 0.0);
        q.apply(Command::IncreaseIsolines, 0.001);
        assert_eq!(q.isolines(), 5);
    }

    // ── presets ───────────────────────────────────────────────────────────

    #[test]
    fn preset_sets_both_dimensions_at_once() {
        let mut q = controller();
        q.apply(Command::SetResolution(500), 0.0);
        assert_eq!(q.width(), 500);
        assert_eq!(q.height(), 500);
        assert!(q.take_dims_changed());
    }

    // ── change flags ──────────────────────────────────────────────────────

    #[test]
    fn flags_are_consumed_once() {
        let mut q = controller();
        q.apply(Command::IncreaseWidth, 0.0);
        assert!(q.take_dims_changed());
        assert!(!q.take_dims_changed());

        q.apply(Command::ToggleFitMode, 0.0);
        assert_eq!(q.fit_mode(), FitMode::Overscan);
        assert!(q.take_fit_changed());
        assert!(!q.take_fit_changed());
    }

    #[test]
    fn fit_toggle_bypasses_countdown() {
        let mut q = controller();
        q.apply(Command::IncreaseWidth, 0.0); // arms the countdown
        q.apply(Command::ToggleFitMode, 0.0);
        q.apply(Command::ToggleFitMode, 0.0);
        assert_eq!(q.fit_mode(), FitMode::Letterbox);
    }
}
