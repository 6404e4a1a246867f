mod sampler;

pub use sampler::FieldSampler;

/// A time-varying scalar field over the 2D domain.
///
/// The engine is generic over the field: it only ever calls `eval`, and
/// requires determinism for fixed inputs so that a frame's samples are
/// internally consistent.
pub trait ScalarField {
    fn eval(&self, x: f32, y: f32, t: f32) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    #[inline]
    fn eval(&self, x: f32, y: f32, t: f32) -> f32 {
        self(x, y, t)
    }
}

/// Hyperbolic paraboloid with an oscillating offset: `x² − y² + sin(t)·3000`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SaddleWave;

impl ScalarField for SaddleWave {
    #[inline]
    fn eval(&self, x: f32, y: f32, t: f32) -> f32 {
        x * x - y * y + t.sin() * 3000.0
    }
}

/// Paraboloid bowl with a breathing floor: `x² + y² + sin(t)·3000 − 8000`.
#[derive(Debug, Default, Copy, Clone)]
pub struct RadialWave;

impl ScalarField for RadialWave {
    #[inline]
    fn eval(&self, x: f32, y: f32, t: f32) -> f32 {
        x * x + y * y + t.sin() * 3000.0 - 8000.0
    }
}

/// Traveling interference pattern of two sine waves.
#[derive(Debug, Default, Copy, Clone)]
pub struct Ripple;

impl ScalarField for Ripple {
    #[inline]
    fn eval(&self, x: f32, y: f32, t: f32) -> f32 {
        ((x * 0.1 + t).sin() + (y * 0.1 - t * 0.7).sin()) * 5000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saddle_wave_at_origin_is_pure_oscillation() {
        let f = SaddleWave;
        assert_eq!(f.eval(0.0, 0.0, 0.0), 0.0);
        assert!((f.eval(0.0, 0.0, std::f32::consts::FRAC_PI_2) - 3000.0).abs() < 1e-3);
    }

    #[test]
    fn closures_are_fields() {
        let f = |x: f32, y: f32, _t: f32| x + y;
        assert_eq!(f.eval(2.0, 3.0, 99.0), 5.0);
    }
}
