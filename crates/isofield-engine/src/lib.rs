//! Isofield engine crate.
//!
//! Samples a time-varying scalar field on a regular 2D grid, extracts evenly
//! spaced isolines with a marching-triangles scheme, and packages the result
//! as restart-separated indexed geometry for a renderer.

pub mod coords;
pub mod field;
pub mod grid;
pub mod contour;
pub mod quality;
pub mod assemble;
pub mod time;

pub mod logging;

mod engine;
mod error;

pub use engine::ContourEngine;
pub use error::ContourError;
