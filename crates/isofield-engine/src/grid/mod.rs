mod config;
mod mesh;
mod placement;

pub use config::{DomainBounds, GridConfig, MAX_GRID, MAX_ISOLINES, MAX_VALUE, RESTART_INDEX};
pub use mesh::strip_indices;
pub use placement::{place, FitMode, Placement};
