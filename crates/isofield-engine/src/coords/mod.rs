mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
