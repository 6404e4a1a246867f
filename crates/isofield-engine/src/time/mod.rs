//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame.
//! The clamped delta time feeds both the field's simulation time and the
//! quality controller's debounce countdown.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
