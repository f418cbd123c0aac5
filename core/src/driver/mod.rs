//! Driver - per-case day loop and completion tracking
//!
//! See `engine.rs` for the implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{CaseResult, DayResult, DriverState, SimulationDriver};
