//! Domain models for the diffusion simulator

pub mod grid;
pub mod ledger;
pub mod traversal;

// Re-exports
pub use grid::{CityGrid, Coord, GridError, Rectangle};
pub use ledger::{CityLedger, INITIAL_BALANCE, PORTION_DIVISOR};
pub use traversal::GridTraversal;
