//! Diffusion Simulator Core - Rust Engine
//!
//! Deterministic currency-diffusion simulator over a rectangular city grid.
//! Each city belongs to one country and holds a balance of every country's
//! motif; every simulated day each city sends 1/1000 of each balance to its
//! four grid neighbors. The driver reports, per country, the first day on
//! which all of its cities hold every motif.
//!
//! # Architecture
//!
//! - **models**: Domain types (CityLedger, CityGrid, GridTraversal)
//! - **driver**: Per-case day loop and completion tracking
//! - **cases**: Input-text parsing into case specs
//! - **report**: Per-case result rendering
//!
//! # Critical Invariants
//!
//! 1. All motif amounts are i64
//! 2. Day-steps are snapshot-then-apply: every portion is computed from
//!    day-start balances before any write lands
//! 3. City completion is monotonic; detection fires once per country

// Module declarations
pub mod cases;
pub mod driver;
pub mod models;
pub mod report;

// Re-exports for convenience
pub use cases::{parse_cases, CaseSpec, ParseError};
pub use driver::{CaseResult, DayResult, DriverState, SimulationDriver};
pub use models::{
    grid::{CityGrid, Coord, GridError, Rectangle, COORD_MAX, COORD_MIN},
    ledger::{CityLedger, INITIAL_BALANCE, PORTION_DIVISOR},
    traversal::GridTraversal,
};
pub use report::format_report;
