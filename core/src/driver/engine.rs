//! Simulation driver engine
//!
//! Runs the per-case day loop over a [`CityGrid`]:
//!
//! ```text
//! For each day d (while running):
//! 1. Drop countries resolved on an earlier day from the open set
//! 2. Scan all cities; newly complete ones join the completed set
//! 3. Every open country whose full city set is completed records day d
//! 4. All countries resolved -> Done
//! 5. Otherwise advance the grid one day and continue with d + 1
//! ```
//!
//! Day numbers are zero-based counts of full day-steps applied before
//! completion was observed: a single-country case is complete on day 0,
//! before any diffusion step runs.

use crate::models::grid::{CityGrid, Coord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Per-case outcome: country name -> zero-based completion day
pub type CaseResult = BTreeMap<String, u32>;

/// Driver lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriverState {
    Running,
    Done,
}

/// Outcome of a single day-step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayResult {
    /// Day the completion scan ran on (zero-based)
    pub day: u32,

    /// Cities that became complete during this scan
    pub newly_completed_cities: usize,

    /// Countries whose completion day was recorded during this scan
    pub newly_completed_countries: Vec<String>,

    /// Driver state after the step
    pub state: DriverState,
}

/// Runs one test case's grid to completion
///
/// Owns the grid exclusively for the case's lifetime; completion of a city
/// is monotonic (completed cities are never re-checked, even if a balance
/// later dips back to zero).
///
/// # Example
/// ```
/// use diffusion_simulator_core::{CityGrid, Rectangle, SimulationDriver};
///
/// let grid = CityGrid::from_rectangles(
///     vec!["Luxembourg".to_string()],
///     &[Rectangle::new("Luxembourg", 1, 1, 1, 1)],
/// )
/// .unwrap();
///
/// let mut driver = SimulationDriver::new(grid);
/// let results = driver.run();
/// assert_eq!(results["Luxembourg"], 0);
/// ```
#[derive(Debug)]
pub struct SimulationDriver {
    grid: CityGrid,

    /// Zero-based day the next scan observes
    current_day: u32,

    /// Cities found complete on any earlier scan
    completed_cities: BTreeSet<Coord>,

    /// Countries still waiting for completion, with their full city sets
    remaining: BTreeMap<String, BTreeSet<Coord>>,

    /// Recorded completion days
    results: CaseResult,

    state: DriverState,
}

impl SimulationDriver {
    /// Create a driver for one case's grid
    ///
    /// Only countries that actually own cities enter the open set; a grid
    /// with zero cities is `Done` immediately with empty results.
    pub fn new(grid: CityGrid) -> Self {
        let remaining = grid.cities_by_country();
        let state = if remaining.is_empty() {
            DriverState::Done
        } else {
            DriverState::Running
        };

        Self {
            grid,
            current_day: 0,
            completed_cities: BTreeSet::new(),
            remaining,
            results: CaseResult::new(),
            state,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Zero-based day of the next completion scan
    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Results recorded so far (final once the state is `Done`)
    pub fn results(&self) -> &CaseResult {
        &self.results
    }

    /// The grid under simulation
    pub fn grid(&self) -> &CityGrid {
        &self.grid
    }

    // ========================================================================
    // Day Loop
    // ========================================================================

    /// Execute one day-step
    ///
    /// Scans for newly complete cities and countries at the current day,
    /// then either finishes or advances the grid. A no-op once `Done`.
    pub fn step_day(&mut self) -> DayResult {
        if self.state == DriverState::Done {
            return DayResult {
                day: self.current_day,
                newly_completed_cities: 0,
                newly_completed_countries: Vec::new(),
                state: DriverState::Done,
            };
        }

        // STEP 1: CITY SCAN
        // Countries recorded on earlier days already left `remaining`, so
        // detection fires exactly once per country. Completed cities are
        // skipped, making completion monotonic.
        let mut newly_completed_cities = 0;
        for (coord, ledger) in self.grid.traverse() {
            if self.completed_cities.contains(&coord) {
                continue;
            }
            if ledger.is_complete() {
                self.completed_cities.insert(coord);
                newly_completed_cities += 1;
            }
        }

        // STEP 2: COUNTRY COMPLETION
        let newly_completed_countries: Vec<String> = self
            .remaining
            .iter()
            .filter(|(_, cities)| cities.is_subset(&self.completed_cities))
            .map(|(country, _)| country.clone())
            .collect();

        for country in &newly_completed_countries {
            self.remaining.remove(country);
            self.results.insert(country.clone(), self.current_day);
            info!(country = %country, day = self.current_day, "country complete");
        }

        // STEP 3: TERMINATE OR ADVANCE
        let day = self.current_day;
        if self.remaining.is_empty() {
            self.state = DriverState::Done;
        } else {
            self.grid.advance_one_day();
            self.current_day += 1;
        }

        debug!(
            day,
            newly_completed_cities,
            open_countries = self.remaining.len(),
            "day-step finished"
        );

        DayResult {
            day,
            newly_completed_cities,
            newly_completed_countries,
            state: self.state,
        }
    }

    /// Run day-steps until every country has a recorded completion day
    pub fn run(&mut self) -> &CaseResult {
        while self.state == DriverState::Running {
            self.step_day();
        }
        &self.results
    }

    /// Consume the driver, yielding the final results
    pub fn into_results(mut self) -> CaseResult {
        self.run();
        self.results
    }
}
