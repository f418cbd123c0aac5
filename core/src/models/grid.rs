//! City grid model
//!
//! Owns every city ledger, indexed by grid coordinate. The grid is built
//! once per test case from country rectangles and then mutated in place by
//! the daily diffusion step.
//!
//! # Critical Invariants
//!
//! 1. Every populated cell belongs to exactly one country, fixed at build
//!    time; rectangles claiming the same cell are a fatal build error
//! 2. Coordinates live in the `1..=10` domain, validated at build time
//! 3. The populated cells form a single 4-connected component
//! 4. `advance_one_day` reads all day-start balances before applying any
//!    write (snapshot-then-apply)

use crate::models::ledger::{CityLedger, MotifPortions};
use crate::models::traversal::GridTraversal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Lowest valid coordinate on either axis.
pub const COORD_MIN: u8 = 1;
/// Highest valid coordinate on either axis.
pub const COORD_MAX: u8 = 10;

/// A grid cell position
///
/// An explicit `(x, y)` composite key. `Ord` follows `(x, y)` field order,
/// which makes `BTreeMap<Coord, _>` iteration deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True iff both axes are within `1..=10`
    pub fn in_domain(&self) -> bool {
        (COORD_MIN..=COORD_MAX).contains(&self.x) && (COORD_MIN..=COORD_MAX).contains(&self.y)
    }

    /// Neighbor candidates in fixed North, South, West, East order
    ///
    /// `None` where the candidate would leave the u8 range; whether a
    /// candidate is actually populated is the grid's call.
    fn neighbor_candidates(&self) -> [Option<Coord>; 4] {
        [
            self.x.checked_sub(1).map(|x| Coord::new(x, self.y)), // North
            self.x.checked_add(1).map(|x| Coord::new(x, self.y)), // South
            self.y.checked_sub(1).map(|y| Coord::new(self.x, y)), // West
            self.y.checked_add(1).map(|y| Coord::new(self.x, y)), // East
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One country's city block, inclusive on both axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub country: String,
    pub x_low: u8,
    pub y_low: u8,
    pub x_high: u8,
    pub y_high: u8,
}

impl Rectangle {
    pub fn new(country: impl Into<String>, x_low: u8, y_low: u8, x_high: u8, y_high: u8) -> Self {
        Self {
            country: country.into(),
            x_low,
            y_low,
            x_high,
            y_high,
        }
    }

    /// Every cell covered by this rectangle, inclusive corners
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.x_low..=self.x_high)
            .flat_map(move |x| (self.y_low..=self.y_high).map(move |y| Coord::new(x, y)))
    }
}

/// Errors that can occur while building a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Two rectangles (same or different countries) claim one cell
    #[error("rectangles overlap at {coord}: {first} and {second} both claim the cell")]
    RectangleOverlap {
        coord: Coord,
        first: String,
        second: String,
    },

    /// Coordinate outside the `1..=10` grid domain
    #[error("coordinate {coord} for {country} is outside the {}..={} grid domain", COORD_MIN, COORD_MAX)]
    CoordOutOfRange { coord: Coord, country: String },

    /// A rectangle names a country missing from the declared name list
    #[error("rectangle references undeclared country {country}")]
    UnknownCountry { country: String },

    /// Populated cells do not form one 4-connected component
    #[error("grid is not connected: {reachable} of {total} cells reachable from the start cell")]
    Disconnected { reachable: usize, total: usize },
}

/// All cities of one test case
///
/// # Example
/// ```
/// use diffusion_simulator_core::{CityGrid, Coord, Rectangle};
///
/// let rects = vec![Rectangle::new("Luxembourg", 1, 1, 1, 1)];
/// let grid = CityGrid::from_rectangles(vec!["Luxembourg".to_string()], &rects).unwrap();
///
/// assert_eq!(grid.num_cities(), 1);
/// assert!(grid.ledger(Coord::new(1, 1)).unwrap().is_complete());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityGrid {
    /// Declared country names, in declaration order (reproducibility only)
    country_names: Vec<String>,

    /// Every populated cell, keyed by coordinate
    cells: BTreeMap<Coord, CityLedger>,
}

impl CityGrid {
    /// Build a grid by rasterizing country rectangles
    ///
    /// Every integer cell in each rectangle's inclusive range gets a fresh
    /// ledger homed to that rectangle's country. Fails fast on cell
    /// overlap, out-of-domain coordinates, undeclared countries, and
    /// disconnected layouts; a failed case is abandoned, never partially
    /// simulated. An empty rectangle list builds an empty, valid grid.
    pub fn from_rectangles(
        country_names: Vec<String>,
        rectangles: &[Rectangle],
    ) -> Result<Self, GridError> {
        let mut grid = Self {
            country_names,
            cells: BTreeMap::new(),
        };

        for rectangle in rectangles {
            if !grid.country_names.iter().any(|name| *name == rectangle.country) {
                return Err(GridError::UnknownCountry {
                    country: rectangle.country.clone(),
                });
            }

            for coord in rectangle.cells() {
                if !coord.in_domain() {
                    return Err(GridError::CoordOutOfRange {
                        coord,
                        country: rectangle.country.clone(),
                    });
                }

                if let Some(existing) = grid.cells.get(&coord) {
                    return Err(GridError::RectangleOverlap {
                        coord,
                        first: existing.home_country().to_string(),
                        second: rectangle.country.clone(),
                    });
                }

                let ledger = CityLedger::new(rectangle.country.clone(), &grid.country_names);
                grid.cells.insert(coord, ledger);
            }
        }

        grid.validate_connected()?;
        Ok(grid)
    }

    /// Declared country names in declaration order
    pub fn country_names(&self) -> &[String] {
        &self.country_names
    }

    /// Number of populated cells
    pub fn num_cities(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ledger at a coordinate, if populated
    pub fn ledger(&self, coord: Coord) -> Option<&CityLedger> {
        self.cells.get(&coord)
    }

    /// City coordinates grouped by owning country
    ///
    /// Computed from the cells themselves; countries declared but never
    /// rasterized do not appear.
    pub fn cities_by_country(&self) -> BTreeMap<String, BTreeSet<Coord>> {
        let mut by_country: BTreeMap<String, BTreeSet<Coord>> = BTreeMap::new();
        for (coord, ledger) in &self.cells {
            by_country
                .entry(ledger.home_country().to_string())
                .or_default()
                .insert(*coord);
        }
        by_country
    }

    /// Populated neighbors of a cell, in fixed North, South, West, East order
    ///
    /// The order only pins down iteration for tests; the diffusion math is
    /// order-independent.
    pub fn adjacent_coords(&self, coord: Coord) -> Vec<Coord> {
        coord
            .neighbor_candidates()
            .into_iter()
            .flatten()
            .filter(|candidate| self.cells.contains_key(candidate))
            .collect()
    }

    /// Restartable breadth-first traversal over every populated cell
    ///
    /// Starts from the smallest coordinate; visits each cell exactly once.
    pub fn traverse(&self) -> GridTraversal<'_> {
        GridTraversal::new(self)
    }

    pub(crate) fn first_coord(&self) -> Option<Coord> {
        self.cells.keys().next().copied()
    }

    /// Advance the whole grid by one simulated day
    ///
    /// Snapshot-then-apply: every city's representative portions are
    /// computed against the untouched day-start balances and staged into
    /// delta maps; only then are all credits applied, then all debits.
    /// A city with `k` populated neighbors sends its portion to each of
    /// them and debits itself `portion * k` per motif, so edge and corner
    /// cells lose less than interior cells.
    pub fn advance_one_day(&mut self) {
        // Staging maps: coord -> accumulated per-motif delta.
        let mut credits: BTreeMap<Coord, MotifPortions> = BTreeMap::new();
        let mut debits: BTreeMap<Coord, MotifPortions> = BTreeMap::new();

        // Read pass over the day-start snapshot.
        for (coord, ledger) in self.traverse() {
            let portion = ledger.representative_portions();
            let neighbors = self.adjacent_coords(coord);

            for neighbor in &neighbors {
                let incoming = credits.entry(*neighbor).or_default();
                for (country, amount) in &portion {
                    *incoming.entry(country.clone()).or_insert(0) += amount;
                }
            }

            let outgoing: MotifPortions = portion
                .iter()
                .map(|(country, amount)| (country.clone(), amount * neighbors.len() as i64))
                .collect();
            debits.insert(coord, outgoing);
        }

        // Write pass: all credits, then all debits. The two address
        // disjoint deltas per cell, so relative order within a cell does
        // not change the sum.
        for (coord, portions) in &credits {
            if let Some(ledger) = self.cells.get_mut(coord) {
                ledger.credit(portions);
            }
        }
        for (coord, portions) in &debits {
            if let Some(ledger) = self.cells.get_mut(coord) {
                ledger.debit(portions);
            }
        }
    }

    /// Reject grids whose populated cells are not one 4-connected component
    fn validate_connected(&self) -> Result<(), GridError> {
        let total = self.cells.len();
        if total == 0 {
            return Ok(());
        }

        let reachable = self.traverse().count();
        if reachable != total {
            return Err(GridError::Disconnected { reachable, total });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_country(name: &str, rect: (u8, u8, u8, u8)) -> CityGrid {
        let (xl, yl, xh, yh) = rect;
        CityGrid::from_rectangles(
            vec![name.to_string()],
            &[Rectangle::new(name, xl, yl, xh, yh)],
        )
        .unwrap()
    }

    #[test]
    fn rasterizes_inclusive_bounds() {
        let grid = single_country("France", (1, 4, 4, 6));
        // 4 columns x 3 rows
        assert_eq!(grid.num_cities(), 12);
        assert!(grid.ledger(Coord::new(1, 4)).is_some());
        assert!(grid.ledger(Coord::new(4, 6)).is_some());
        assert!(grid.ledger(Coord::new(5, 6)).is_none());
    }

    #[test]
    fn adjacency_uses_north_south_west_east_order() {
        let grid = single_country("France", (1, 1, 3, 3));

        let neighbors = grid.adjacent_coords(Coord::new(2, 2));
        assert_eq!(
            neighbors,
            vec![
                Coord::new(1, 2), // North
                Coord::new(3, 2), // South
                Coord::new(2, 1), // West
                Coord::new(2, 3), // East
            ]
        );

        // Corner cell only has the two populated candidates.
        let corner = grid.adjacent_coords(Coord::new(1, 1));
        assert_eq!(corner, vec![Coord::new(2, 1), Coord::new(1, 2)]);
    }

    #[test]
    fn overlap_is_rejected_with_both_claimants() {
        let err = CityGrid::from_rectangles(
            vec!["France".to_string(), "Spain".to_string()],
            &[
                Rectangle::new("France", 1, 1, 2, 2),
                Rectangle::new("Spain", 2, 2, 3, 3),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            GridError::RectangleOverlap {
                coord: Coord::new(2, 2),
                first: "France".to_string(),
                second: "Spain".to_string(),
            }
        );
    }

    #[test]
    fn out_of_domain_coordinate_is_rejected() {
        let err = CityGrid::from_rectangles(
            vec!["France".to_string()],
            &[Rectangle::new("France", 8, 1, 11, 1)],
        )
        .unwrap_err();

        assert!(matches!(err, GridError::CoordOutOfRange { .. }));
    }

    #[test]
    fn disconnected_grid_is_rejected() {
        let err = CityGrid::from_rectangles(
            vec!["France".to_string(), "Spain".to_string()],
            &[
                Rectangle::new("France", 1, 1, 1, 1),
                Rectangle::new("Spain", 5, 5, 5, 5),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            GridError::Disconnected {
                reachable: 1,
                total: 2,
            }
        );
    }

    #[test]
    fn empty_rectangle_list_builds_empty_grid() {
        let grid = CityGrid::from_rectangles(Vec::new(), &[]).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn day_step_moves_one_thousandth_per_neighbor() {
        // Two adjacent single-city countries: each sends 1000 of its own
        // motif to the other and debits itself the same.
        let grid = CityGrid::from_rectangles(
            vec!["France".to_string(), "Spain".to_string()],
            &[
                Rectangle::new("France", 1, 1, 1, 1),
                Rectangle::new("Spain", 1, 2, 1, 2),
            ],
        );
        let mut grid = grid.unwrap();
        grid.advance_one_day();

        let france = grid.ledger(Coord::new(1, 1)).unwrap();
        assert_eq!(france.balance("France"), 999_000);
        assert_eq!(france.balance("Spain"), 1000);

        let spain = grid.ledger(Coord::new(1, 2)).unwrap();
        assert_eq!(spain.balance("Spain"), 999_000);
        assert_eq!(spain.balance("France"), 1000);
    }
}
