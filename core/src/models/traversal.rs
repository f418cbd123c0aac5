//! Breadth-first grid traversal
//!
//! A restartable iterator over every populated cell of a [`CityGrid`].
//! Explicit visited set plus frontier queue, so the visit order is a
//! property of the grid's adjacency and not of any container's insertion
//! order. The driver's completion scan and the daily read pass both use
//! this; neither depends on the order, only on seeing every cell exactly
//! once.

use crate::models::grid::{CityGrid, Coord};
use crate::models::ledger::CityLedger;
use std::collections::{HashSet, VecDeque};

/// Breadth-first iterator over `(Coord, &CityLedger)`
///
/// Starts at the grid's smallest coordinate (deterministic) and is
/// exhausted after yielding every reachable populated cell once. Create a
/// fresh traversal whenever a new scan is needed.
///
/// # Example
/// ```
/// use diffusion_simulator_core::{CityGrid, Rectangle};
///
/// let grid = CityGrid::from_rectangles(
///     vec!["France".to_string()],
///     &[Rectangle::new("France", 1, 1, 2, 2)],
/// )
/// .unwrap();
///
/// assert_eq!(grid.traverse().count(), 4);
/// ```
pub struct GridTraversal<'a> {
    grid: &'a CityGrid,
    visited: HashSet<Coord>,
    frontier: VecDeque<Coord>,
}

impl<'a> GridTraversal<'a> {
    pub(crate) fn new(grid: &'a CityGrid) -> Self {
        let mut visited = HashSet::new();
        let mut frontier = VecDeque::new();

        if let Some(start) = grid.first_coord() {
            visited.insert(start);
            frontier.push_back(start);
        }

        Self {
            grid,
            visited,
            frontier,
        }
    }
}

impl<'a> Iterator for GridTraversal<'a> {
    type Item = (Coord, &'a CityLedger);

    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.frontier.pop_front()?;

        // Cells are marked visited when enqueued, so the frontier never
        // holds duplicates.
        for neighbor in self.grid.adjacent_coords(coord) {
            if self.visited.insert(neighbor) {
                self.frontier.push_back(neighbor);
            }
        }

        let ledger = self.grid.ledger(coord)?;
        Some((coord, ledger))
    }
}
