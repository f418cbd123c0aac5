//! Conservation properties of the daily diffusion step
//!
//! Every coin a city debits is credited to exactly one neighbor, so the
//! grid-wide total of each motif is an invariant of `advance_one_day`.

use diffusion_simulator_core::{CityGrid, Rectangle, INITIAL_BALANCE};
use proptest::prelude::*;

fn total_motif(grid: &CityGrid, country: &str) -> i64 {
    grid.traverse()
        .map(|(_, ledger)| ledger.balance(country))
        .sum()
}

proptest! {
    #[test]
    fn single_country_rectangle_conserves_its_motif(
        width in 1u8..=10,
        height in 1u8..=10,
        days in 1usize..=30,
    ) {
        let mut grid = CityGrid::from_rectangles(
            vec!["France".to_string()],
            &[Rectangle::new("France", 1, 1, width, height)],
        )
        .unwrap();
        let expected = INITIAL_BALANCE * i64::from(width) * i64::from(height);

        for _ in 0..days {
            grid.advance_one_day();
        }

        prop_assert_eq!(total_motif(&grid, "France"), expected);
    }

    #[test]
    fn interior_cells_of_an_enclosed_rectangle_balance_in_and_out(
        side in 3u8..=10,
    ) {
        // Fully-enclosed topology: with uniform balances, every interior
        // cell's inflow equals its outflow, so one day changes nothing.
        let mut grid = CityGrid::from_rectangles(
            vec!["France".to_string()],
            &[Rectangle::new("France", 1, 1, side, side)],
        )
        .unwrap();

        grid.advance_one_day();

        for (_, ledger) in grid.traverse() {
            prop_assert_eq!(ledger.balance("France"), INITIAL_BALANCE);
        }
    }
}

#[test]
fn test_multi_country_case_conserves_every_motif() {
    let mut grid = CityGrid::from_rectangles(
        vec![
            "France".to_string(),
            "Spain".to_string(),
            "Portugal".to_string(),
        ],
        &[
            Rectangle::new("France", 1, 4, 4, 6),
            Rectangle::new("Spain", 3, 1, 6, 3),
            Rectangle::new("Portugal", 1, 1, 2, 2),
        ],
    )
    .unwrap();

    let cities = grid.cities_by_country();
    for _ in 0..50 {
        grid.advance_one_day();
    }

    for (country, coords) in &cities {
        let expected = INITIAL_BALANCE * coords.len() as i64;
        assert_eq!(total_motif(&grid, country), expected);
    }
}
