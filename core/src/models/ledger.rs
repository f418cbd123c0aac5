//! City ledger model
//!
//! Represents one grid city's currency holdings. Each city belongs to
//! exactly one country and holds a balance of every country's motif:
//! - Balances are i64 minor units
//! - The home motif starts at `INITIAL_BALANCE`, every other motif at 0
//! - Balances may go negative mid-simulation; that is transient diffusion
//!   state, not an error
//!
//! CRITICAL: the balance key set is fixed at construction. Credits and
//! debits only touch motifs the grid declared; no keys are ever added or
//! removed afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opening balance of a city's own motif.
pub const INITIAL_BALANCE: i64 = 1_000_000;

/// Divisor producing the representative portion sent to each neighbor
/// per day (1/1000 of each balance).
pub const PORTION_DIVISOR: i64 = 1000;

/// Per-motif amounts, keyed by country name.
pub type MotifPortions = HashMap<String, i64>;

/// One city's balance record
///
/// # Example
/// ```
/// use diffusion_simulator_core::{CityLedger, INITIAL_BALANCE};
///
/// let countries = vec!["France".to_string(), "Spain".to_string()];
/// let ledger = CityLedger::new("France", &countries);
///
/// assert_eq!(ledger.balance("France"), INITIAL_BALANCE);
/// assert_eq!(ledger.balance("Spain"), 0);
/// assert!(!ledger.is_complete()); // Spain motif is still 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityLedger {
    /// Country this city belongs to (immutable after construction)
    home_country: String,

    /// Balance per motif, one entry per country declared for the grid
    balances: HashMap<String, i64>,
}

impl CityLedger {
    /// Create a ledger for a city of `home_country`
    ///
    /// `country_names` is the full set of countries declared for the grid;
    /// the ledger gets one zero balance per country, except the home motif
    /// which starts at `INITIAL_BALANCE`.
    pub fn new(home_country: impl Into<String>, country_names: &[String]) -> Self {
        let home_country = home_country.into();
        let mut balances: HashMap<String, i64> = country_names
            .iter()
            .map(|name| (name.clone(), 0))
            .collect();
        balances.insert(home_country.clone(), INITIAL_BALANCE);

        Self {
            home_country,
            balances,
        }
    }

    /// Country this city belongs to
    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    /// Balance of a single motif (0 for motifs unknown to this grid)
    pub fn balance(&self, country: &str) -> i64 {
        self.balances.get(country).copied().unwrap_or(0)
    }

    /// All balances, keyed by country name
    pub fn balances(&self) -> &HashMap<String, i64> {
        &self.balances
    }

    /// Per-motif amount this city sends to each neighbor today
    ///
    /// Uses i64 division, which truncates toward zero. This matters once a
    /// balance has gone negative: `-1 / 1000 == 0`, not `-1`.
    ///
    /// # Example
    /// ```
    /// use diffusion_simulator_core::CityLedger;
    ///
    /// let countries = vec!["France".to_string()];
    /// let ledger = CityLedger::new("France", &countries);
    /// assert_eq!(ledger.representative_portions()["France"], 1000);
    /// ```
    pub fn representative_portions(&self) -> MotifPortions {
        self.balances
            .iter()
            .map(|(country, balance)| (country.clone(), balance / PORTION_DIVISOR))
            .collect()
    }

    /// Add each portion amount to the matching motif balance
    ///
    /// No caps; balances grow without bound. Motifs not already present in
    /// this ledger are ignored, preserving the fixed key set.
    pub fn credit(&mut self, portions: &MotifPortions) {
        for (country, amount) in portions {
            if let Some(balance) = self.balances.get_mut(country) {
                *balance += amount;
            }
        }
    }

    /// Subtract each portion amount from the matching motif balance
    ///
    /// Balances may go negative here; the diffusion reconverges later.
    pub fn debit(&mut self, portions: &MotifPortions) {
        for (country, amount) in portions {
            if let Some(balance) = self.balances.get_mut(country) {
                *balance -= amount;
            }
        }
    }

    /// True iff every motif balance is strictly positive
    ///
    /// A zero balance does not count: the city must actually hold coins of
    /// every motif.
    pub fn is_complete(&self) -> bool {
        self.balances.values().all(|&amount| amount > 0)
    }
}
