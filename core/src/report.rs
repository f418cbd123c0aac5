//! Result report rendering
//!
//! Renders per-case completion days as the classic text report:
//!
//! ```text
//! Case Number 1
//! Spain 382
//! Portugal 416
//! France 1325
//! ```
//!
//! Countries are ordered by completion day ascending; ties fall back to
//! alphabetical order. The underlying `CaseResult` map is already
//! name-sorted, so a stable sort by day gives the tie-break for free.

use crate::driver::CaseResult;
use std::fmt::Write as _;

/// Render the text report for all cases, in case order
///
/// # Example
/// ```
/// use diffusion_simulator_core::{format_report, CaseResult};
///
/// let mut case = CaseResult::new();
/// case.insert("Luxembourg".to_string(), 0);
///
/// assert_eq!(format_report(&[case]), "Case Number 1\nLuxembourg 0\n");
/// ```
pub fn format_report(results: &[CaseResult]) -> String {
    let mut out = String::new();

    for (index, case) in results.iter().enumerate() {
        let _ = writeln!(out, "Case Number {}", index + 1);

        let mut entries: Vec<(&String, &u32)> = case.iter().collect();
        entries.sort_by_key(|(_, day)| **day);

        for (country, day) in entries {
            let _ = writeln!(out, "{} {}", country, day);
        }
    }

    out
}
