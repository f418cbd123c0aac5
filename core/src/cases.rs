//! Case-text parsing
//!
//! Input is a sequence of test cases. Each case opens with a line holding
//! the country count `n`, followed by `n` lines of
//! `name x_low y_low x_high y_high` with inclusive coordinates in `1..=10`.
//! A count of `0` terminates the input; plain end-of-input does too. Blank
//! lines between cases are ignored.
//!
//! Errors carry the 1-based input line number of the offending line.

use crate::models::grid::{CityGrid, GridError, Rectangle, COORD_MAX, COORD_MIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most countries a single case may declare.
pub const MAX_COUNTRIES: usize = 20;

/// Longest accepted country name, in characters.
pub const MAX_NAME_LEN: usize = 25;

/// Errors that can occur while parsing case text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected a country count in 0..={MAX_COUNTRIES}, found {found:?}")]
    InvalidCountryCount { line: usize, found: String },

    #[error("line {line}: malformed country line {found:?} (expected `name xl yl xh yh`)")]
    MalformedCountryLine { line: usize, found: String },

    #[error("line {line}: country name {name:?} is longer than {MAX_NAME_LEN} characters")]
    NameTooLong { line: usize, name: String },

    #[error(
        "line {line}: coordinate {value} for {country} is outside {}..={}",
        COORD_MIN,
        COORD_MAX
    )]
    CoordinateOutOfRange {
        line: usize,
        country: String,
        value: i64,
    },

    #[error("line {line}: rectangle for {country} has inverted bounds")]
    InvertedBounds { line: usize, country: String },

    #[error("case at line {line} declares {expected} countries but input ended after {got}")]
    TruncatedCase {
        line: usize,
        expected: usize,
        got: usize,
    },
}

/// One parsed test case: the declared country rectangles, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSpec {
    pub rectangles: Vec<Rectangle>,
}

impl CaseSpec {
    /// Country names in declaration order
    pub fn country_names(&self) -> Vec<String> {
        self.rectangles
            .iter()
            .map(|rect| rect.country.clone())
            .collect()
    }

    /// Build the case's grid
    pub fn build_grid(&self) -> Result<CityGrid, GridError> {
        CityGrid::from_rectangles(self.country_names(), &self.rectangles)
    }
}

/// Parse every case from an input text
///
/// # Example
/// ```
/// use diffusion_simulator_core::parse_cases;
///
/// let input = "1\nLuxembourg 1 1 1 1\n0\n";
/// let cases = parse_cases(input).unwrap();
///
/// assert_eq!(cases.len(), 1);
/// assert_eq!(cases[0].rectangles[0].country, "Luxembourg");
/// ```
pub fn parse_cases(input: &str) -> Result<Vec<CaseSpec>, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut cases = Vec::new();

    while let Some((count_line, text)) = lines.next() {
        let count: usize = text.parse().map_err(|_| ParseError::InvalidCountryCount {
            line: count_line,
            found: text.to_string(),
        })?;
        if count == 0 {
            break;
        }
        if count > MAX_COUNTRIES {
            return Err(ParseError::InvalidCountryCount {
                line: count_line,
                found: text.to_string(),
            });
        }

        let mut rectangles = Vec::with_capacity(count);
        for got in 0..count {
            let (line, text) = lines.next().ok_or(ParseError::TruncatedCase {
                line: count_line,
                expected: count,
                got,
            })?;
            rectangles.push(parse_country_line(line, text)?);
        }

        cases.push(CaseSpec { rectangles });
    }

    Ok(cases)
}

fn parse_country_line(line: usize, text: &str) -> Result<Rectangle, ParseError> {
    let malformed = || ParseError::MalformedCountryLine {
        line,
        found: text.to_string(),
    };

    let fields: Vec<&str> = text.split_whitespace().collect();
    let &[name, xl, yl, xh, yh] = fields.as_slice() else {
        return Err(malformed());
    };

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ParseError::NameTooLong {
            line,
            name: name.to_string(),
        });
    }

    let coord = |field: &str| -> Result<u8, ParseError> {
        let value: i64 = field.parse().map_err(|_| malformed())?;
        if !(i64::from(COORD_MIN)..=i64::from(COORD_MAX)).contains(&value) {
            return Err(ParseError::CoordinateOutOfRange {
                line,
                country: name.to_string(),
                value,
            });
        }
        Ok(value as u8)
    };

    let (x_low, y_low, x_high, y_high) = (coord(xl)?, coord(yl)?, coord(xh)?, coord(yh)?);
    if x_low > x_high || y_low > y_high {
        return Err(ParseError::InvertedBounds {
            line,
            country: name.to_string(),
        });
    }

    Ok(Rectangle::new(name.to_string(), x_low, y_low, x_high, y_high))
}
