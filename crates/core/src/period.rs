//! Reporting periods in `YYYY-Qn` form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A quarterly reporting period, e.g. `2024-Q1`.
///
/// Ordering is chronological: first by year, then by quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    pub year: i32,
    pub quarter: u8,
}

impl Period {
    pub fn new(year: i32, quarter: u8) -> Result<Self, CoreError> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::Validation(format!(
                "Invalid quarter {quarter}. Must be 1-4"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Period {
        if self.quarter == 4 {
            Period {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Period {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            CoreError::Validation(format!(
                "Invalid reporting period '{s}'. Expected YYYY-Qn"
            ))
        };

        let (year_part, quarter_part) = s.split_once("-Q").ok_or_else(invalid)?;
        if year_part.len() != 4 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let quarter: u8 = quarter_part.parse().map_err(|_| invalid())?;
        Period::new(year, quarter).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

/// Validate a reporting period string without constructing a [`Period`].
pub fn validate_period(s: &str) -> Result<(), CoreError> {
    s.parse::<Period>().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_periods_parse() {
        let p: Period = "2024-Q1".parse().unwrap();
        assert_eq!(p, Period::new(2024, 1).unwrap());
        assert_eq!(p.to_string(), "2024-Q1");
    }

    #[test]
    fn invalid_periods_rejected() {
        for s in ["", "2024", "2024-Q5", "2024-Q0", "24-Q1", "2024-q1", "2024-Q"] {
            assert!(s.parse::<Period>().is_err(), "'{s}' must be rejected");
        }
    }

    #[test]
    fn ordering_is_chronological() {
        let q4_2023: Period = "2023-Q4".parse().unwrap();
        let q1_2024: Period = "2024-Q1".parse().unwrap();
        let q2_2024: Period = "2024-Q2".parse().unwrap();
        assert!(q4_2023 < q1_2024);
        assert!(q1_2024 < q2_2024);
    }

    #[test]
    fn next_rolls_over_year() {
        let q4: Period = "2024-Q4".parse().unwrap();
        assert_eq!(q4.next().to_string(), "2025-Q1");
        let q2: Period = "2024-Q2".parse().unwrap();
        assert_eq!(q2.next().to_string(), "2024-Q3");
    }
}
