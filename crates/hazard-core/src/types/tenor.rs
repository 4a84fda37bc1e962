//! Tenor strings such as `"5Y"` or `"3M"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HazardError, HazardResult};

/// Unit of a tenor period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Year => 'Y',
        }
    }
}

/// A period of time expressed as a count of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    /// Number of units (may be negative).
    pub count: i32,
    /// Unit of the period.
    pub unit: TenorUnit,
}

impl Tenor {
    /// Creates a new tenor.
    #[must_use]
    pub const fn new(count: i32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Creates a tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Month)
    }

    /// Creates a tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Year)
    }

    /// Parses a tenor string like `"5Y"`, `"6m"`, `"2W"` or `"-3M"`.
    ///
    /// # Errors
    ///
    /// Returns `HazardError::InvalidArgument` for malformed strings.
    pub fn parse(s: &str) -> HazardResult<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TenorUnit::Day,
            Some('W') => TenorUnit::Week,
            Some('M') => TenorUnit::Month,
            Some('Y') => TenorUnit::Year,
            _ => return Err(HazardError::invalid_argument(format!("Unknown tenor: {s}"))),
        };

        let count = chars
            .as_str()
            .parse::<i32>()
            .map_err(|_| HazardError::invalid_argument(format!("Unknown tenor: {s}")))?;

        Ok(Self { count, unit })
    }
}

impl FromStr for Tenor {
    type Err = HazardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Tenor::parse("5Y").unwrap(), Tenor::years(5));
        assert_eq!(Tenor::parse("6m").unwrap(), Tenor::months(6));
        assert_eq!(Tenor::parse("-3M").unwrap(), Tenor::months(-3));
        assert_eq!(
            Tenor::parse("2W").unwrap(),
            Tenor::new(2, TenorUnit::Week)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Tenor::parse("").is_err());
        assert!(Tenor::parse("Y").is_err());
        assert!(Tenor::parse("5Q").is_err());
        assert!(Tenor::parse("fiveY").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenor::years(10).to_string(), "10Y");
        assert_eq!("3M".parse::<Tenor>().unwrap().to_string(), "3M");
    }
}
