use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};
use crate::utils::constants::{MONTH_CATEGORY, MONTH_LABELS, SEASON_CATEGORY, SEASON_LABELS};

/// Season label mapped from the dataset's 1-4 season code.
///
/// Codes outside the map are kept as `Unrecognized` so they still form
/// their own group during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Springer,
    Summer,
    Fall,
    Winter,
    Unrecognized(i64),
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Springer,
        Season::Summer,
        Season::Fall,
        Season::Winter,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Springer,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unrecognized(other),
        }
    }

    pub fn from_code_strict(code: i64) -> Result<Self> {
        match Self::from_code(code) {
            Season::Unrecognized(code) => Err(AnalyticsError::UnrecognizedCategory {
                category: SEASON_CATEGORY,
                code,
            }),
            season => Ok(season),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Season::Springer => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
            Season::Unrecognized(code) => *code,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Season::Unrecognized(_))
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Season::Unrecognized(_) => None,
            known => Some(SEASON_LABELS[(known.code() - 1) as usize]),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.code()),
        }
    }
}

impl FromStr for Season {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(pos) = SEASON_LABELS
            .iter()
            .position(|label| label.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Season::from_code(pos as i64 + 1));
        }

        trimmed
            .parse::<i64>()
            .map(Season::from_code)
            .map_err(|_| AnalyticsError::InvalidFormat(format!("Unknown season: '{}'", s)))
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month label mapped from the dataset's 1-12 month code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    Januari,
    Februari,
    Maret,
    April,
    Mei,
    Juni,
    Juli,
    Agustus,
    September,
    Oktober,
    November,
    Desember,
    Unrecognized(i64),
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Januari,
        Month::Februari,
        Month::Maret,
        Month::April,
        Month::Mei,
        Month::Juni,
        Month::Juli,
        Month::Agustus,
        Month::September,
        Month::Oktober,
        Month::November,
        Month::Desember,
    ];

    pub fn from_code(code: i64) -> Self {
        if (1..=12).contains(&code) {
            Self::ALL[(code - 1) as usize]
        } else {
            Month::Unrecognized(code)
        }
    }

    pub fn from_code_strict(code: i64) -> Result<Self> {
        match Self::from_code(code) {
            Month::Unrecognized(code) => Err(AnalyticsError::UnrecognizedCategory {
                category: MONTH_CATEGORY,
                code,
            }),
            month => Ok(month),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Month::Unrecognized(code) => *code,
            known => {
                Self::ALL
                    .iter()
                    .position(|m| m == known)
                    .map(|pos| pos as i64 + 1)
                    .unwrap_or_default()
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Month::Unrecognized(_))
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Month::Unrecognized(_) => None,
            known => Some(MONTH_LABELS[(known.code() - 1) as usize]),
        }
    }

    /// Sort key for chronological views: known months by calendar position,
    /// unrecognized codes after them in code order.
    pub fn calendar_order(&self) -> (bool, i64) {
        (!self.is_recognized(), self.code())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "{}", self.code()),
        }
    }
}

impl FromStr for Month {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(pos) = MONTH_LABELS
            .iter()
            .position(|label| label.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Month::from_code(pos as i64 + 1));
        }

        trimmed
            .parse::<i64>()
            .map(Month::from_code)
            .map_err(|_| AnalyticsError::InvalidFormat(format!("Unknown month: '{}'", s)))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_code_mapping() {
        assert_eq!(Season::from_code(1), Season::Springer);
        assert_eq!(Season::from_code(4), Season::Winter);
        assert_eq!(Season::from_code(7), Season::Unrecognized(7));
        assert_eq!(Season::Fall.code(), 3);
        assert_eq!(Season::Summer.to_string(), "Summer");
        assert_eq!(Season::Unrecognized(7).to_string(), "7");
    }

    #[test]
    fn test_strict_mapping_rejects_unknown_codes() {
        assert!(Season::from_code_strict(2).is_ok());
        match Season::from_code_strict(0) {
            Err(AnalyticsError::UnrecognizedCategory { category, code }) => {
                assert_eq!(category, "season");
                assert_eq!(code, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Month::from_code_strict(13).is_err());
        assert_eq!(Month::from_code_strict(8).unwrap(), Month::Agustus);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(Month::from_code(1).to_string(), "Januari");
        assert_eq!(Month::from_code(12).to_string(), "Desember");
        assert_eq!(Month::Agustus.code(), 8);
        assert_eq!(Month::Unrecognized(0).label(), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("agustus".parse::<Month>().unwrap(), Month::Agustus);
        assert_eq!("8".parse::<Month>().unwrap(), Month::Agustus);
        assert_eq!(" Summer ".parse::<Season>().unwrap(), Season::Summer);
        assert!("August".parse::<Month>().is_err());
    }

    #[test]
    fn test_calendar_order_puts_unknown_last() {
        let mut months = vec![Month::Unrecognized(0), Month::Mei, Month::Januari];
        months.sort_by_key(|m| m.calendar_order());
        assert_eq!(
            months,
            vec![Month::Januari, Month::Mei, Month::Unrecognized(0)]
        );
    }

    #[test]
    fn test_serialize_as_label() {
        let json = serde_json::to_string(&vec![Season::Winter, Season::Unrecognized(9)]).unwrap();
        assert_eq!(json, r#"["Winter","9"]"#);
    }
}
