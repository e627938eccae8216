use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};

/// Numeric columns of the daily dataset that can be described or charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Weathersit,
    Temp,
    Atemp,
    Hum,
    Windspeed,
    Casual,
    Registered,
    Cnt,
}

impl Column {
    /// Environmental columns summarized for the top month.
    pub const CONDITIONS: [Column; 4] = [
        Column::Weathersit,
        Column::Temp,
        Column::Hum,
        Column::Windspeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Weathersit => "weathersit",
            Column::Temp => "temp",
            Column::Atemp => "atemp",
            Column::Hum => "hum",
            Column::Windspeed => "windspeed",
            Column::Casual => "casual",
            Column::Registered => "registered",
            Column::Cnt => "cnt",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Weathersit => "Weather Situation",
            Column::Temp => "Normalized Temperature",
            Column::Atemp => "Normalized Feeling Temperature",
            Column::Hum => "Normalized Humidity",
            Column::Windspeed => "Normalized Wind Speed",
            Column::Casual => "Casual Riders",
            Column::Registered => "Registered Riders",
            Column::Cnt => "Total Riders",
        }
    }

    /// Parse a comma-separated column list such as `temp,hum`.
    pub fn parse_list(list: &str) -> Result<Vec<Column>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Column>())
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weathersit" => Ok(Column::Weathersit),
            "temp" => Ok(Column::Temp),
            "atemp" => Ok(Column::Atemp),
            "hum" => Ok(Column::Hum),
            "windspeed" => Ok(Column::Windspeed),
            "casual" => Ok(Column::Casual),
            "registered" => Ok(Column::Registered),
            "cnt" => Ok(Column::Cnt),
            other => Err(AnalyticsError::InvalidFormat(format!(
                "Unknown column: '{}'",
                other
            ))),
        }
    }
}
