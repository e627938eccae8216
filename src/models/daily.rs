use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AnalyticsError, Result};
use crate::models::{Column, Month, Season};

/// One row of `day.csv` as it appears on disk, before the label maps are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDayRow {
    pub instant: u32,
    pub dteday: String,
    pub season: i64,
    pub yr: u8,
    pub mnth: i64,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DailyRecord {
    pub instant: u32,
    pub date: NaiveDate,
    pub season: Season,
    pub year: u8,
    pub month: Month,
    pub holiday: bool,
    pub weekday: u8,
    pub workingday: bool,
    pub weathersit: u8,

    #[validate(range(min = 0.0, max = 1.0))]
    pub temp: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub atemp: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub hum: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub windspeed: f64,

    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl DailyRecord {
    /// Value of a numeric column as `f64`.
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Weathersit => self.weathersit as f64,
            Column::Temp => self.temp,
            Column::Atemp => self.atemp,
            Column::Hum => self.hum,
            Column::Windspeed => self.windspeed,
            Column::Casual => self.casual as f64,
            Column::Registered => self.registered as f64,
            Column::Cnt => self.cnt as f64,
        }
    }

    pub fn has_consistent_counts(&self) -> bool {
        self.casual.checked_add(self.registered) == Some(self.cnt)
    }

    /// Normalized columns holding NaN or infinity. The range validators
    /// cannot see these since every comparison with NaN is false.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        [
            ("temp", self.temp),
            ("atemp", self.atemp),
            ("hum", self.hum),
            ("windspeed", self.windspeed),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn has_recognized_categories(&self) -> bool {
        self.season.is_recognized() && self.month.is_recognized()
    }
}

pub struct DailyRecordBuilder {
    instant: u32,
    date: Option<NaiveDate>,
    season: Option<Season>,
    month: Option<Month>,
    year: u8,
    holiday: bool,
    weekday: u8,
    workingday: bool,
    weathersit: u8,
    temp: f64,
    atemp: Option<f64>,
    hum: f64,
    windspeed: f64,
    casual: Option<u64>,
    registered: Option<u64>,
    total: Option<u64>,
}

impl Default for DailyRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyRecordBuilder {
    pub fn new() -> Self {
        Self {
            instant: 0,
            date: None,
            season: None,
            month: None,
            year: 0,
            holiday: false,
            weekday: 0,
            workingday: true,
            weathersit: 1,
            temp: 0.0,
            atemp: None,
            hum: 0.0,
            windspeed: 0.0,
            casual: None,
            registered: None,
            total: None,
        }
    }

    pub fn instant(mut self, instant: u32) -> Self {
        self.instant = instant;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn calendar(mut self, year: u8, weekday: u8, holiday: bool, workingday: bool) -> Self {
        self.year = year;
        self.weekday = weekday;
        self.holiday = holiday;
        self.workingday = workingday;
        self
    }

    pub fn conditions(mut self, weathersit: u8, temp: f64, hum: f64, windspeed: f64) -> Self {
        self.weathersit = weathersit;
        self.temp = temp;
        self.hum = hum;
        self.windspeed = windspeed;
        self
    }

    pub fn feeling_temp(mut self, atemp: f64) -> Self {
        self.atemp = Some(atemp);
        self
    }

    pub fn riders(mut self, casual: u64, registered: u64) -> Self {
        self.casual = Some(casual);
        self.registered = Some(registered);
        self
    }

    /// Overrides the total, which otherwise is `casual + registered`.
    pub fn total(mut self, cnt: u64) -> Self {
        self.total = Some(cnt);
        self
    }

    pub fn build(self) -> Result<DailyRecord> {
        let casual = self
            .casual
            .ok_or_else(|| AnalyticsError::MissingData("casual".to_string()))?;
        let registered = self
            .registered
            .ok_or_else(|| AnalyticsError::MissingData("registered".to_string()))?;
        let cnt = match self.total {
            Some(cnt) => cnt,
            None => casual.checked_add(registered).ok_or_else(|| {
                AnalyticsError::InvalidFormat(format!(
                    "casual {} + registered {} overflows the total",
                    casual, registered
                ))
            })?,
        };

        let record = DailyRecord {
            instant: self.instant,
            date: self
                .date
                .ok_or_else(|| AnalyticsError::MissingData("date".to_string()))?,
            season: self
                .season
                .ok_or_else(|| AnalyticsError::MissingData("season".to_string()))?,
            year: self.year,
            month: self
                .month
                .ok_or_else(|| AnalyticsError::MissingData("month".to_string()))?,
            holiday: self.holiday,
            weekday: self.weekday,
            workingday: self.workingday,
            weathersit: self.weathersit,
            temp: self.temp,
            atemp: self.atemp.unwrap_or(self.temp),
            hum: self.hum,
            windspeed: self.windspeed,
            casual,
            registered,
            cnt,
        };

        record.validate()?;

        let non_finite = record.non_finite_fields();
        if !non_finite.is_empty() {
            return Err(AnalyticsError::InvalidFormat(format!(
                "{} must be finite",
                non_finite.join(", ")
            )));
        }

        Ok(record)
    }
}
