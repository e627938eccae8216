use serde::Serialize;

use crate::models::{Column, Month, Season};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRow {
    pub season: Season,
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,
}

/// Per-season usage totals, ordered by descending `cnt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeasonSummary {
    pub rows: Vec<SeasonRow>,
}

impl SeasonSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_cnt(&self) -> u64 {
        self.rows.iter().map(|r| r.cnt).sum()
    }

    pub fn total_casual(&self) -> u64 {
        self.rows.iter().map(|r| r.casual).sum()
    }

    pub fn total_registered(&self) -> u64 {
        self.rows.iter().map(|r| r.registered).sum()
    }

    pub fn get(&self, season: Season) -> Option<&SeasonRow> {
        self.rows.iter().find(|r| r.season == season)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeasonDetail {
    pub season: Season,
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: Month,
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,
    pub weathersit: f64,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
}

/// Per-month usage totals with averaged conditions, ordered by descending `cnt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthSummary {
    pub rows: Vec<MonthRow>,
}

impl MonthSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, month: Month) -> Option<&MonthRow> {
        self.rows.iter().find(|r| r.month == month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMonthDetail {
    pub month: Month,
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,
}

/// Averaged conditions of the top month. `temp` is already rescaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMonthStats {
    pub month: Month,
    pub weathersit: f64,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: Column,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Mean/max/min per column, in the order the columns were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Description {
    pub columns: Vec<ColumnStats>,
}

impl Description {
    pub fn get(&self, column: Column) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.column == column)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    pub days: usize,
    pub cnt: u64,
    pub casual: u64,
    pub registered: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: Column,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn peak(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCondition {
    pub month: Month,
    pub weathersit: f64,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
}

/// Everything one dashboard run shows, computed in a single pass over the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: UsageTotals,
    pub season_summary: SeasonSummary,
    pub top_season: TopSeasonDetail,
    pub month_summary: MonthSummary,
    pub top_month: TopMonthDetail,
    pub top_month_stats: TopMonthStats,
    pub top_month_description: Description,
    pub top_month_histograms: Vec<Histogram>,
    pub monthly_conditions: Vec<MonthlyCondition>,
}
