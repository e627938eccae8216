use crate::error::{AnalyticsError, Result};
use crate::models::{
    Column, ColumnStats, DailyRecord, Dashboard, Description, Histogram, HistogramBin, Month,
    MonthRow, MonthSummary, MonthlyCondition, SeasonRow, SeasonSummary, TopMonthDetail,
    TopMonthStats, TopSeasonDetail, UsageTotals,
};
use crate::utils::constants::{DEFAULT_HISTOGRAM_BINS, TEMPERATURE_SCALE};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, info};

/// Groups records by key, keeping groups in first-seen order.
fn group_by<K, F>(records: &[DailyRecord], key: F) -> Vec<(K, Vec<&DailyRecord>)>
where
    K: Copy + Eq + Hash,
    F: Fn(&DailyRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&DailyRecord>)> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }

    groups
}

fn mean_of(records: &[&DailyRecord], column: Column) -> f64 {
    if records.is_empty() {
        return f64::NAN;
    }
    records.iter().map(|r| r.value(column)).sum::<f64>() / records.len() as f64
}

/// Aggregation and reporting over the daily usage dataset.
///
/// All operations are pure: the analyzer only carries the temperature scale
/// and histogram resolution used when building reports.
pub struct UsageAnalyzer {
    temperature_scale: f64,
    histogram_bins: usize,
}

impl UsageAnalyzer {
    pub fn new() -> Self {
        Self {
            temperature_scale: TEMPERATURE_SCALE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    pub fn with_temperature_scale(mut self, scale: f64) -> Self {
        self.temperature_scale = scale;
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn temperature_scale(&self) -> f64 {
        self.temperature_scale
    }

    /// Sum `cnt`, `casual` and `registered` per season, largest `cnt` first.
    ///
    /// The sort is stable, so seasons with equal totals keep the order in
    /// which they first appear in `records`.
    pub fn summarize_by_season(&self, records: &[DailyRecord]) -> SeasonSummary {
        let mut rows: Vec<SeasonRow> = group_by(records, |r| r.season)
            .into_iter()
            .map(|(season, group)| SeasonRow {
                season,
                cnt: group.iter().map(|r| r.cnt).sum(),
                casual: group.iter().map(|r| r.casual).sum(),
                registered: group.iter().map(|r| r.registered).sum(),
            })
            .collect();

        rows.sort_by(|a, b| b.cnt.cmp(&a.cnt));
        debug!("Summarized {} records into {} seasons", records.len(), rows.len());

        SeasonSummary { rows }
    }

    /// Season with the largest `cnt`; the earliest row wins a tie.
    pub fn top_season(&self, summary: &SeasonSummary) -> Result<TopSeasonDetail> {
        let top = summary
            .rows
            .iter()
            .reduce(|best, row| if row.cnt > best.cnt { row } else { best })
            .ok_or_else(|| AnalyticsError::empty_input("season summary has no rows"))?;

        Ok(TopSeasonDetail {
            season: top.season,
            cnt: top.cnt,
            casual: top.casual,
            registered: top.registered,
        })
    }

    /// Sum the counts and average the conditions per month, largest `cnt` first.
    pub fn summarize_by_month(&self, records: &[DailyRecord]) -> MonthSummary {
        let mut rows: Vec<MonthRow> = group_by(records, |r| r.month)
            .into_iter()
            .map(|(month, group)| MonthRow {
                month,
                cnt: group.iter().map(|r| r.cnt).sum(),
                casual: group.iter().map(|r| r.casual).sum(),
                registered: group.iter().map(|r| r.registered).sum(),
                weathersit: mean_of(&group, Column::Weathersit),
                temp: mean_of(&group, Column::Temp),
                hum: mean_of(&group, Column::Hum),
                windspeed: mean_of(&group, Column::Windspeed),
            })
            .collect();

        rows.sort_by(|a, b| b.cnt.cmp(&a.cnt));
        debug!("Summarized {} records into {} months", records.len(), rows.len());

        MonthSummary { rows }
    }

    /// Month with the largest `cnt`, as a count breakdown and as averaged
    /// conditions with the temperature rescaled.
    pub fn top_month(&self, summary: &MonthSummary) -> Result<(TopMonthDetail, TopMonthStats)> {
        let top = summary
            .rows
            .iter()
            .reduce(|best, row| if row.cnt > best.cnt { row } else { best })
            .ok_or_else(|| AnalyticsError::empty_input("month summary has no rows"))?;

        let detail = TopMonthDetail {
            month: top.month,
            cnt: top.cnt,
            casual: top.casual,
            registered: top.registered,
        };

        let stats = TopMonthStats {
            month: top.month,
            weathersit: top.weathersit,
            temp: top.temp * self.temperature_scale,
            hum: top.hum,
            windspeed: top.windspeed,
        };

        Ok((detail, stats))
    }

    pub fn filter_by_month(&self, records: &[DailyRecord], month: Month) -> Vec<DailyRecord> {
        records
            .iter()
            .filter(|r| r.month == month)
            .cloned()
            .collect()
    }

    /// Mean, max and min of each requested column.
    pub fn describe(&self, records: &[DailyRecord], columns: &[Column]) -> Result<Description> {
        if records.is_empty() {
            return Err(AnalyticsError::empty_input(
                "cannot describe columns of an empty record set",
            ));
        }

        let columns = columns
            .iter()
            .map(|&column| {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                let mut sum = 0.0f64;

                for record in records {
                    let value = record.value(column);
                    // f64::min/max would skip NaN
                    if value.is_nan() || min.is_nan() {
                        min = f64::NAN;
                        max = f64::NAN;
                    } else {
                        min = min.min(value);
                        max = max.max(value);
                    }
                    sum += value;
                }

                ColumnStats {
                    column,
                    mean: sum / records.len() as f64,
                    max,
                    min,
                }
            })
            .collect();

        Ok(Description { columns })
    }

    pub fn totals(&self, records: &[DailyRecord]) -> UsageTotals {
        records.iter().fold(
            UsageTotals {
                days: records.len(),
                ..UsageTotals::default()
            },
            |mut totals, r| {
                totals.cnt += r.cnt;
                totals.casual += r.casual;
                totals.registered += r.registered;
                totals
            },
        )
    }

    /// Equal-width histogram of one column.
    ///
    /// The maximum value lands in the last bin. A constant column produces
    /// a single bin holding every record.
    pub fn histogram(
        &self,
        records: &[DailyRecord],
        column: Column,
        bins: usize,
    ) -> Result<Histogram> {
        if bins == 0 {
            return Err(AnalyticsError::Config(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if records.is_empty() {
            return Err(AnalyticsError::empty_input(format!(
                "cannot build a {} histogram from an empty record set",
                column
            )));
        }

        let values: Vec<f64> = records.iter().map(|r| r.value(column)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Ok(Histogram {
                column,
                min,
                max,
                bins: vec![HistogramBin {
                    lower: min,
                    upper: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        // The maximum is clamped into the last bin
        for value in values {
            let slot = (((value - min) / width) as usize).min(bins - 1);
            counts[slot] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * i as f64,
                upper: min + width * (i + 1) as f64,
                count,
            })
            .collect();

        Ok(Histogram {
            column,
            min,
            max,
            bins,
        })
    }

    /// Mean conditions per month in calendar order.
    pub fn monthly_conditions(&self, records: &[DailyRecord]) -> Vec<MonthlyCondition> {
        let mut conditions: Vec<MonthlyCondition> = group_by(records, |r| r.month)
            .into_iter()
            .map(|(month, group)| MonthlyCondition {
                month,
                weathersit: mean_of(&group, Column::Weathersit),
                temp: mean_of(&group, Column::Temp),
                hum: mean_of(&group, Column::Hum),
                windspeed: mean_of(&group, Column::Windspeed),
            })
            .collect();

        conditions.sort_by_key(|c| c.month.calendar_order());
        conditions
    }

    /// Run the whole pipeline over one dataset.
    pub fn build_dashboard(&self, records: &[DailyRecord]) -> Result<Dashboard> {
        if records.is_empty() {
            return Err(AnalyticsError::empty_input("dataset has no records"));
        }

        // Rank seasons and months
        let season_summary = self.summarize_by_season(records);
        let top_season = self.top_season(&season_summary)?;
        let month_summary = self.summarize_by_month(records);
        let (top_month, top_month_stats) = self.top_month(&month_summary)?;

        // Drill into the busiest month
        let top_month_records = self.filter_by_month(records, top_month.month);
        let top_month_description = self.describe(&top_month_records, &Column::CONDITIONS)?;
        let top_month_histograms = Column::CONDITIONS
            .iter()
            .map(|&column| self.histogram(&top_month_records, column, self.histogram_bins))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Top season: {} ({} rides), top month: {} ({} rides)",
            top_season.season, top_season.cnt, top_month.month, top_month.cnt
        );

        Ok(Dashboard {
            totals: self.totals(records),
            season_summary,
            top_season,
            month_summary,
            top_month,
            top_month_stats,
            top_month_description,
            top_month_histograms,
            monthly_conditions: self.monthly_conditions(records),
        })
    }
}

impl Default for UsageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecordBuilder, Season};
    use chrono::NaiveDate;

    fn record(season: Season, month: Month, casual: u64, registered: u64) -> DailyRecord {
        DailyRecordBuilder::new()
            .date(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap())
            .season(season)
            .month(month)
            .riders(casual, registered)
            .build()
            .unwrap()
    }

    fn with_conditions(month: Month, temp: f64, hum: f64, cnt: u64) -> DailyRecord {
        DailyRecordBuilder::new()
            .date(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap())
            .season(Season::Fall)
            .month(month)
            .riders(0, cnt)
            .conditions(2, temp, hum, 0.1)
            .build()
            .unwrap()
    }

    fn four_seasons() -> Vec<DailyRecord> {
        vec![
            record(Season::Springer, Month::Maret, 40, 60),
            record(Season::Summer, Month::Juni, 100, 200),
            record(Season::Fall, Month::September, 10, 40),
            record(Season::Winter, Month::Desember, 5, 5),
        ]
    }

    #[test]
    fn test_summarize_by_season_orders_by_cnt() {
        let analyzer = UsageAnalyzer::new();
        let summary = analyzer.summarize_by_season(&four_seasons());

        let order: Vec<(Season, u64)> = summary.rows.iter().map(|r| (r.season, r.cnt)).collect();
        assert_eq!(
            order,
            vec![
                (Season::Summer, 300),
                (Season::Springer, 100),
                (Season::Fall, 50),
                (Season::Winter, 10),
            ]
        );

        let top = analyzer.top_season(&summary).unwrap();
        assert_eq!(
            top,
            TopSeasonDetail {
                season: Season::Summer,
                cnt: 300,
                casual: 100,
                registered: 200,
            }
        );
    }

    #[test]
    fn test_season_rows_partition_dataset() {
        let mut records = four_seasons();
        records.push(record(Season::Summer, Month::Juli, 7, 13));
        records.push(record(Season::Unrecognized(9), Month::Juli, 1, 1));

        let summary = UsageAnalyzer::new().summarize_by_season(&records);

        assert_eq!(summary.len(), 5);
        assert_eq!(summary.total_cnt(), records.iter().map(|r| r.cnt).sum::<u64>());
        assert_eq!(
            summary.total_casual(),
            records.iter().map(|r| r.casual).sum::<u64>()
        );
        assert_eq!(
            summary.total_registered(),
            records.iter().map(|r| r.registered).sum::<u64>()
        );
        assert_eq!(summary.get(Season::Summer).unwrap().cnt, 320);
        assert_eq!(summary.get(Season::Unrecognized(9)).unwrap().cnt, 2);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record(Season::Winter, Month::Januari, 10, 10),
            record(Season::Fall, Month::Oktober, 5, 15),
            record(Season::Springer, Month::April, 1, 1),
        ];

        let analyzer = UsageAnalyzer::new();
        let summary = analyzer.summarize_by_season(&records);

        assert_eq!(summary.rows[0].season, Season::Winter);
        assert_eq!(summary.rows[1].season, Season::Fall);
        assert_eq!(analyzer.top_season(&summary).unwrap().season, Season::Winter);
    }

    #[test]
    fn test_month_ties_keep_first_seen_order() {
        let records = vec![
            with_conditions(Month::Oktober, 0.2, 0.5, 5),
            with_conditions(Month::Maret, 0.4, 0.5, 30),
            with_conditions(Month::Januari, 0.6, 0.5, 30),
            with_conditions(Month::Oktober, 0.2, 0.5, 25),
        ];

        let analyzer = UsageAnalyzer::new();
        let summary = analyzer.summarize_by_month(&records);

        let order: Vec<(Month, u64)> = summary.rows.iter().map(|r| (r.month, r.cnt)).collect();
        assert_eq!(
            order,
            vec![
                (Month::Oktober, 30),
                (Month::Maret, 30),
                (Month::Januari, 30),
            ]
        );

        let (detail, stats) = analyzer.top_month(&summary).unwrap();
        assert_eq!(detail.month, Month::Oktober);
        assert!((stats.temp - 0.2 * TEMPERATURE_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_top_month_ignores_row_order() {
        let summary = MonthSummary {
            rows: vec![
                MonthRow {
                    month: Month::Februari,
                    cnt: 10,
                    casual: 0,
                    registered: 10,
                    weathersit: 1.0,
                    temp: 0.1,
                    hum: 0.5,
                    windspeed: 0.1,
                },
                MonthRow {
                    month: Month::Juli,
                    cnt: 90,
                    casual: 0,
                    registered: 90,
                    weathersit: 1.0,
                    temp: 0.8,
                    hum: 0.5,
                    windspeed: 0.1,
                },
                MonthRow {
                    month: Month::Mei,
                    cnt: 90,
                    casual: 0,
                    registered: 90,
                    weathersit: 1.0,
                    temp: 0.6,
                    hum: 0.5,
                    windspeed: 0.1,
                },
            ],
        };

        let (detail, _) = UsageAnalyzer::new().top_month(&summary).unwrap();
        assert_eq!(detail.month, Month::Juli);
    }

    #[test]
    fn test_unrecognized_month_forms_its_own_group() {
        let records = vec![
            with_conditions(Month::Juni, 0.5, 0.5, 40),
            with_conditions(Month::Unrecognized(13), 0.3, 0.4, 70),
            with_conditions(Month::Juni, 0.5, 0.5, 20),
            with_conditions(Month::Unrecognized(13), 0.5, 0.6, 10),
        ];

        let analyzer = UsageAnalyzer::new();
        let summary = analyzer.summarize_by_month(&records);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.rows.iter().map(|r| r.cnt).sum::<u64>(), 140);
        assert_eq!(summary.rows[0].month, Month::Unrecognized(13));
        assert_eq!(summary.rows[0].cnt, 80);
        assert!((summary.rows[0].temp - 0.4).abs() < 1e-9);
        assert_eq!(summary.rows[1].month, Month::Juni);

        let (detail, _) = analyzer.top_month(&summary).unwrap();
        assert_eq!(detail.month, Month::Unrecognized(13));
        assert_eq!(analyzer.filter_by_month(&records, detail.month).len(), 2);
    }

    #[test]
    fn test_top_of_empty_summary_fails() {
        let analyzer = UsageAnalyzer::new();
        let season = analyzer.top_season(&SeasonSummary::default());
        assert!(season.unwrap_err().is_empty_input());

        let month = analyzer.top_month(&MonthSummary::default());
        assert!(month.unwrap_err().is_empty_input());
    }

    #[test]
    fn test_summarize_by_month_averages_conditions() {
        let records = vec![
            with_conditions(Month::Agustus, 0.4, 0.6, 100),
            with_conditions(Month::Januari, 0.1, 0.5, 20),
            with_conditions(Month::Agustus, 0.6, 0.8, 300),
        ];

        let summary = UsageAnalyzer::new().summarize_by_month(&records);

        assert_eq!(summary.len(), 2);
        let top = &summary.rows[0];
        assert_eq!(top.month, Month::Agustus);
        assert_eq!(top.cnt, 400);
        assert!((top.temp - 0.5).abs() < 1e-9);
        assert!((top.hum - 0.7).abs() < 1e-9);
        assert_eq!(top.weathersit, 2.0);
        assert_eq!(summary.rows[1].month, Month::Januari);
    }

    #[test]
    fn test_top_month_rescales_temperature() {
        let records = vec![
            with_conditions(Month::Agustus, 0.4, 0.6, 100),
            with_conditions(Month::Agustus, 0.6, 0.8, 300),
        ];

        let analyzer = UsageAnalyzer::new();
        let summary = analyzer.summarize_by_month(&records);
        let (detail, stats) = analyzer.top_month(&summary).unwrap();

        assert_eq!(detail.month, Month::Agustus);
        assert_eq!(detail.cnt, 400);
        assert_eq!(stats.month, Month::Agustus);
        assert!((stats.temp - 23.5).abs() < 1e-9);
        assert!((stats.hum - 0.7).abs() < 1e-9);

        let custom = UsageAnalyzer::new().with_temperature_scale(10.0);
        let (_, stats) = custom.top_month(&summary).unwrap();
        assert!((stats.temp - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_by_month_preserves_order() {
        let records = vec![
            with_conditions(Month::Agustus, 0.1, 0.1, 1),
            with_conditions(Month::Juli, 0.2, 0.2, 2),
            with_conditions(Month::Agustus, 0.3, 0.3, 3),
        ];

        let analyzer = UsageAnalyzer::new();
        let august = analyzer.filter_by_month(&records, Month::Agustus);
        assert_eq!(august, vec![records[0].clone(), records[2].clone()]);

        assert!(analyzer.filter_by_month(&records, Month::Mei).is_empty());
    }

    #[test]
    fn test_describe() {
        let records = vec![
            with_conditions(Month::Agustus, 0.2, 0.5, 1),
            with_conditions(Month::Agustus, 0.8, 0.7, 2),
        ];

        let analyzer = UsageAnalyzer::new();
        let description = analyzer
            .describe(&records, &[Column::Temp, Column::Cnt])
            .unwrap();

        assert_eq!(description.columns.len(), 2);
        assert_eq!(description.columns[0].column, Column::Temp);
        let temp = description.get(Column::Temp).unwrap();
        assert!((temp.mean - 0.5).abs() < 1e-9);
        assert_eq!(temp.max, 0.8);
        assert_eq!(temp.min, 0.2);
        let cnt = description.get(Column::Cnt).unwrap();
        assert_eq!(cnt.mean, 1.5);

        let empty = analyzer.describe(&[], &Column::CONDITIONS);
        assert!(empty.unwrap_err().is_empty_input());
    }

    #[test]
    fn test_describe_carries_nan_into_min_and_max() {
        let clean = with_conditions(Month::Agustus, 0.2, 0.5, 1);
        let broken = DailyRecord {
            temp: f64::NAN,
            ..with_conditions(Month::Agustus, 0.8, 0.7, 2)
        };

        let description = UsageAnalyzer::new()
            .describe(&[clean, broken], &[Column::Temp, Column::Hum])
            .unwrap();

        let temp = description.get(Column::Temp).unwrap();
        assert!(temp.mean.is_nan());
        assert!(temp.min.is_nan());
        assert!(temp.max.is_nan());

        let hum = description.get(Column::Hum).unwrap();
        assert_eq!(hum.min, 0.5);
        assert_eq!(hum.max, 0.7);
    }

    #[test]
    fn test_histogram_bins() {
        let records: Vec<DailyRecord> = [0.0, 0.1, 0.5, 0.9, 1.0]
            .iter()
            .map(|&t| with_conditions(Month::Agustus, t, 0.5, 1))
            .collect();

        let analyzer = UsageAnalyzer::new();
        let histogram = analyzer.histogram(&records, Column::Temp, 2).unwrap();

        assert_eq!(histogram.bins.len(), 2);
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[1].count, 3);
        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.bins[1].upper, 1.0);

        let constant = analyzer.histogram(&records, Column::Hum, 4).unwrap();
        assert_eq!(constant.bins.len(), 1);
        assert_eq!(constant.peak(), 5);

        assert!(analyzer.histogram(&records, Column::Temp, 0).is_err());
        assert!(analyzer.histogram(&[], Column::Temp, 3).is_err());
    }

    #[test]
    fn test_monthly_conditions_in_calendar_order() {
        let records = vec![
            with_conditions(Month::Desember, 0.2, 0.5, 1),
            with_conditions(Month::Februari, 0.3, 0.5, 1),
            with_conditions(Month::Desember, 0.4, 0.5, 1),
        ];

        let conditions = UsageAnalyzer::new().monthly_conditions(&records);

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].month, Month::Februari);
        assert_eq!(conditions[1].month, Month::Desember);
        assert!((conditions[1].temp - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_build_dashboard() {
        let mut records = four_seasons();
        records.push(with_conditions(Month::Juni, 0.5, 0.5, 50));

        let dashboard = UsageAnalyzer::new().build_dashboard(&records).unwrap();

        assert_eq!(dashboard.totals.days, 5);
        assert_eq!(dashboard.totals.cnt, 510);
        assert_eq!(dashboard.top_season.season, Season::Summer);
        assert_eq!(dashboard.top_month.month, Month::Juni);
        assert_eq!(dashboard.top_month.cnt, 350);
        assert_eq!(dashboard.top_month_description.columns.len(), 4);
        assert_eq!(dashboard.top_month_histograms.len(), 4);
        assert_eq!(dashboard.monthly_conditions.len(), 4);

        let empty = UsageAnalyzer::new().build_dashboard(&[]);
        assert!(empty.unwrap_err().is_empty_input());
    }
}
