use crate::error::{AnalyticsError, Result};
use crate::models::{DailyRecord, Month, RawDayRow, Season};
use crate::utils::constants::{DATE_FORMAT, DEFAULT_BUFFER_SIZE};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads `day.csv` and applies the season/month label maps.
pub struct DayReader {
    strict_categories: bool,
}

impl DayReader {
    pub fn new() -> Self {
        Self {
            strict_categories: false,
        }
    }

    /// Fail on season/month codes outside the label maps instead of passing them through.
    pub fn with_strict_categories(strict_categories: bool) -> Self {
        Self { strict_categories }
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<DailyRecord>> {
        info!("Reading daily records from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let records = self.read_from_reader(reader)?;
        info!("Loaded {} daily records", records.len());
        Ok(records)
    }

    pub fn read_from_reader<R: Read>(&self, reader: R) -> Result<Vec<DailyRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut passthrough_rows = 0usize;

        for (index, row) in csv_reader.deserialize::<RawDayRow>().enumerate() {
            // Header is line 1
            let line = index + 2;
            let record = self.convert_row(row?, line)?;

            if !record.has_recognized_categories() {
                passthrough_rows += 1;
                debug!(
                    "Line {}: passing through season {} / month {}",
                    line, record.season, record.month
                );
            }

            records.push(record);
        }

        if passthrough_rows > 0 {
            warn!(
                "{} rows carry season or month codes outside the label maps",
                passthrough_rows
            );
        }

        Ok(records)
    }

    fn convert_row(&self, row: RawDayRow, line: usize) -> Result<DailyRecord> {
        let date = NaiveDate::parse_from_str(&row.dteday, DATE_FORMAT).map_err(|_| {
            AnalyticsError::InvalidFormat(format!(
                "Invalid date '{}' on line {}",
                row.dteday, line
            ))
        })?;

        let (season, month) = if self.strict_categories {
            (
                Season::from_code_strict(row.season)?,
                Month::from_code_strict(row.mnth)?,
            )
        } else {
            (Season::from_code(row.season), Month::from_code(row.mnth))
        };

        Ok(DailyRecord {
            instant: row.instant,
            date,
            season,
            year: row.yr,
            month,
            holiday: row.holiday != 0,
            weekday: row.weekday,
            workingday: row.workingday != 0,
            weathersit: row.weathersit,
            temp: row.temp,
            atemp: row.atemp,
            hum: row.hum,
            windspeed: row.windspeed,
            casual: row.casual,
            registered: row.registered,
            cnt: row.cnt,
        })
    }
}

impl Default for DayReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    #[test]
    fn test_read_from_reader() {
        let data = format!(
            "{}\n\
            1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985\n\
            2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801\n",
            HEADER
        );

        let records = DayReader::new().read_from_reader(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].season, Season::Springer);
        assert_eq!(records[0].month, Month::Januari);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert!(!records[0].workingday);
        assert_eq!(records[1].cnt, 801);
        assert!(records.iter().all(|r| r.has_consistent_counts()));
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        let data = format!(
            "{}\n1,2011-01-01,5,0,13,0,6,0,2,0.3,0.3,0.8,0.1,1,2,3\n",
            HEADER
        );

        let records = DayReader::new().read_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].season, Season::Unrecognized(5));
        assert_eq!(records[0].month, Month::Unrecognized(13));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_codes() {
        let data = format!(
            "{}\n1,2011-01-01,5,0,1,0,6,0,2,0.3,0.3,0.8,0.1,1,2,3\n",
            HEADER
        );

        let result = DayReader::with_strict_categories(true).read_from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(AnalyticsError::UnrecognizedCategory { code: 5, .. })
        ));
    }

    #[test]
    fn test_invalid_date_names_line() {
        let data = format!(
            "{}\n1,01/01/2011,1,0,1,0,6,0,2,0.3,0.3,0.8,0.1,1,2,3\n",
            HEADER
        );

        let err = DayReader::new()
            .read_from_reader(data.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_records_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "214, 2011-08-02, 3, 0, 8, 0, 2, 1, 1, 0.783333, 0.707071, 0.49125, 0.20585, 1017, 3583, 4600"
        )?;

        let records = DayReader::new().read_records(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month, Month::Agustus);
        assert_eq!(records[0].season, Season::Fall);
        assert_eq!(records[0].cnt, 4600);

        Ok(())
    }
}
