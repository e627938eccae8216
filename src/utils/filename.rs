use chrono::{Datelike, Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Report filename for a given day: bikeshare-report-{YYMMDD}.json
pub fn report_filename_for(date: NaiveDate) -> String {
    format!(
        "bikeshare-report-{:02}{:02}{:02}.json",
        date.year() % 100,
        date.month(),
        date.day()
    )
}

/// Default JSON report path under `output_dir`, stamped with today's date.
pub fn generate_default_report_filename(output_dir: &Path) -> PathBuf {
    output_dir.join(report_filename_for(Local::now().date_naive()))
}
