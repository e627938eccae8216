use crate::models::DailyRecord;
use crate::utils::constants::{MAX_NORMALIZED, MIN_NORMALIZED};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub count_mismatches: usize,
    pub out_of_range_records: usize,
    pub unrecognized_records: usize,
    pub duplicate_dates: usize,
    pub violations: Vec<RecordViolation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RecordViolation {
    pub instant: u32,
    pub date: NaiveDate,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    CountMismatch,
    OutOfRange,
    UnrecognizedCategory,
    DuplicateDate,
}

/// Data-quality checks over loaded records. Problems are collected, never raised.
pub struct IntegrityChecker {
    max_reported: usize,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self { max_reported: 10 }
    }

    pub fn with_max_reported(max_reported: usize) -> Self {
        Self { max_reported }
    }

    pub fn check_integrity(&self, records: &[DailyRecord]) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_records: records.len(),
            valid_records: 0,
            count_mismatches: 0,
            out_of_range_records: 0,
            unrecognized_records: 0,
            duplicate_dates: 0,
            violations: Vec::new(),
        };

        let mut seen_dates: HashMap<NaiveDate, u32> = HashMap::new();

        for record in records {
            let before = report.violations.len();

            self.check_counts(record, &mut report);
            self.check_normalized_ranges(record, &mut report);
            self.check_categories(record, &mut report);

            if let Some(first) = seen_dates.insert(record.date, record.instant) {
                report.duplicate_dates += 1;
                report.violations.push(RecordViolation {
                    instant: record.instant,
                    date: record.date,
                    violation_type: ViolationType::DuplicateDate,
                    details: format!("date already used by record {}", first),
                });
            }

            if report.violations.len() == before {
                report.valid_records += 1;
            }
        }

        if !report.is_clean() {
            warn!(
                "Integrity check found {} violations in {} records",
                report.violations.len(),
                report.total_records
            );
        }

        report
    }

    fn check_counts(&self, record: &DailyRecord, report: &mut IntegrityReport) {
        if !record.has_consistent_counts() {
            report.count_mismatches += 1;
            report.violations.push(RecordViolation {
                instant: record.instant,
                date: record.date,
                violation_type: ViolationType::CountMismatch,
                details: format!(
                    "cnt {} != casual {} + registered {}",
                    record.cnt, record.casual, record.registered
                ),
            });
        }
    }

    fn check_normalized_ranges(&self, record: &DailyRecord, report: &mut IntegrityReport) {
        let mut fields: Vec<String> = match record.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
        };

        // NaN slips past the range validators
        fields.extend(record.non_finite_fields().into_iter().map(String::from));
        fields.sort_unstable();
        fields.dedup();

        if !fields.is_empty() {
            report.out_of_range_records += 1;

            report.violations.push(RecordViolation {
                instant: record.instant,
                date: record.date,
                violation_type: ViolationType::OutOfRange,
                details: format!(
                    "{} outside [{}, {}]",
                    fields.join(", "),
                    MIN_NORMALIZED,
                    MAX_NORMALIZED
                ),
            });
        }
    }

    fn check_categories(&self, record: &DailyRecord, report: &mut IntegrityReport) {
        if !record.has_recognized_categories() {
            report.unrecognized_records += 1;
            report.violations.push(RecordViolation {
                instant: record.instant,
                date: record.date,
                violation_type: ViolationType::UnrecognizedCategory,
                details: format!("season {} / month {}", record.season, record.month),
            });
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();
        let pct = |n: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.total_records as f64
            }
        };

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Valid Records: {} ({:.1}%)\n",
            report.valid_records,
            pct(report.valid_records)
        ));
        summary.push_str(&format!(
            "Count Mismatches: {} ({:.1}%)\n",
            report.count_mismatches,
            pct(report.count_mismatches)
        ));
        summary.push_str(&format!(
            "Out Of Range Records: {} ({:.1}%)\n",
            report.out_of_range_records,
            pct(report.out_of_range_records)
        ));
        summary.push_str(&format!(
            "Unrecognized Categories: {}\n",
            report.unrecognized_records
        ));
        summary.push_str(&format!("Duplicate Dates: {}\n", report.duplicate_dates));
        summary.push_str(&format!("\nViolations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str(&format!("\nTop {} Violations:\n", self.max_reported));
            for (i, violation) in report
                .violations
                .iter()
                .take(self.max_reported)
                .enumerate()
            {
                summary.push_str(&format!(
                    "  {}. Record {} on {}: {}\n",
                    i + 1,
                    violation.instant,
                    violation.date,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
