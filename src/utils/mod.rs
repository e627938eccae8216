pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{generate_default_report_filename, report_filename_for};
pub use progress::ProgressReporter;
