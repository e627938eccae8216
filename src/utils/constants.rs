/// De-normalization factor applied to the top month's mean normalized
/// temperature. The dataset documentation does not state the min/max range
/// behind it; confirm with the dataset owner before changing.
pub const TEMPERATURE_SCALE: f64 = 47.0;

/// Normalized column bounds
pub const MIN_NORMALIZED: f64 = 0.0;
pub const MAX_NORMALIZED: f64 = 1.0;

/// Category names used in errors and reports
pub const SEASON_CATEGORY: &str = "season";
pub const MONTH_CATEGORY: &str = "month";

/// Label maps
pub const SEASON_LABELS: [&str; 4] = ["Springer", "Summer", "Fall", "Winter"];
pub const MONTH_LABELS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Input file format
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_INPUT_PATH: &str = "data/day.csv";
pub const DEFAULT_CONFIG_FILE: &str = "bikeshare.toml";
pub const ENV_PREFIX: &str = "BIKESHARE";

/// Processing defaults
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Text rendering
pub const BAR_CHART_WIDTH: usize = 40;
pub const HIGHLIGHT_BAR: char = '#';
pub const PLAIN_BAR: char = '.';
