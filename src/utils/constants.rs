/// Source column names
pub const COL_DATETIME: &str = "datetime";
pub const COL_SEASON: &str = "season";
pub const COL_WEATHER: &str = "weather";
pub const COL_WORKINGDAY: &str = "workingday";
pub const COL_COUNT: &str = "count";
pub const COL_REGISTERED: &str = "registered";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_DATETIME,
    COL_SEASON,
    COL_WEATHER,
    COL_WORKINGDAY,
    COL_COUNT,
    COL_REGISTERED,
];

/// Timestamp layouts accepted for the `datetime` column, tried in order
pub const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
/// Offset-qualified layouts not covered by RFC 3339. The wall-clock time is
/// kept and the offset dropped.
pub const OFFSET_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open hour bins for day periods: [0,6) [6,12) [12,18) [18,24)
pub const DAY_PERIOD_EDGES: [i32; 5] = [0, 6, 12, 18, 24];

/// z-score of a two-sided 95% normal confidence band
pub const Z_95: f64 = 1.96;

/// Defaults
pub const DEFAULT_SOURCE: &str = "train.csv";
pub const DEFAULT_SETTINGS_FILE: &str = "bikeshare";
pub const SETTINGS_ENV_PREFIX: &str = "BIKESHARE";
pub const DEFAULT_CHART_WIDTH: u32 = 100;
pub const DEFAULT_CHART_HEIGHT: u32 = 30;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
