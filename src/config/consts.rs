// src/config/consts.rs

// Local data
pub const DATA_DIR: &str = "data";
pub const DATA_FILE: &str = "data.json";
pub const LOG_FILE: &str = "debug.log";

// Report
pub const REPORT_PREFIX: &str = "report-";
pub const REPORT_EXT: &str = "txt";
pub const REPORT_TOP_N: usize = 15;
pub const REPORT_RULE_WIDTH: usize = 57;

// Ranking
pub const TOP_N: usize = 15;

// Net
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Concurrency
pub const WORKERS: usize = 5;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
