//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Fiscal calendar (April-March, not configurable)
pub const FISCAL_YEAR_START_MONTH: u32 = 4;
pub const MONTHS_PER_FISCAL_YEAR: usize = 12;

// Month key wire format
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Probability brackets (inclusive lower bounds)
pub const PROBABILITY_HIGH_MIN: u8 = 80;
pub const PROBABILITY_MEDIUM_MIN: u8 = 50;
pub const PROBABILITY_LOW_MIN: u8 = 25;
pub const PROBABILITY_MAX: u8 = 100;

// Default bracket weights, integer percent of full value
pub const DEFAULT_WEIGHT_HIGH: u8 = 100;
pub const DEFAULT_WEIGHT_MEDIUM: u8 = 70;
pub const DEFAULT_WEIGHT_LOW: u8 = 40;
pub const DEFAULT_WEIGHT_UNCERTAIN: u8 = 10;

// Utilization bands (upper bounds, inclusive)
pub const UTILIZATION_LOW_MAX: u32 = 49;
pub const UTILIZATION_MEDIUM_MAX: u32 = 80;
pub const UTILIZATION_HIGH_MAX: u32 = 100;

// Resource matrix window around the current month
pub const DEFAULT_MATRIX_MONTHS_BEFORE: u32 = 2;
pub const DEFAULT_MATRIX_MONTHS_AFTER: u32 = 6;

// Display conversion: 1 man-yen = 10,000 yen
pub const MAN_YEN_DIVISOR: u64 = 10_000;

// Placeholders
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown";
pub const DEFAULT_ACTOR: &str = "current_user";
