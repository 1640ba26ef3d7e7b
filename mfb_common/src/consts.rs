//! System-wide constants for the MFB workspace.
//!
//! Single source of truth for priorities, supervision defaults and analog
//! calibration defaults. Imported by all crates; do not duplicate.

use static_assertions::const_assert;

/// Priority reported by any equipment that is not available for sequencing.
pub const FAULT_PRIORITY: u8 = 99;

/// Lowest valid assigned sequencing priority.
pub const MIN_ASSIGNED_PRIORITY: u8 = 1;

/// Highest valid assigned sequencing priority.
pub const MAX_ASSIGNED_PRIORITY: u8 = FAULT_PRIORITY - 1;

/// Default fail-to-start / fail-to-stop supervision setpoint [s].
pub const DEFAULT_FAIL_SP_SECS: u32 = 120;

/// Default raw lower limit of the speed channels (4 mA on the analog card).
pub const DEFAULT_RAW_MIN: f64 = -19200.0;

/// Default raw upper limit of the speed channels (20 mA on the analog card).
pub const DEFAULT_RAW_MAX: f64 = 32000.0;

/// Default engineering-unit lower limit of the speed channels [%].
pub const DEFAULT_EU_MIN: f64 = 0.0;

/// Default engineering-unit upper limit of the speed channels [%].
pub const DEFAULT_EU_MAX: f64 = 100.0;

/// Default minimum allowable speed [%].
pub const DEFAULT_MIN_SPEED: f64 = 40.0;

/// Default maximum allowable speed [%].
pub const DEFAULT_MAX_SPEED: f64 = 100.0;

/// Overshoot/undershoot tolerance on the raw speed input [raw counts].
pub const DEFAULT_SPEED_INPUT_DEADBAND: f64 = 500.0;

/// Default scan period [ms].
pub const DEFAULT_SCAN_TIME_MS: u32 = 100;

/// Upper bound on the configurable scan period [ms].
pub const MAX_SCAN_TIME_MS: u32 = 1000;

/// Seconds per minute for the run-hour totalizer.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour for the run-hour totalizer.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Edge history slots per detector instance.
pub const EDGE_SLOTS: usize = 8;

const_assert!(MIN_ASSIGNED_PRIORITY > 0);
const_assert!(MAX_ASSIGNED_PRIORITY < FAULT_PRIORITY);
const_assert!(DEFAULT_SCAN_TIME_MS <= MAX_SCAN_TIME_MS);
const_assert!(EDGE_SLOTS >= 3);
