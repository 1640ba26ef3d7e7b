//! Prelude module for common re-exports.
//!
//! ```rust
//! use mfb_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{DEFAULT_SCAN_TIME_MS, FAULT_PRIORITY};

// ─── Motor Function Block ───────────────────────────────────────────
pub use crate::motor::defaults::MotorDefaults;
pub use crate::motor::fault::MotorFault;
pub use crate::motor::scada::{AnalogRange, MotorControl, MotorFeedback, MotorScada};
pub use crate::motor::state::{Command, MotorState, OperatingMode};
