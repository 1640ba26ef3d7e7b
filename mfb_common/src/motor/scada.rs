//! Operator-facing data structure of a motor function block.
//!
//! Mirrors the PLC `FB_Motor_SCADA` layout: `feedback` is written by the
//! block every scan, `control` is written by the operator and read by the
//! block. Boolean-semantic control values are `i32` registers because the
//! OPC link cannot write PLC booleans; the block clamps them every scan.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EU_MAX, DEFAULT_EU_MIN, DEFAULT_FAIL_SP_SECS, DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED,
    DEFAULT_RAW_MAX, DEFAULT_RAW_MIN, FAULT_PRIORITY,
};

/// Linear calibration between raw instrument counts and engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalogRange {
    /// Raw value at the lower calibration point.
    pub raw_min: f64,
    /// Raw value at the upper calibration point.
    pub raw_max: f64,
    /// Engineering value at the lower calibration point.
    pub eu_min: f64,
    /// Engineering value at the upper calibration point.
    pub eu_max: f64,
}

impl AnalogRange {
    pub const fn new(raw_min: f64, raw_max: f64, eu_min: f64, eu_max: f64) -> Self {
        Self {
            raw_min,
            raw_max,
            eu_min,
            eu_max,
        }
    }

    /// Raw span (`raw_max - raw_min`).
    #[inline]
    pub fn raw_span(&self) -> f64 {
        self.raw_max - self.raw_min
    }

    /// Engineering span (`eu_max - eu_min`).
    #[inline]
    pub fn eu_span(&self) -> f64 {
        self.eu_max - self.eu_min
    }

    /// True when either span is zero and interpolation is undefined.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.raw_span() == 0.0 || self.eu_span() == 0.0
    }
}

impl Default for AnalogRange {
    /// 4–20 mA card range mapped to 0–100 %.
    fn default() -> Self {
        Self::new(DEFAULT_RAW_MIN, DEFAULT_RAW_MAX, DEFAULT_EU_MIN, DEFAULT_EU_MAX)
    }
}

/// Feedback fields: written by the function block only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorFeedback {
    /// Selector switch in Auto (remote) position.
    pub ma_auto: bool,
    /// Run feedback.
    pub running: bool,
    /// Trip latched.
    pub tripped: bool,
    /// Interlock satisfied (or bypassed).
    pub interlock: bool,
    /// `MotorState` register code.
    pub state: u8,
    /// `Command` register code.
    pub command: u8,
    /// Available for automatic sequencing.
    pub ready: bool,
    /// Sequencing priority, `FAULT_PRIORITY` when not ready.
    pub priority: u8,
    pub fail_to_start: bool,
    pub fail_to_stop: bool,
    /// Fail-to-start counter [s].
    pub start_counter: u32,
    /// Fail-to-stop counter [s].
    pub stop_counter: u32,
    /// Accumulated run hours.
    pub run_hours: u32,
    /// Speed feedback [EU].
    pub speed_feedback: f64,
    /// Effective speed command [%].
    pub speed_output: f64,
}

impl Default for MotorFeedback {
    fn default() -> Self {
        Self {
            ma_auto: false,
            running: false,
            tripped: false,
            interlock: false,
            state: 0,
            command: 0,
            ready: false,
            priority: FAULT_PRIORITY,
            fail_to_start: false,
            fail_to_stop: false,
            start_counter: 0,
            stop_counter: 0,
            run_hours: 0,
            speed_feedback: 0.0,
            speed_output: 0.0,
        }
    }
}

/// Control fields: written by the operator, read by the function block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorControl {
    /// `OperatingMode` register (out-of-range values mean Off).
    pub mode: i32,
    /// Rewrite default setpoints on the next scan.
    pub initialize: i32,
    /// Clear latched faults (one-shot, cleared by the block).
    pub reset: i32,
    /// Force the interlock satisfied.
    pub bypass_interlock: i32,
    /// Substitute the simulated digital inputs below.
    pub simulate: i32,
    pub simulate_ma_auto: i32,
    pub simulate_running: i32,
    pub simulate_trip: i32,
    /// Fail-to-start timeout [s].
    pub fail_to_start_sp: u32,
    /// Fail-to-stop timeout [s].
    pub fail_to_stop_sp: u32,
    /// Minimum allowable speed [%].
    pub min_speed: f64,
    /// Maximum allowable speed [%].
    pub max_speed: f64,
    /// Speed input (SI) analog calibration.
    pub speed_input: AnalogRange,
    /// Speed control (SC) analog calibration.
    pub speed_output: AnalogRange,
    /// Use `manual_override_speed` instead of the automatic speed command.
    pub manual_override: i32,
    /// Operator speed command [%]; mirrors the automatic command when not overriding.
    pub manual_override_speed: f64,
}

impl Default for MotorControl {
    fn default() -> Self {
        Self {
            mode: 0,
            initialize: 0,
            reset: 0,
            bypass_interlock: 0,
            simulate: 0,
            simulate_ma_auto: 0,
            simulate_running: 0,
            simulate_trip: 0,
            fail_to_start_sp: DEFAULT_FAIL_SP_SECS,
            fail_to_stop_sp: DEFAULT_FAIL_SP_SECS,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            speed_input: AnalogRange::default(),
            speed_output: AnalogRange::default(),
            manual_override: 0,
            manual_override_speed: 0.0,
        }
    }
}

/// Complete SCADA view of one function block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorScada {
    pub feedback: MotorFeedback,
    pub control: MotorControl,
}
