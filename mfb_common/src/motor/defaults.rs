//! Per-equipment default setpoints (FB initialization values).
//!
//! Written into the control view on the first scan and whenever the operator
//! requests re-initialization. All fields are optional in TOML.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FAIL_SP_SECS, DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED};

use super::scada::{AnalogRange, MotorControl};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorDefaults {
    /// Fail-to-start timeout [s] (default: 120).
    pub fail_to_start_sp: u32,
    /// Fail-to-stop timeout [s] (default: 120).
    pub fail_to_stop_sp: u32,
    /// Speed input calibration (default: -19200..32000 ↔ 0..100).
    pub speed_input: AnalogRange,
    /// Speed output calibration (default: -19200..32000 ↔ 0..100).
    pub speed_output: AnalogRange,
    /// Minimum allowable speed [%] (default: 40).
    pub min_speed: f64,
    /// Maximum allowable speed [%] (default: 100).
    pub max_speed: f64,
}

impl Default for MotorDefaults {
    fn default() -> Self {
        Self {
            fail_to_start_sp: DEFAULT_FAIL_SP_SECS,
            fail_to_stop_sp: DEFAULT_FAIL_SP_SECS,
            speed_input: AnalogRange::default(),
            speed_output: AnalogRange::default(),
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl MotorDefaults {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.fail_to_start_sp == 0 || self.fail_to_stop_sp == 0 {
            return Err("fail_to_start_sp and fail_to_stop_sp must be > 0".to_string());
        }
        if self.min_speed > self.max_speed {
            return Err(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            ));
        }
        if self.speed_input.is_degenerate() {
            return Err("speed_input calibration has a zero span".to_string());
        }
        if self.speed_output.is_degenerate() {
            return Err("speed_output calibration has a zero span".to_string());
        }
        Ok(())
    }

    /// Write these defaults into the control view.
    pub fn apply(&self, control: &mut MotorControl) {
        control.fail_to_start_sp = self.fail_to_start_sp;
        control.fail_to_stop_sp = self.fail_to_stop_sp;
        control.speed_input = self.speed_input;
        control.speed_output = self.speed_output;
        control.min_speed = self.min_speed;
        control.max_speed = self.max_speed;
    }
}
