//! Variable-speed drive function block.
//!
//! `VsdMotor` owns a [`MotorCore`] and runs it first every scan, then:
//!
//! - **Speed command**: selects the operator override or the automatic
//!   command [%], clamps it to the speed-output EU bounds and, while the
//!   motor is commanded to start, scales it to the raw analog output. The
//!   raw value is held inside the min/max speed window unless the operator
//!   overrides. Stopped motors get a raw output of 0.
//! - **Speed feedback**: while running, scales the raw speed reading into
//!   EU for the feedback field and the rounded frequency output. Readings
//!   beyond the calibrated range plus the deadband are replaced with the
//!   raw maximum on either side.

use mfb_common::consts::DEFAULT_SPEED_INPUT_DEADBAND;
use mfb_common::motor::defaults::MotorDefaults;
use mfb_common::motor::scada::MotorScada;

use crate::analog::{eu_to_raw, limit, raw_to_eu, to_register};

use super::motor::{MotorCore, MotorInputs, MotorOutputs};

/// Field inputs of a VSD motor for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VsdInputs {
    pub motor: MotorInputs,
    /// Raw speed reading from the analog input card.
    pub speed_raw: i32,
    /// Automatic speed command from the control loop [%].
    pub speed_command: f64,
}

/// Outputs of a VSD motor after a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VsdOutputs {
    pub motor: MotorOutputs,
    /// Raw analog speed output.
    pub speed_control: i32,
    /// Speed feedback rounded to whole EU (Hz).
    pub frequency: i32,
}

#[derive(Debug, Clone)]
pub struct VsdMotor {
    core: MotorCore,
    deadband: f64,
    speed_percent: f64,
    speed_control: i32,
    frequency: i32,
}

impl VsdMotor {
    pub fn new(name: impl Into<String>, assigned_priority: u8) -> Self {
        Self::from_core(MotorCore::new(name, assigned_priority))
    }

    pub fn with_defaults(
        name: impl Into<String>,
        assigned_priority: u8,
        defaults: MotorDefaults,
    ) -> Self {
        Self::from_core(MotorCore::with_defaults(name, assigned_priority, defaults))
    }

    pub fn from_core(core: MotorCore) -> Self {
        Self {
            core,
            deadband: DEFAULT_SPEED_INPUT_DEADBAND,
            speed_percent: 0.0,
            speed_control: 0,
            frequency: 0,
        }
    }

    /// Override the speed input overshoot/undershoot deadband [raw counts].
    pub fn with_deadband(mut self, deadband: f64) -> Self {
        self.deadband = deadband;
        self
    }

    #[inline]
    pub const fn core(&self) -> &MotorCore {
        &self.core
    }

    #[inline]
    pub const fn scada(&self) -> &MotorScada {
        self.core.scada()
    }

    #[inline]
    pub fn scada_mut(&mut self) -> &mut MotorScada {
        self.core.scada_mut()
    }

    #[inline]
    pub const fn deadband(&self) -> f64 {
        self.deadband
    }

    /// Effective speed command of the last scan [%].
    #[inline]
    pub const fn speed_percent(&self) -> f64 {
        self.speed_percent
    }

    /// Outputs of the last scan.
    pub const fn outputs(&self) -> VsdOutputs {
        VsdOutputs {
            motor: self.core.outputs(),
            speed_control: self.speed_control,
            frequency: self.frequency,
        }
    }

    /// Execute one scan: motor logic first, then the speed paths.
    pub fn execute(&mut self, inputs: &VsdInputs) -> VsdOutputs {
        self.core.execute(&inputs.motor);
        self.drive_speed_command(inputs.speed_command);
        self.read_speed_feedback(inputs.speed_raw);
        self.outputs()
    }

    fn drive_speed_command(&mut self, auto_command: f64) {
        let start = self.core.command().is_start();
        let control = &mut self.core.scada_mut().control;
        let overridden = control.manual_override >= 1;

        let requested = if overridden {
            control.manual_override_speed
        } else {
            control.manual_override_speed = auto_command;
            auto_command
        };

        let range = control.speed_output;
        let percent = limit(requested, range.eu_min, range.eu_max);
        control.manual_override_speed =
            limit(control.manual_override_speed, range.eu_min, range.eu_max);

        let raw = if start {
            let raw = eu_to_raw(&range, percent);
            if overridden {
                raw
            } else {
                let min_raw = eu_to_raw(&range, control.min_speed);
                let max_raw = eu_to_raw(&range, control.max_speed);
                limit(raw, min_raw, max_raw)
            }
        } else {
            0.0
        };

        self.speed_percent = percent;
        self.speed_control = to_register(raw);
        self.core.scada_mut().feedback.speed_output = percent;
    }

    fn read_speed_feedback(&mut self, speed_raw: i32) {
        let running = self.core.running();
        let deadband = self.deadband;
        let scada = self.core.scada_mut();

        if !running {
            scada.feedback.speed_feedback = 0.0;
            self.frequency = 0;
            return;
        }

        let range = scada.control.speed_input;
        let mut raw = f64::from(speed_raw);
        if raw > range.raw_max + deadband {
            raw = range.raw_max;
        } else if raw < range.raw_min - deadband {
            // Undershoot is replaced with the raw maximum as well.
            raw = range.raw_max;
        }

        let speed = raw_to_eu(&range, raw);
        scada.feedback.speed_feedback = speed;
        self.frequency = to_register(speed);
    }
}
