//! Simulated field drive.
//!
//! Stands in for the contactor/VSD and its I/O card: the run feedback
//! follows the command output after a configurable number of scans, and the
//! raw speed reading mirrors the raw speed output while the motor runs.
//! Selector, trip and interlock are plain fields a test or the operator
//! console can flip between scans.

use tracing::trace;

use crate::config::SimulationConfig;
use crate::equipment::motor::MotorInputs;
use crate::equipment::vsd::{VsdInputs, VsdOutputs};

#[derive(Debug, Clone)]
pub struct SimulatedDrive {
    start_delay: u32,
    stop_delay: u32,
    /// Scans left before the feedback follows the latest command change.
    pending: u32,
    commanded: bool,
    running: bool,
    speed_raw: i32,

    /// Selector switch in the Auto (remote) position.
    pub ma_auto: bool,
    /// Trip relay active. A tripped drive drops its run feedback.
    pub trip: bool,
    /// Interlock chain satisfied.
    pub interlock: bool,
    /// Drive ignores commands (seized motor, open breaker).
    pub stalled: bool,
}

impl SimulatedDrive {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            start_delay: config.start_delay_scans,
            stop_delay: config.stop_delay_scans,
            pending: 0,
            commanded: false,
            running: false,
            speed_raw: 0,
            ma_auto: config.selector_auto,
            trip: false,
            interlock: config.interlock,
            stalled: false,
        }
    }

    #[inline]
    pub const fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub const fn speed_raw(&self) -> i32 {
        self.speed_raw
    }

    /// Field inputs for the next scan.
    pub fn sample(&self, auto_start: bool, speed_command: f64, sec_pulse: bool) -> VsdInputs {
        VsdInputs {
            motor: MotorInputs {
                ma_auto: self.ma_auto,
                running: self.running,
                trip: self.trip,
                interlock: self.interlock,
                auto_start,
                sec_pulse,
            },
            speed_raw: self.speed_raw,
            speed_command,
        }
    }

    /// React to the outputs written by the last scan.
    pub fn apply(&mut self, outputs: &VsdOutputs) {
        let command = outputs.motor.command;
        if command != self.commanded {
            self.commanded = command;
            self.pending = if command {
                self.start_delay
            } else {
                self.stop_delay
            };
        }

        if self.trip {
            self.running = false;
        } else if !self.stalled && self.running != command {
            if self.pending == 0 {
                self.running = command;
                trace!(running = command, "simulated run feedback changed");
            } else {
                self.pending -= 1;
            }
        }

        self.speed_raw = if self.running {
            outputs.speed_control
        } else {
            0
        };
    }
}
