//! State, mode and command enums for the motor function block.
//!
//! All enums use `#[repr(u8)]` and keep the numeric codes the SCADA layer
//! already knows, so `as u8` is the register value.

use serde::{Deserialize, Serialize};

/// Operating state reported to the operator (`FB_State`).
///
/// Code `2` is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotorState {
    /// Stopped and healthy.
    Stop = 0,
    /// Run feedback confirmed.
    Run = 1,
    /// Taken out of service by the operator.
    Maintenance = 3,
    /// Trip input latched.
    Trip = 4,
    /// Start command not confirmed within the setpoint.
    FailToStart = 5,
    /// Stop command not confirmed within the setpoint.
    FailToStop = 6,
}

impl MotorState {
    /// `Run` when feedback is confirmed, `Stop` otherwise.
    #[inline]
    pub const fn from_run_feedback(running: bool) -> Self {
        if running { Self::Run } else { Self::Stop }
    }
}

impl Default for MotorState {
    fn default() -> Self {
        Self::Stop
    }
}

/// Operator-selected operating mode (`Ctrl_Mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperatingMode {
    /// Override stop.
    Off = 0,
    /// Override start from the operator station.
    Manual = 1,
    /// Started and stopped by the automatic start request.
    Auto = 2,
    /// Out of service; trips are not registered.
    Maintenance = 3,
}

impl OperatingMode {
    /// Decode the operator mode register. Anything outside `1..=3` is `Off`.
    #[inline]
    pub const fn from_register(value: i32) -> Self {
        match value {
            1 => Self::Manual,
            2 => Self::Auto,
            3 => Self::Maintenance,
            _ => Self::Off,
        }
    }

    /// Register encoding of this mode.
    #[inline]
    pub const fn register(self) -> i32 {
        self as i32
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        Self::Off
    }
}

/// Raw equipment command (`FB_Command`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Command {
    Stop = 0,
    Start = 1,
}

impl Command {
    #[inline]
    pub const fn is_start(self) -> bool {
        matches!(self, Self::Start)
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::Stop
    }
}
