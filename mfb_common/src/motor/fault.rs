//! Latched fault causes of a motor function block.

use bitflags::bitflags;

use super::state::MotorState;

bitflags! {
    /// Latched equipment faults. Any flag forces the equipment unavailable
    /// until an operator reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MotorFault: u8 {
        /// Trip input registered outside maintenance.
        const TRIP          = 0x01;
        /// Start command not confirmed in time.
        const FAIL_TO_START = 0x02;
        /// Stop command not confirmed in time.
        const FAIL_TO_STOP  = 0x04;
    }
}

impl MotorFault {
    /// State reported for the highest-precedence fault (trip first).
    #[inline]
    pub const fn state(&self) -> Option<MotorState> {
        if self.contains(Self::TRIP) {
            Some(MotorState::Trip)
        } else if self.contains(Self::FAIL_TO_START) {
            Some(MotorState::FailToStart)
        } else if self.contains(Self::FAIL_TO_STOP) {
            Some(MotorState::FailToStop)
        } else {
            None
        }
    }
}

impl Default for MotorFault {
    fn default() -> Self {
        Self::empty()
    }
}
