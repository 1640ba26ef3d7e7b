//! Fail-to-start / fail-to-stop supervision timer.
//!
//! Counts `Sec_Pulse` ticks rather than wall-clock time so accelerated or
//! simulated scans supervise the same way as the real plant. The alarm
//! latches once the count exceeds the setpoint; only [`FailTimer::reset`]
//! clears it.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailTimer {
    count: u32,
    alarm: bool,
}

impl FailTimer {
    pub const fn new() -> Self {
        Self {
            count: 0,
            alarm: false,
        }
    }

    /// Elapsed seconds while the qualifying condition held.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Latched alarm.
    #[inline]
    pub const fn alarm(&self) -> bool {
        self.alarm
    }

    /// Zero the counter without touching the alarm.
    #[inline]
    pub fn restart(&mut self) {
        self.count = 0;
    }

    /// Advance one scan while the qualifying condition holds.
    ///
    /// Returns `true` only on the scan the alarm latches.
    pub fn tick(&mut self, sec_pulse: bool, setpoint: u32) -> bool {
        if sec_pulse {
            self.count = self.count.saturating_add(1);
        }
        if !self.alarm && self.count > setpoint {
            self.alarm = true;
            return true;
        }
        false
    }

    /// Operator reset: clear counter and alarm.
    pub fn reset(&mut self) {
        self.count = 0;
        self.alarm = false;
    }
}
