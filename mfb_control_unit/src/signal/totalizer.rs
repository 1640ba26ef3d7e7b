//! Run-hour totalizer: running seconds → minutes → hours.

use mfb_common::consts::{MINUTES_PER_HOUR, SECONDS_PER_MINUTE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunHourTotalizer {
    seconds: u32,
    minutes: u32,
}

impl RunHourTotalizer {
    pub const fn new() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
        }
    }

    #[inline]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    #[inline]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Count one running second. Returns `true` when an hour rolls over.
    pub fn tick(&mut self, sec_pulse: bool, running: bool) -> bool {
        if !(sec_pulse && running) {
            return false;
        }
        self.seconds += 1;
        if self.seconds >= SECONDS_PER_MINUTE {
            self.minutes += 1;
            self.seconds = 0;
        }
        if self.minutes >= MINUTES_PER_HOUR {
            self.minutes = 0;
            return true;
        }
        false
    }
}
