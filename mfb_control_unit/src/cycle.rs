//! Plant scan: sample → execute → actuate.
//!
//! The [`ScanRunner`] owns the plant, one simulated drive per equipment,
//! the once-per-second pulse generator and scan timing statistics. Every
//! scan samples each drive, executes the equipment in configuration order
//! and feeds the outputs back to the drive. The scan body does not
//! allocate.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::PlantConfig;
use crate::equipment::Equipment;
use crate::equipment::vsd::VsdOutputs;
use crate::sim::SimulatedDrive;

/// Accumulated scan time per second pulse [ms].
const PULSE_PERIOD_MS: u32 = 1000;

// ─── Scan Statistics ────────────────────────────────────────────────

/// O(1) per-scan timing statistics.
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Total scans executed.
    pub scan_count: u64,
    /// Last scan duration [ns].
    pub last_scan_ns: u64,
    /// Minimum scan duration [ns].
    pub min_scan_ns: u64,
    /// Maximum scan duration [ns].
    pub max_scan_ns: u64,
    /// Running sum for average computation.
    pub sum_scan_ns: u64,
    /// Scans that took longer than the scan period.
    pub overruns: u64,
}

impl ScanStats {
    pub const fn new() -> Self {
        Self {
            scan_count: 0,
            last_scan_ns: 0,
            min_scan_ns: u64::MAX,
            max_scan_ns: 0,
            sum_scan_ns: 0,
            overruns: 0,
        }
    }

    /// Record a scan duration.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.scan_count += 1;
        self.last_scan_ns = duration_ns;
        self.min_scan_ns = self.min_scan_ns.min(duration_ns);
        self.max_scan_ns = self.max_scan_ns.max(duration_ns);
        self.sum_scan_ns = self.sum_scan_ns.saturating_add(duration_ns);
    }

    /// Average scan time [ns] (0 if no scans).
    #[inline]
    pub fn avg_scan_ns(&self) -> u64 {
        if self.scan_count == 0 {
            0
        } else {
            self.sum_scan_ns / self.scan_count
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Second Pulse ───────────────────────────────────────────────────

/// Once-per-second pulse derived from accumulated scan time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecondPulse {
    accumulated_ms: u32,
}

impl SecondPulse {
    pub const fn new() -> Self {
        Self { accumulated_ms: 0 }
    }

    /// Advance by one scan. True on the scan that completes a second; the
    /// remainder carries over.
    #[inline]
    pub fn tick(&mut self, scan_time_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(scan_time_ms);
        if self.accumulated_ms >= PULSE_PERIOD_MS {
            self.accumulated_ms -= PULSE_PERIOD_MS;
            true
        } else {
            false
        }
    }
}

// ─── Plant ──────────────────────────────────────────────────────────

/// Equipment with the requests the sequencer holds for it.
#[derive(Debug, Clone)]
pub struct PlantUnit {
    pub equipment: Equipment,
    pub auto_start: bool,
    pub speed_command: f64,
}

/// All equipment of a station, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Plant {
    units: Vec<PlantUnit>,
}

impl Plant {
    pub fn from_config(config: &PlantConfig) -> Self {
        let units = config
            .equipment
            .iter()
            .map(|eq| PlantUnit {
                equipment: Equipment::from_config(eq),
                auto_start: eq.auto_start,
                speed_command: eq.speed_command,
            })
            .collect();
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[PlantUnit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [PlantUnit] {
        &mut self.units
    }

    pub fn unit(&self, name: &str) -> Option<&PlantUnit> {
        self.units.iter().find(|u| u.equipment.name() == name)
    }

    pub fn unit_mut(&mut self, name: &str) -> Option<&mut PlantUnit> {
        self.units.iter_mut().find(|u| u.equipment.name() == name)
    }
}

// ─── Scan Runner ────────────────────────────────────────────────────

pub struct ScanRunner {
    plant: Plant,
    drives: Vec<SimulatedDrive>,
    outputs: Vec<VsdOutputs>,
    pulse: SecondPulse,
    stats: ScanStats,
    scan_time_ms: u32,
}

impl ScanRunner {
    /// Build the plant and one simulated drive per equipment.
    pub fn new(config: &PlantConfig) -> Self {
        let plant = Plant::from_config(config);
        let drives = (0..plant.len())
            .map(|_| SimulatedDrive::new(&config.simulation))
            .collect();
        let outputs = vec![VsdOutputs::default(); plant.len()];
        info!(
            station = %config.shared.station_name,
            equipment = plant.len(),
            scan_time_ms = config.scan.scan_time_ms,
            "plant started"
        );
        Self {
            plant,
            drives,
            outputs,
            pulse: SecondPulse::new(),
            stats: ScanStats::new(),
            scan_time_ms: config.scan.scan_time_ms,
        }
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn plant_mut(&mut self) -> &mut Plant {
        &mut self.plant
    }

    pub fn drive(&self, index: usize) -> Option<&SimulatedDrive> {
        self.drives.get(index)
    }

    pub fn drive_mut(&mut self, index: usize) -> Option<&mut SimulatedDrive> {
        self.drives.get_mut(index)
    }

    /// Outputs of the last scan, in plant order.
    pub fn outputs(&self) -> &[VsdOutputs] {
        &self.outputs
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub const fn scan_time(&self) -> Duration {
        Duration::from_millis(self.scan_time_ms as u64)
    }

    /// Execute one scan of every equipment.
    pub fn scan_once(&mut self) {
        let scan_start = Instant::now();
        let sec_pulse = self.pulse.tick(self.scan_time_ms);

        for ((unit, drive), out) in self
            .plant
            .units
            .iter_mut()
            .zip(self.drives.iter_mut())
            .zip(self.outputs.iter_mut())
        {
            let inputs = drive.sample(unit.auto_start, unit.speed_command, sec_pulse);
            *out = unit.equipment.execute(&inputs);
            drive.apply(out);
        }

        let elapsed = scan_start.elapsed();
        self.stats.record(elapsed.as_nanos() as u64);
        if elapsed > self.scan_time() {
            self.stats.overruns += 1;
            debug!(elapsed_us = elapsed.as_micros() as u64, "scan overrun");
        }
    }

    /// Run `limit` scans (forever when `None`). With `pace`, each scan is
    /// padded to the configured scan time with `std::thread::sleep`.
    ///
    /// Returns the number of scans executed.
    pub fn run(&mut self, limit: Option<u64>, pace: bool) -> u64 {
        let period = self.scan_time();
        let mut executed = 0u64;

        while limit.is_none_or(|n| executed < n) {
            let scan_start = Instant::now();
            self.scan_once();
            executed += 1;

            if pace && let Some(remaining) = period.checked_sub(scan_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        executed
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
