//! Plant configuration loader with validation.
//!
//! One TOML file describes the station: shared settings, the scan period,
//! the drive simulation and every piece of equipment in scan order.
//! Validation covers the scan period, equipment name uniqueness, assigned
//! priority bounds and each equipment's default setpoints.
//!
//! ```toml
//! [shared]
//! station_name = "chiller-plant-01"
//!
//! [scan]
//! scan_time_ms = 100
//!
//! [[equipment]]
//! name = "CHWP-01"
//! kind = "vsd"
//! priority = 1
//! auto_start = true
//! speed_command = 75.0
//!
//! [equipment.defaults]
//! fail_to_start_sp = 30
//! ```

use std::collections::HashSet;
use std::path::Path;

use mfb_common::config::{ConfigError, ConfigLoader, SharedConfig};
use mfb_common::consts::{
    DEFAULT_SCAN_TIME_MS, MAX_ASSIGNED_PRIORITY, MAX_SCAN_TIME_MS, MIN_ASSIGNED_PRIORITY,
};
use mfb_common::motor::defaults::MotorDefaults;
use mfb_common::motor::state::OperatingMode;
use serde::{Deserialize, Serialize};

// ─── Sections ───────────────────────────────────────────────────────

/// Complete plant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub equipment: Vec<EquipmentConfig>,
}

/// `[scan]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan period [ms] (default: 100).
    pub scan_time_ms: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_time_ms: DEFAULT_SCAN_TIME_MS,
        }
    }
}

/// `[simulation]` section: behaviour of the simulated field drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scans between a start command and confirmed run feedback.
    pub start_delay_scans: u32,
    /// Scans between a stop command and run feedback dropping.
    pub stop_delay_scans: u32,
    /// Selector switches start in the Auto (remote) position.
    pub selector_auto: bool,
    /// Interlock chains start satisfied.
    pub interlock: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_delay_scans: 3,
            stop_delay_scans: 2,
            selector_auto: true,
            interlock: true,
        }
    }
}

/// Equipment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    /// Fixed-speed motor.
    #[default]
    Motor,
    /// Motor behind a variable-speed drive.
    Vsd,
}

/// One `[[equipment]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub name: String,
    #[serde(default)]
    pub kind: EquipmentKind,
    /// Assigned sequencing priority (1 = highest).
    pub priority: u8,
    /// Operator mode written at startup (default: Auto).
    #[serde(default = "default_mode")]
    pub mode: OperatingMode,
    /// Automatic start request held by the sequencer.
    #[serde(default)]
    pub auto_start: bool,
    /// Automatic speed command [%] (VSD only).
    #[serde(default)]
    pub speed_command: f64,
    /// Speed input deadband [raw counts] (VSD only).
    #[serde(default)]
    pub deadband: Option<f64>,
    #[serde(default)]
    pub defaults: MotorDefaults,
}

fn default_mode() -> OperatingMode {
    OperatingMode::Auto
}

// ─── Validation ─────────────────────────────────────────────────────

impl PlantConfig {
    /// Validate every section and cross-equipment rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.scan.scan_time_ms == 0 || self.scan.scan_time_ms > MAX_SCAN_TIME_MS {
            return Err(ConfigError::ValidationError(format!(
                "scan_time_ms {} outside 1..={MAX_SCAN_TIME_MS}",
                self.scan.scan_time_ms
            )));
        }

        if self.equipment.is_empty() {
            return Err(ConfigError::ValidationError(
                "plant has no equipment".to_string(),
            ));
        }

        let mut names = HashSet::with_capacity(self.equipment.len());
        for eq in &self.equipment {
            eq.validate()?;
            if !names.insert(eq.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate equipment name '{}'",
                    eq.name
                )));
            }
        }
        Ok(())
    }
}

impl EquipmentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "equipment name cannot be empty".to_string(),
            ));
        }
        if !(MIN_ASSIGNED_PRIORITY..=MAX_ASSIGNED_PRIORITY).contains(&self.priority) {
            return Err(ConfigError::ValidationError(format!(
                "equipment '{}': priority {} outside {MIN_ASSIGNED_PRIORITY}..={MAX_ASSIGNED_PRIORITY}",
                self.name, self.priority
            )));
        }
        if !self.speed_command.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "equipment '{}': speed_command must be finite",
                self.name
            )));
        }
        if let Some(deadband) = self.deadband
            && (!deadband.is_finite() || deadband < 0.0)
        {
            return Err(ConfigError::ValidationError(format!(
                "equipment '{}': deadband must be a non-negative number",
                self.name
            )));
        }
        self.defaults
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("equipment '{}': {e}", self.name)))
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate a plant configuration file.
pub fn load_config(path: &Path) -> Result<PlantConfig, ConfigError> {
    let config = PlantConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a plant configuration from a TOML string (for testing).
pub fn load_config_from_str(content: &str) -> Result<PlantConfig, ConfigError> {
    let config = PlantConfig::load_str(content)?;
    config.validate()?;
    Ok(config)
}
