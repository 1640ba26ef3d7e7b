//! Integration test: plant scan against simulated drives.
//!
//! Validates: config file → plant in configuration order → auto-started
//! equipment reaches Run through the simulated feedback loop; stalled and
//! tripped drives latch the matching fault; operator writes between scans.

use mfb_common::config::ConfigError;
use mfb_common::consts::FAULT_PRIORITY;
use mfb_common::motor::state::{MotorState, OperatingMode};

use mfb_control_unit::config::{load_config, load_config_from_str};
use mfb_control_unit::cycle::ScanRunner;

// ── Plant TOML ──────────────────────────────────────────────────────

/// One-second scans: every scan carries the second pulse.
const PLANT_TOML: &str = r#"
[shared]
station_name = "integration"

[scan]
scan_time_ms = 1000

[simulation]
start_delay_scans = 2
stop_delay_scans = 1

[[equipment]]
name = "CHWP-01"
priority = 1
auto_start = true

[equipment.defaults]
fail_to_start_sp = 3

[[equipment]]
name = "CHWP-02"
priority = 2

[[equipment]]
name = "CT-01"
kind = "vsd"
priority = 1
auto_start = true
speed_command = 75.0
"#;

fn runner() -> ScanRunner {
    let config = load_config_from_str(PLANT_TOML).unwrap();
    ScanRunner::new(&config)
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn plant_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plant.toml");
    std::fs::write(&path, PLANT_TOML).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.equipment.len(), 3);
    let r = ScanRunner::new(&config);
    let names: Vec<&str> = r
        .plant()
        .units()
        .iter()
        .map(|u| u.equipment.name())
        .collect();
    assert_eq!(names, ["CHWP-01", "CHWP-02", "CT-01"]);
}

#[test]
fn invalid_plant_rejected() {
    let toml = PLANT_TOML.replace("priority = 2", "priority = 99");
    let err = load_config_from_str(&toml).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn auto_started_equipment_reaches_run() {
    let mut r = runner();
    r.run(Some(6), false);

    let plant = r.plant();
    let pump = plant.unit("CHWP-01").unwrap();
    assert_eq!(pump.equipment.core().state(), MotorState::Run);
    assert!(pump.equipment.scada().feedback.running);

    // No request: available but idle.
    let standby = plant.unit("CHWP-02").unwrap();
    assert_eq!(standby.equipment.core().state(), MotorState::Stop);
    assert!(standby.equipment.scada().feedback.ready);
    assert_eq!(standby.equipment.scada().feedback.priority, 2);

    let fan = plant.unit("CT-01").unwrap();
    assert_eq!(fan.equipment.core().state(), MotorState::Run);
    let out = r.outputs()[2];
    assert_eq!(out.speed_control, -19200 + 75 * 512);
    assert_eq!(out.frequency, 75);
}

#[test]
fn stalled_drive_fails_to_start() {
    let mut r = runner();
    r.drive_mut(0).unwrap().stalled = true;

    // Pulse counts 1..4 exceed the setpoint of 3; the fault latches next scan.
    r.run(Some(5), false);

    let pump = r.plant().unit("CHWP-01").unwrap();
    assert_eq!(pump.equipment.core().state(), MotorState::FailToStart);
    assert!(pump.equipment.scada().feedback.fail_to_start);
    assert!(r.outputs()[0].motor.fault_alarm);
    assert_eq!(r.outputs()[0].motor.priority, FAULT_PRIORITY);
    assert!(!r.outputs()[0].motor.command);

    // Operator clears the jam and resets.
    r.drive_mut(0).unwrap().stalled = false;
    r.plant_mut()
        .unit_mut("CHWP-01")
        .unwrap()
        .equipment
        .scada_mut()
        .control
        .reset = 1;
    r.run(Some(6), false);
    let pump = r.plant().unit("CHWP-01").unwrap();
    assert_eq!(pump.equipment.core().state(), MotorState::Run);
}

#[test]
fn drive_trip_latches_until_reset() {
    let mut r = runner();
    r.run(Some(6), false);

    r.drive_mut(2).unwrap().trip = true;
    r.scan_once();
    let fan = r.plant().unit("CT-01").unwrap();
    assert_eq!(fan.equipment.core().state(), MotorState::Trip);
    assert!(r.outputs()[2].motor.fault_alarm);
    assert_eq!(r.outputs()[2].speed_control, 0);

    r.drive_mut(2).unwrap().trip = false;
    r.run(Some(3), false);
    assert_eq!(
        r.plant().unit("CT-01").unwrap().equipment.core().state(),
        MotorState::Trip
    );

    r.plant_mut()
        .unit_mut("CT-01")
        .unwrap()
        .equipment
        .scada_mut()
        .control
        .reset = 1;
    r.run(Some(6), false);
    assert_eq!(
        r.plant().unit("CT-01").unwrap().equipment.core().state(),
        MotorState::Run
    );
}

#[test]
fn maintenance_written_between_scans() {
    let mut r = runner();
    r.run(Some(6), false);

    r.plant_mut()
        .unit_mut("CHWP-01")
        .unwrap()
        .equipment
        .scada_mut()
        .control
        .mode = OperatingMode::Maintenance.register();
    r.run(Some(4), false);

    let pump = r.plant().unit("CHWP-01").unwrap();
    assert_eq!(pump.equipment.core().state(), MotorState::Maintenance);
    assert_eq!(pump.equipment.scada().feedback.state, 3);
    assert!(!r.outputs()[0].motor.command);
    assert_eq!(r.outputs()[0].motor.priority, FAULT_PRIORITY);
    assert!(!r.drive(0).unwrap().running());
}

#[test]
fn scada_view_serializes() {
    let mut r = runner();
    r.run(Some(6), false);
    let scada = r.plant().unit("CT-01").unwrap().equipment.scada();
    let json = serde_json::to_value(scada).unwrap();
    assert_eq!(json["feedback"]["state"], 1);
    assert_eq!(json["feedback"]["speed_feedback"], 75.0);
    assert_eq!(json["control"]["mode"], 2);
}
