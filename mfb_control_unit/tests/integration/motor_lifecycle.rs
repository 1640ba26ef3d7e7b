//! Integration test: motor lifecycle.
//!
//! Start/stop sequencing, fault latching and operator reset, maintenance,
//! run-hour totalization, and the availability/priority contract under an
//! arbitrary mix of field inputs and operator writes.

use mfb_common::consts::FAULT_PRIORITY;
use mfb_common::motor::fault::MotorFault;
use mfb_common::motor::state::{MotorState, OperatingMode};

use mfb_control_unit::equipment::motor::{MotorCore, MotorInputs};

// ── Helpers ─────────────────────────────────────────────────────────

fn auto_motor(priority: u8) -> MotorCore {
    let mut m = MotorCore::new("CHWP-01", priority);
    m.scada_mut().control.mode = OperatingMode::Auto.register();
    // First scan writes the default setpoints.
    m.execute(&MotorInputs::default());
    m
}

fn healthy(auto_start: bool, running: bool, sec_pulse: bool) -> MotorInputs {
    MotorInputs {
        ma_auto: true,
        running,
        trip: false,
        interlock: true,
        auto_start,
        sec_pulse,
    }
}

/// Drive a start request against a motor that never confirms.
fn starve(m: &mut MotorCore, pulses: usize) {
    m.execute(&healthy(true, false, false));
    for _ in 0..pulses {
        m.execute(&healthy(true, false, true));
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn start_then_stop_follows_request() {
    let mut m = auto_motor(1);

    let out = m.execute(&healthy(true, false, false));
    assert!(out.command, "command must follow the request on the same scan");
    assert_eq!(m.state(), MotorState::Stop);

    m.execute(&healthy(true, true, false));
    assert_eq!(m.state(), MotorState::Run);
    assert_eq!(m.scada().feedback.state, MotorState::Run as u8);

    let out = m.execute(&healthy(false, true, false));
    assert!(!out.command);
    let out = m.execute(&healthy(false, false, false));
    assert!(!out.fault_alarm);
    assert_eq!(m.state(), MotorState::Stop);
}

#[test]
fn fail_to_start_after_setpoint_exceeded() {
    let mut m = auto_motor(1);
    m.scada_mut().control.fail_to_start_sp = 5;

    starve(&mut m, 6);
    assert!(m.scada().feedback.fail_to_start);
    assert_eq!(m.scada().feedback.start_counter, 6);

    // The fault latches on the following scan.
    let out = m.execute(&healthy(true, false, false));
    assert!(out.fault_alarm);
    assert!(!out.command);
    assert!(!out.available);
    assert_eq!(out.priority, FAULT_PRIORITY);
    assert_eq!(m.state(), MotorState::FailToStart);
    assert_eq!(m.active_faults(), MotorFault::FAIL_TO_START);
}

#[test]
fn fail_to_start_not_raised_below_setpoint() {
    let mut m = auto_motor(1);
    m.scada_mut().control.fail_to_start_sp = 5;

    starve(&mut m, 4);
    assert!(!m.scada().feedback.fail_to_start);
    let out = m.execute(&healthy(true, false, false));
    assert!(!out.fault_alarm);
    assert!(out.command);
}

#[test]
fn reset_clears_fail_to_start() {
    let mut m = auto_motor(1);
    m.scada_mut().control.fail_to_start_sp = 2;
    starve(&mut m, 3);
    m.execute(&healthy(true, false, false));
    assert_eq!(m.state(), MotorState::FailToStart);

    m.scada_mut().control.reset = 1;
    let out = m.execute(&healthy(false, false, false));
    assert!(!out.fault_alarm);
    assert_eq!(m.state(), MotorState::Stop);
    assert!(!m.scada().feedback.fail_to_start);
    assert_eq!(m.scada().feedback.start_counter, 0);
    assert_eq!(m.scada().control.reset, 0);

    let out = m.execute(&healthy(true, false, false));
    assert!(out.available);
    assert!(out.command);
    assert_eq!(out.priority, 1);
}

#[test]
fn trip_is_immediate_and_reset_needs_clear_trip() {
    let mut m = auto_motor(3);
    m.execute(&healthy(true, true, false));

    let tripped = MotorInputs {
        trip: true,
        ..healthy(true, false, false)
    };
    let out = m.execute(&tripped);
    assert!(out.fault_alarm);
    assert!(!out.available);
    assert_eq!(m.state(), MotorState::Trip);

    m.scada_mut().control.reset = 1;
    let out = m.execute(&tripped);
    assert!(out.fault_alarm, "reset must be ignored while tripped");

    m.scada_mut().control.reset = 1;
    let out = m.execute(&healthy(true, false, false));
    assert!(!out.fault_alarm);
    assert!(!m.scada().feedback.tripped);
}

#[test]
fn maintenance_takes_motor_out_of_service() {
    let mut m = auto_motor(1);
    m.execute(&healthy(true, true, false));
    assert_eq!(m.state(), MotorState::Run);

    m.scada_mut().control.mode = OperatingMode::Maintenance.register();
    let out = m.execute(&MotorInputs {
        trip: true,
        ..healthy(true, false, true)
    });
    assert!(!out.command);
    assert!(!out.fault_alarm);
    assert_eq!(out.priority, FAULT_PRIORITY);
    assert_eq!(m.state(), MotorState::Maintenance);

    // No supervision in maintenance even with feedback mismatching.
    for _ in 0..200 {
        m.execute(&healthy(true, true, true));
    }
    assert!(!m.scada().feedback.fail_to_stop);
    assert_eq!(m.state(), MotorState::Maintenance);

    m.scada_mut().control.mode = OperatingMode::Auto.register();
    let out = m.execute(&healthy(true, true, false));
    assert!(out.available);
    assert_eq!(m.state(), MotorState::Run);
}

#[test]
fn local_selector_tracks_feedback_without_supervision() {
    let mut m = auto_motor(1);
    let local = MotorInputs {
        ma_auto: false,
        ..healthy(true, true, true)
    };
    for _ in 0..200 {
        let out = m.execute(&local);
        assert!(!out.command);
        assert!(!out.available);
    }
    assert_eq!(m.state(), MotorState::Run);
    assert!(!m.scada().feedback.fail_to_stop);
}

#[test]
fn one_hour_of_running_adds_one_run_hour() {
    let mut m = auto_motor(1);
    for _ in 0..3600 {
        m.execute(&healthy(true, true, true));
    }
    assert_eq!(m.scada().feedback.run_hours, 1);
    assert_eq!(m.totalizer().seconds(), 0);
    assert_eq!(m.totalizer().minutes(), 0);
}

#[test]
fn unavailable_always_reports_fault_priority() {
    let mut m = MotorCore::new("CHWP-02", 7);
    // Small LCG: deterministic coverage of input and operator combinations.
    let mut seed: u32 = 0x2545_f491;
    let mut next = move || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seed >> 8
    };

    for _ in 0..5_000 {
        let bits = next();
        let inputs = MotorInputs {
            ma_auto: bits & 0x01 != 0,
            running: bits & 0x02 != 0,
            trip: bits & 0x3c == 0,
            interlock: bits & 0x40 != 0,
            auto_start: bits & 0x80 != 0,
            sec_pulse: bits & 0x100 != 0,
        };
        let control = &mut m.scada_mut().control;
        control.mode = ((bits >> 9) & 0x07) as i32 - 1;
        control.reset = ((bits >> 12) & 0x03) as i32;
        control.fail_to_start_sp = 3;
        control.fail_to_stop_sp = 3;

        let out = m.execute(&inputs);
        let fb = &m.scada().feedback;
        assert_eq!(fb.ready, out.available);
        assert_eq!(fb.priority, out.priority);
        if out.available {
            assert_eq!(out.priority, 7);
        } else {
            assert_eq!(out.priority, FAULT_PRIORITY);
        }
        if out.fault_alarm {
            assert!(!out.available);
            assert!(!out.command);
        }
    }
}
