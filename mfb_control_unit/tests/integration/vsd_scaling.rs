//! Integration test: VSD speed paths.
//!
//! Command scaling with the min/max speed window and operator override,
//! feedback scaling with the overshoot/undershoot deadband, and the speed
//! outputs through a fault and reset.

use mfb_common::motor::defaults::MotorDefaults;
use mfb_common::motor::scada::AnalogRange;
use mfb_common::motor::state::{MotorState, OperatingMode};

use mfb_control_unit::analog::{eu_to_raw, raw_to_eu};
use mfb_control_unit::equipment::motor::MotorInputs;
use mfb_control_unit::equipment::vsd::{VsdInputs, VsdMotor};

fn fan() -> VsdMotor {
    let mut vsd = VsdMotor::new("CT-01", 1);
    vsd.scada_mut().control.mode = OperatingMode::Auto.register();
    vsd
}

fn running(speed_command: f64, speed_raw: i32) -> VsdInputs {
    VsdInputs {
        motor: MotorInputs {
            ma_auto: true,
            running: true,
            interlock: true,
            auto_start: true,
            ..Default::default()
        },
        speed_raw,
        speed_command,
    }
}

#[test]
fn card_calibration_maps_half_scale() {
    let card = AnalogRange::default();
    assert_eq!(eu_to_raw(&card, 50.0), 6400.0);
    assert_eq!(raw_to_eu(&card, 6400.0), 50.0);
}

#[test]
fn override_bypasses_command_window() {
    let mut vsd = fan();

    let out = vsd.execute(&running(20.0, 0));
    assert_eq!(out.speed_control, 1280, "raised to min speed");

    let out = vsd.execute(&running(85.0, 0));
    assert_eq!(out.speed_control, -19200 + 85 * 512);

    vsd.scada_mut().control.manual_override = 1;
    vsd.scada_mut().control.manual_override_speed = 20.0;
    let out = vsd.execute(&running(85.0, 0));
    assert_eq!(out.speed_control, -19200 + 20 * 512, "override bypasses window");
    assert_eq!(vsd.scada().feedback.speed_output, 20.0);

    vsd.scada_mut().control.manual_override_speed = -5.0;
    let out = vsd.execute(&running(85.0, 0));
    assert_eq!(out.speed_control, -19200, "override still bounded by EU range");
    assert_eq!(vsd.scada().control.manual_override_speed, 0.0);
}

#[test]
fn override_follows_auto_until_taken() {
    let mut vsd = fan();
    vsd.execute(&running(55.0, 0));
    vsd.execute(&running(60.0, 0));
    assert_eq!(vsd.scada().control.manual_override_speed, 60.0);

    // Bumpless: taking override holds the last automatic command.
    vsd.scada_mut().control.manual_override = 1;
    let out = vsd.execute(&running(90.0, 0));
    assert_eq!(vsd.speed_percent(), 60.0);
    assert_eq!(out.speed_control, -19200 + 60 * 512);
}

#[test]
fn custom_calibration_and_window() {
    let defaults = MotorDefaults {
        speed_output: AnalogRange::new(0.0, 32768.0, 0.0, 50.0),
        speed_input: AnalogRange::new(0.0, 32768.0, 0.0, 50.0),
        min_speed: 10.0,
        max_speed: 45.0,
        ..Default::default()
    };
    let mut vsd = VsdMotor::with_defaults("CHWP-03", 2, defaults);
    vsd.scada_mut().control.mode = OperatingMode::Auto.register();

    let out = vsd.execute(&running(50.0, 16384));
    assert_eq!(out.speed_control, 29491, "capped at 45 Hz");
    assert_eq!(vsd.scada().feedback.speed_feedback, 25.0);
    assert_eq!(out.frequency, 25);
}

#[test]
fn feedback_deadband_both_sides() {
    let mut vsd = fan();

    vsd.execute(&running(50.0, 32400));
    assert_eq!(vsd.scada().feedback.speed_feedback, 100.78125);

    vsd.execute(&running(50.0, 32501));
    assert_eq!(vsd.scada().feedback.speed_feedback, 100.0);

    vsd.execute(&running(50.0, -19600));
    assert_eq!(vsd.scada().feedback.speed_feedback, -0.78125);

    vsd.execute(&running(50.0, -19701));
    assert_eq!(vsd.scada().feedback.speed_feedback, 100.0);
}

#[test]
fn trip_zeroes_speed_outputs() {
    let mut vsd = fan();
    let out = vsd.execute(&running(70.0, 16640));
    assert_eq!(out.frequency, 70);

    let mut tripped = running(70.0, 0);
    tripped.motor.trip = true;
    tripped.motor.running = false;
    let out = vsd.execute(&tripped);
    assert!(out.motor.fault_alarm);
    assert_eq!(out.speed_control, 0);
    assert_eq!(out.frequency, 0);
    assert_eq!(vsd.core().state(), MotorState::Trip);

    vsd.scada_mut().control.reset = 1;
    let mut cleared = running(70.0, 0);
    cleared.motor.running = false;
    vsd.execute(&cleared);
    let out = vsd.execute(&cleared);
    assert!(!out.motor.fault_alarm);
    assert_eq!(out.speed_control, -19200 + 70 * 512);
}
