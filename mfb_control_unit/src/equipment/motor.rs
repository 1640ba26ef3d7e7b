//! Fixed-speed motor function block.
//!
//! One `MotorCore` per physical motor, executed once per scan. A scan runs
//! the PLC sequence in order:
//!
//! 1. setpoint initialization (first scan / operator request)
//! 2. mode resolution and input mapping (simulation, maintenance, bypass)
//! 3. fault latching and operator reset
//! 4. permissive and availability
//! 5. start/stop command
//! 6. fail-to-start / fail-to-stop supervision
//! 7. run-hour totalization
//! 8. feedback and output mapping
//!
//! Faults (trip, fail-to-start, fail-to-stop) latch until the operator
//! writes `reset` while the trip input is clear. Whenever the motor is not
//! available for automatic sequencing its priority reads `FAULT_PRIORITY`.

use mfb_common::consts::FAULT_PRIORITY;
use mfb_common::motor::defaults::MotorDefaults;
use mfb_common::motor::fault::MotorFault;
use mfb_common::motor::scada::MotorScada;
use mfb_common::motor::state::{Command, MotorState, OperatingMode};
use tracing::{debug, info, warn};

use crate::analog::limit_register;
use crate::signal::edge::{EdgeDetector, SignalId};
use crate::signal::timer::FailTimer;
use crate::signal::totalizer::RunHourTotalizer;

const AWAITING_RUN: SignalId = SignalId(0);
const AWAITING_STOP: SignalId = SignalId(1);

/// Field inputs sampled by the scheduler for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorInputs {
    /// Selector switch in Auto (remote) position.
    pub ma_auto: bool,
    /// Run feedback.
    pub running: bool,
    /// Trip input.
    pub trip: bool,
    /// Interlock satisfied.
    pub interlock: bool,
    /// Automatic start request from the sequencer.
    pub auto_start: bool,
    /// Once-per-second pulse.
    pub sec_pulse: bool,
}

/// Function block outputs after a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorOutputs {
    pub command: bool,
    pub permissive: bool,
    pub fault_alarm: bool,
    pub available: bool,
    pub running: bool,
    pub priority: u8,
}

impl Default for MotorOutputs {
    fn default() -> Self {
        Self {
            command: false,
            permissive: false,
            fault_alarm: false,
            available: false,
            running: false,
            priority: FAULT_PRIORITY,
        }
    }
}

/// Motor control state machine.
#[derive(Debug, Clone)]
pub struct MotorCore {
    name: String,
    assigned_priority: u8,
    defaults: MotorDefaults,
    scada: MotorScada,

    mode: OperatingMode,
    state: MotorState,
    command: Command,
    permissive: bool,
    available: bool,
    priority: u8,

    ma_auto: bool,
    running: bool,
    trip: bool,
    interlock: bool,

    fault_alarm: bool,
    faults: MotorFault,
    start_timer: FailTimer,
    stop_timer: FailTimer,
    edges: EdgeDetector,
    totalizer: RunHourTotalizer,
    first_scan: bool,
    outputs: MotorOutputs,
}

impl MotorCore {
    /// Motor with factory default setpoints.
    pub fn new(name: impl Into<String>, assigned_priority: u8) -> Self {
        Self::with_defaults(name, assigned_priority, MotorDefaults::default())
    }

    /// Motor whose initialization writes `defaults` into the control view.
    pub fn with_defaults(
        name: impl Into<String>,
        assigned_priority: u8,
        defaults: MotorDefaults,
    ) -> Self {
        let name = name.into();
        debug!(motor = %name, priority = assigned_priority, "motor block created");
        Self {
            name,
            assigned_priority,
            defaults,
            scada: MotorScada::default(),
            mode: OperatingMode::Off,
            state: MotorState::Stop,
            command: Command::Stop,
            permissive: false,
            available: false,
            priority: FAULT_PRIORITY,
            ma_auto: false,
            running: false,
            trip: false,
            interlock: false,
            fault_alarm: false,
            faults: MotorFault::empty(),
            start_timer: FailTimer::new(),
            stop_timer: FailTimer::new(),
            edges: EdgeDetector::new(),
            totalizer: RunHourTotalizer::new(),
            first_scan: true,
            outputs: MotorOutputs::default(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn assigned_priority(&self) -> u8 {
        self.assigned_priority
    }

    /// Operator view (feedback written by the last scan).
    #[inline]
    pub const fn scada(&self) -> &MotorScada {
        &self.scada
    }

    /// Operator write access to the control fields.
    #[inline]
    pub fn scada_mut(&mut self) -> &mut MotorScada {
        &mut self.scada
    }

    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    #[inline]
    pub const fn state(&self) -> MotorState {
        self.state
    }

    #[inline]
    pub const fn command(&self) -> Command {
        self.command
    }

    /// Mapped run feedback of the last scan.
    #[inline]
    pub const fn running(&self) -> bool {
        self.running
    }

    /// Outputs of the last scan.
    #[inline]
    pub const fn outputs(&self) -> MotorOutputs {
        self.outputs
    }

    /// Latched fault causes.
    #[inline]
    pub const fn active_faults(&self) -> MotorFault {
        self.faults
    }

    #[inline]
    pub const fn totalizer(&self) -> &RunHourTotalizer {
        &self.totalizer
    }

    // ── Scan ────────────────────────────────────────────────────────

    /// Execute one scan.
    pub fn execute(&mut self, inputs: &MotorInputs) -> MotorOutputs {
        if self.first_scan || self.scada.control.initialize >= 1 {
            self.initialize_setpoints();
            self.first_scan = false;
        }

        self.mode = OperatingMode::from_register(self.scada.control.mode);
        self.map_inputs(inputs);
        self.latch_faults();
        self.evaluate_permissive();
        self.evaluate_command(inputs.auto_start);
        self.supervise(inputs.sec_pulse);
        if self.totalizer.tick(inputs.sec_pulse, self.running) {
            self.scada.feedback.run_hours = self.scada.feedback.run_hours.saturating_add(1);
        }
        self.write_feedback();
        self.outputs
    }

    fn initialize_setpoints(&mut self) {
        let control = &mut self.scada.control;
        self.defaults.apply(control);
        control.initialize = 0;
        control.reset = 0;
        control.manual_override = 0;
        debug!(motor = %self.name, "setpoints initialized");
    }

    fn mark_unavailable(&mut self) {
        self.available = false;
        self.priority = FAULT_PRIORITY;
    }

    fn map_inputs(&mut self, inputs: &MotorInputs) {
        let control = self.scada.control;
        if control.simulate >= 1 {
            self.ma_auto = control.simulate_ma_auto != 0;
            self.running = control.simulate_running != 0;
            self.trip = control.simulate_trip != 0;
        } else {
            self.ma_auto = inputs.ma_auto;
            self.running = inputs.running;
            self.trip = inputs.trip;
        }

        if self.mode == OperatingMode::Maintenance {
            self.trip = false;
            self.mark_unavailable();
        }

        self.interlock = control.bypass_interlock >= 1 || inputs.interlock;

        let feedback = &mut self.scada.feedback;
        feedback.ma_auto = self.ma_auto;
        feedback.running = self.running;
        feedback.interlock = self.interlock;

        let control = &mut self.scada.control;
        control.reset = limit_register(control.reset, 0, 1);
        control.manual_override = limit_register(control.manual_override, 0, 1);
    }

    fn latch_faults(&mut self) {
        let cause = if self.trip {
            self.scada.feedback.tripped = true;
            Some(MotorFault::TRIP)
        } else if self.start_timer.alarm() {
            Some(MotorFault::FAIL_TO_START)
        } else if self.stop_timer.alarm() {
            Some(MotorFault::FAIL_TO_STOP)
        } else {
            None
        };

        if let Some(fault) = cause {
            if !self.faults.contains(fault) {
                warn!(motor = %self.name, ?fault, "fault latched");
            }
            self.faults |= fault;
            self.fault_alarm = true;
            self.state = fault.state().unwrap_or(MotorState::Trip);
            self.mode = OperatingMode::Off;
            self.mark_unavailable();
        }

        if self.scada.control.reset == 1 && !self.trip {
            if self.fault_alarm {
                info!(motor = %self.name, faults = ?self.faults, "faults reset by operator");
            }
            self.fault_alarm = false;
            self.faults = MotorFault::empty();
            self.state = MotorState::Stop;
            self.start_timer.reset();
            self.stop_timer.reset();
            self.scada.feedback.tripped = false;
            if OperatingMode::from_register(self.scada.control.mode) == OperatingMode::Manual {
                self.scada.control.mode = OperatingMode::Off.register();
            }
        }
        // One-shot: the OPC link cannot be trusted to clear it.
        self.scada.control.reset = 0;
    }

    fn evaluate_permissive(&mut self) {
        if self.fault_alarm {
            self.permissive = false;
            self.mark_unavailable();
        } else if self.mode == OperatingMode::Maintenance {
            self.state = MotorState::Maintenance;
            self.permissive = false;
            self.command = Command::Stop;
            self.mark_unavailable();
        } else if self.ma_auto {
            if self.mode == OperatingMode::Auto {
                self.available = true;
                self.priority = self.assigned_priority;
            } else {
                self.mark_unavailable();
            }
            self.permissive = self.interlock;
            self.state = MotorState::from_run_feedback(self.running);
        } else {
            // Local control panel.
            self.permissive = false;
            self.mark_unavailable();
            self.state = MotorState::from_run_feedback(self.running);
        }
    }

    fn evaluate_command(&mut self, auto_start: bool) {
        let requested = match self.mode {
            OperatingMode::Auto => auto_start,
            OperatingMode::Manual => true,
            OperatingMode::Off | OperatingMode::Maintenance => false,
        };
        self.command = if self.permissive && requested {
            Command::Start
        } else {
            Command::Stop
        };
    }

    fn supervise(&mut self, sec_pulse: bool) {
        let start = self.command.is_start();
        let supervised = self.ma_auto && self.mode != OperatingMode::Maintenance;
        let awaiting_run = supervised && start && !self.running;
        let awaiting_stop = supervised && !start && self.running;

        // Each episode counts from zero, including after a feedback dropout
        // or a spell on the local selector.
        if self.edges.rising_edge(AWAITING_RUN, awaiting_run) {
            self.start_timer.restart();
        }
        if self.edges.rising_edge(AWAITING_STOP, awaiting_stop) {
            self.stop_timer.restart();
        }

        if awaiting_run {
            if self
                .start_timer
                .tick(sec_pulse, self.scada.control.fail_to_start_sp)
            {
                warn!(
                    motor = %self.name,
                    seconds = self.start_timer.count(),
                    "fail to start"
                );
            }
        } else if awaiting_stop {
            if self
                .stop_timer
                .tick(sec_pulse, self.scada.control.fail_to_stop_sp)
            {
                warn!(
                    motor = %self.name,
                    seconds = self.stop_timer.count(),
                    "fail to stop"
                );
            }
        } else if !self.ma_auto
            && !self.fault_alarm
            && self.mode != OperatingMode::Maintenance
        {
            self.state = MotorState::from_run_feedback(self.running);
        }
    }

    fn write_feedback(&mut self) {
        let feedback = &mut self.scada.feedback;
        feedback.state = self.state as u8;
        feedback.command = self.command as u8;
        feedback.ready = self.available;
        feedback.priority = self.priority;
        feedback.fail_to_start = self.start_timer.alarm();
        feedback.fail_to_stop = self.stop_timer.alarm();
        feedback.start_counter = self.start_timer.count();
        feedback.stop_counter = self.stop_timer.count();

        self.outputs = MotorOutputs {
            command: self.command.is_start(),
            permissive: self.permissive,
            fault_alarm: self.fault_alarm,
            available: self.available,
            running: self.running,
            priority: self.priority,
        };
    }
}
