//! Motor function blocks and the uniform equipment wrapper used by the
//! plant scan.

pub mod motor;
pub mod vsd;

use mfb_common::motor::scada::MotorScada;

use crate::config::{EquipmentConfig, EquipmentKind};

use self::motor::MotorCore;
use self::vsd::{VsdInputs, VsdMotor, VsdOutputs};

/// One scanned piece of equipment.
#[derive(Debug, Clone)]
pub enum Equipment {
    Fixed(MotorCore),
    Vsd(VsdMotor),
}

impl Equipment {
    /// Build equipment from its configuration entry with the operator mode
    /// register preset.
    pub fn from_config(config: &EquipmentConfig) -> Self {
        let mut equipment = match config.kind {
            EquipmentKind::Motor => Self::Fixed(MotorCore::with_defaults(
                config.name.clone(),
                config.priority,
                config.defaults,
            )),
            EquipmentKind::Vsd => {
                let vsd =
                    VsdMotor::with_defaults(config.name.clone(), config.priority, config.defaults);
                Self::Vsd(match config.deadband {
                    Some(deadband) => vsd.with_deadband(deadband),
                    None => vsd,
                })
            }
        };
        equipment.scada_mut().control.mode = config.mode.register();
        equipment
    }

    pub const fn kind(&self) -> EquipmentKind {
        match self {
            Self::Fixed(_) => EquipmentKind::Motor,
            Self::Vsd(_) => EquipmentKind::Vsd,
        }
    }

    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub const fn core(&self) -> &MotorCore {
        match self {
            Self::Fixed(m) => m,
            Self::Vsd(v) => v.core(),
        }
    }

    pub const fn scada(&self) -> &MotorScada {
        self.core().scada()
    }

    pub fn scada_mut(&mut self) -> &mut MotorScada {
        match self {
            Self::Fixed(m) => m.scada_mut(),
            Self::Vsd(v) => v.scada_mut(),
        }
    }

    /// Execute one scan. Fixed-speed equipment ignores the speed inputs and
    /// reports zero speed outputs.
    pub fn execute(&mut self, inputs: &VsdInputs) -> VsdOutputs {
        match self {
            Self::Fixed(m) => VsdOutputs {
                motor: m.execute(&inputs.motor),
                ..Default::default()
            },
            Self::Vsd(v) => v.execute(inputs),
        }
    }
}
