//! MFB Common Library
//!
//! Shared vocabulary for the motor function block workspace: the operator
//! facing SCADA view, state/mode enums with their register codes, fault
//! flags, per-equipment defaults and the TOML configuration loader.
//!
//! # Module Structure
//!
//! - [`motor`] - Motor state enums, SCADA view, faults and defaults
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use mfb_common::prelude::*;
//!
//! let scada = MotorScada::default();
//! assert_eq!(scada.feedback.priority, FAULT_PRIORITY);
//! ```

pub mod config;
pub mod consts;
pub mod motor;
pub mod prelude;
