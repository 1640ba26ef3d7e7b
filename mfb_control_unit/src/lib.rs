//! # MFB Control Unit Library
//!
//! Scan-based motor control for building services plants: fixed-speed
//! motors and VSD-driven motors executed as PLC function blocks, once per
//! scan, in configuration order.
//!
//! ## Layers
//!
//! 1. **signal** - Edge detection, pulse-counting fail timers, run-hour totalizer
//! 2. **analog** - Clamps and guarded raw ↔ engineering unit scaling
//! 3. **equipment** - `MotorCore` state machine and the `VsdMotor` extension
//! 4. **cycle** - Plant, second pulse and the scan runner
//! 5. **sim** - Simulated field drives closing the loop
//!
//! ## Allocation-Free Scan
//!
//! Edge memories live in fixed-capacity maps owned by each block. Plant
//! vectors and equipment names are allocated at construction only.

pub mod analog;
pub mod config;
pub mod cycle;
pub mod equipment;
pub mod signal;
pub mod sim;
