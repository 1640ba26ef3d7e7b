//! Scan-synchronous signal primitives: edge detection, pulse-driven
//! supervision timers and the run-hour totalizer.

pub mod edge;
pub mod timer;
pub mod totalizer;
