//! Motor function block types shared between the control unit and the
//! operator layer.

pub mod defaults;
pub mod fault;
pub mod scada;
pub mod state;
