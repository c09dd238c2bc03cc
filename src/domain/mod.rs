// Domain layer: core models, the phone numbering plan, and ports
// (interfaces). No I/O happens here.

pub mod model;
pub mod phone;
pub mod ports;
