// Domain layer: the restaurant aggregate and the ports the core depends on.

pub mod model;
pub mod ports;
