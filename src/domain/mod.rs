// Domain layer: route models and the ports the batch pipeline is wired through.

pub mod model;
pub mod ports;
