// Domain layer: platform identity, artifact paths and the loader ports.

pub mod model;
pub mod ports;
