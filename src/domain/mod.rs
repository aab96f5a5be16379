// Domain layer: typed entities and the ports the core talks through.
// Storage rows never leave the adapters.

pub mod model;
pub mod ports;
