// Domain layer: value types and the collaborator ports the engine drives.

pub mod model;
pub mod ports;
