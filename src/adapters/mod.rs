// Adapters layer: concrete roster and registry implementations.

pub mod memory;
