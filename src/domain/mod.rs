// Domain layer: statement records, parse state and the ports the pipeline talks through.

pub mod model;
pub mod ports;
