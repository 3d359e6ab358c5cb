// Domain layer: row types and the collaborator traits the pipeline talks to.

pub mod model;
pub mod ports;
