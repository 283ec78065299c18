// Domain layer: data model and ports. Pure data plus trait seams; no IO.

pub mod model;
pub mod ports;
