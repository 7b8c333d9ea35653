// Domain layer: core models and ports (interfaces). No image or filesystem code here.

pub mod model;
pub mod ports;
