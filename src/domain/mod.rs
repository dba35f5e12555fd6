// Domain layer: models and ports. Concrete HTTP clients live in adapters.

pub mod model;
pub mod ports;
