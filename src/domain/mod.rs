// Domain layer: core models and ports (interfaces). Nothing in here knows about HTTP, S3 or disk.

pub mod model;
pub mod ports;
