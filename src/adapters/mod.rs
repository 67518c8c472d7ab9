// Adapters layer: concrete rate providers behind the domain ports.

pub mod fixed;
pub mod http;
