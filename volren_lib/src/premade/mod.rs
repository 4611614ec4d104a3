//! Synthetic volumes, transfer functions and lighting.
//! Used by tests and benchmarks, real data comes parsed from elsewhere.

pub mod scenes;
pub mod transfer_functions;
pub mod volumes;
