//! Benchmark categories by scheduling strategy

pub mod multi_thread;
pub mod single_thread;
