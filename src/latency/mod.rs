//! Simulated network latency.

pub mod simulator;

pub use simulator::{Cancelled, LatencySimulator};
