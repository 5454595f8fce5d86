//! Green Wave
//!
//! A traffic-signal speed advisory simulator that runs headless, one tick at
//! a time.

pub mod simulation;
