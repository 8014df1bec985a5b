//! Per-request entry point: bearer authentication followed by admission control.

mod service;


pub use service::{GateOutcome, RequestGate};
