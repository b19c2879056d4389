//! Event plumbing
//!
//! Change notification throughout the engine goes through [`Signal`]s:
//! components announce value changes, nodes announce lifecycle transitions
//! and physics bodies announce collisions.

pub mod signal;

pub use signal::{listener, Listener, Signal, SignalBinding, SignalError};
