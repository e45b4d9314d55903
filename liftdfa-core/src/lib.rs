//! # liftdfa-core
//!
//! Elevator movement modelled as a deterministic finite automaton.
//!
//! This crate provides:
//! - A two-symbol alphabet and automaton states
//! - An arena-backed DFA that executes bitstrings and counts steps
//! - An elevator that encodes trips as bitstrings and travels by step count

pub mod automaton;
pub mod elevator;
pub mod error;
pub mod state;

pub use automaton::{Automaton, Run};
pub use elevator::{encode_travel, Direction, Elevator, ElevatorStatus, Movement};
pub use error::{AutomatonError, ElevatorError};
pub use state::{State, StateId, Symbol};
