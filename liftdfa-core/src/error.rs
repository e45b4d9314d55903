//! Core error types.

use crate::state::Symbol;
use thiserror::Error;

/// Errors from building or executing an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("state '{state}' already has a transition on '{symbol}'")]
    DuplicateTransition { state: String, symbol: Symbol },

    #[error("cannot register '{state}' as start state: '{existing}' is already the start state")]
    DuplicateStartState { existing: String, state: String },

    #[error("state already registered: {name}")]
    DuplicateState { name: String },

    #[error("state not found: {name}")]
    UnknownState { name: String },

    #[error("no transition from state '{state}' on '{symbol}'")]
    UndefinedTransition { state: String, symbol: Symbol },

    #[error("input rejected: execution ended in non-final state '{state}'")]
    InvalidString { state: String },

    #[error("input string is empty")]
    EmptyInput,

    #[error("invalid symbol {symbol:?} at position {position}: alphabet is {{0, 1}}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("automaton has no start state")]
    NoStartState,
}

impl AutomatonError {
    /// Automaton errors are contract violations, never transient.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns a stable error code for display and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AutomatonError::DuplicateTransition { .. } => "DUPLICATE_TRANSITION",
            AutomatonError::DuplicateStartState { .. } => "DUPLICATE_START_STATE",
            AutomatonError::DuplicateState { .. } => "DUPLICATE_STATE",
            AutomatonError::UnknownState { .. } => "UNKNOWN_STATE",
            AutomatonError::UndefinedTransition { .. } => "UNDEFINED_TRANSITION",
            AutomatonError::InvalidString { .. } => "INVALID_STRING",
            AutomatonError::EmptyInput => "INVALID_STRING",
            AutomatonError::InvalidSymbol { .. } => "INVALID_STRING",
            AutomatonError::NoStartState => "NO_START_STATE",
        }
    }
}

/// Errors from elevator requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElevatorError {
    #[error("floor {requested} out of range: valid floors are 0..={floors}")]
    OutOfRange { requested: i64, floors: u32 },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("automaton walked {actual} steps, expected {expected}")]
    StepMismatch { expected: usize, actual: usize },

    #[error("automaton error: {0}")]
    Automaton(#[from] AutomatonError),
}

impl ElevatorError {
    /// Returns whether this error indicates the request can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ElevatorError::Automaton(e) if e.is_retryable())
    }

    /// Returns a stable error code for display and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ElevatorError::OutOfRange { .. } => "OUT_OF_RANGE",
            ElevatorError::InvalidRequest { .. } => "INVALID_REQUEST",
            ElevatorError::StepMismatch { .. } => "STEP_MISMATCH",
            ElevatorError::Automaton(e) => e.error_code(),
        }
    }
}
