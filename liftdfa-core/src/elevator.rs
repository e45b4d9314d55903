//! Elevator driven by a three-state movement automaton.
//!
//! ```text
//!            1                 0
//!   STOPPED ----> UP      UP ----> UP      UP   --1--> STOPPED
//!   STOPPED ----> DOWN    DOWN --> DOWN    DOWN --1--> STOPPED
//!            0                 0
//! ```
//!
//! A trip of `d` floors is encoded as a head symbol selecting the direction
//! (`1` up, `0` down), `d - 1` continuation `0`s and a terminating `1`. The
//! automaton's step count for that string is exactly `d`, and the elevator
//! moves by the step count it gets back.

use crate::automaton::Automaton;
use crate::error::{AutomatonError, ElevatorError};
use crate::state::{State, Symbol};
use serde::Serialize;
use std::fmt;

pub const STOPPED: &str = "STOPPED";
pub const UP: &str = "UP";
pub const DOWN: &str = "DOWN";

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Symbol that leaves `STOPPED` in this direction.
    pub fn head_symbol(self) -> Symbol {
        match self {
            Direction::Up => Symbol::One,
            Direction::Down => Symbol::Zero,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// A completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub from: u32,
    pub to: u32,
    /// Step count reported by the automaton; zero for a no-op.
    pub steps: usize,
    /// `None` when the elevator was already at the requested floor.
    pub direction: Option<Direction>,
}

impl Movement {
    fn stay(floor: u32) -> Self {
        Self {
            from: floor,
            to: floor,
            steps: 0,
            direction: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.direction.is_none()
    }
}

/// Point-in-time view of an elevator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElevatorStatus {
    pub floors: u32,
    pub current_floor: u32,
    pub executions: u64,
}

/// Encodes a trip of `distance` floors as a bitstring.
pub fn encode_travel(direction: Direction, distance: u32) -> Result<String, ElevatorError> {
    if distance == 0 {
        return Err(ElevatorError::InvalidRequest {
            reason: "cannot encode a trip of zero floors".to_string(),
        });
    }

    let mut bits = String::with_capacity(distance as usize + 1);
    bits.push(direction.head_symbol().as_char());
    bits.extend(std::iter::repeat(Symbol::Zero.as_char()).take(distance as usize - 1));
    bits.push(Symbol::One.as_char());
    Ok(bits)
}

/// Builds the movement automaton.
fn movement_automaton() -> Result<Automaton, AutomatonError> {
    let mut dfa = Automaton::new();
    dfa.register(STOPPED, State::new(STOPPED).start().final_state())?;
    dfa.register(UP, State::new(UP))?;
    dfa.register(DOWN, State::new(DOWN))?;

    dfa.add_transition(STOPPED, Symbol::One, UP)?;
    dfa.add_transition(STOPPED, Symbol::Zero, DOWN)?;
    dfa.add_transition(UP, Symbol::Zero, UP)?;
    dfa.add_transition(UP, Symbol::One, STOPPED)?;
    dfa.add_transition(DOWN, Symbol::Zero, DOWN)?;
    dfa.add_transition(DOWN, Symbol::One, STOPPED)?;

    Ok(dfa)
}

/// An elevator serving floors `0..=floors`.
#[derive(Debug, Clone)]
pub struct Elevator {
    floors: u32,
    current_floor: u32,
    /// Automaton runs performed so far.
    executions: u64,
    automaton: Automaton,
}

impl Elevator {
    /// Creates an elevator parked at floor 0.
    pub fn try_new(floors: u32) -> Result<Self, ElevatorError> {
        Ok(Self {
            floors,
            current_floor: 0,
            executions: 0,
            automaton: movement_automaton()?,
        })
    }

    pub fn new(floors: u32) -> Self {
        match Self::try_new(floors) {
            Ok(elevator) => elevator,
            // The wiring is fixed; a failure here is a bug in this module.
            Err(e) => unreachable!("movement automaton wiring is invalid: {}", e),
        }
    }

    pub fn floors(&self) -> u32 {
        self.floors
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub fn executions(&self) -> u64 {
        self.executions
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            floors: self.floors,
            current_floor: self.current_floor,
            executions: self.executions,
        }
    }

    /// Moves up to floor `to`.
    pub fn floor_up(&mut self, to: i64) -> Result<Movement, ElevatorError> {
        let to = self.check_range(to)?;
        if to == self.current_floor {
            return Ok(Movement::stay(to));
        }
        if to < self.current_floor {
            return Err(ElevatorError::InvalidRequest {
                reason: format!(
                    "cannot go up from floor {} to floor {}",
                    self.current_floor, to
                ),
            });
        }
        self.travel(Direction::Up, to)
    }

    /// Moves down to floor `to`.
    pub fn floor_down(&mut self, to: i64) -> Result<Movement, ElevatorError> {
        let to = self.check_range(to)?;
        if to == self.current_floor {
            return Ok(Movement::stay(to));
        }
        if to > self.current_floor {
            return Err(ElevatorError::InvalidRequest {
                reason: format!(
                    "cannot go down from floor {} to floor {}",
                    self.current_floor, to
                ),
            });
        }
        self.travel(Direction::Down, to)
    }

    /// Moves to floor `to` in whichever direction it lies.
    pub fn go_to(&mut self, to: i64) -> Result<Movement, ElevatorError> {
        let current = i64::from(self.current_floor);
        if to > current {
            self.floor_up(to)
        } else if to < current {
            self.floor_down(to)
        } else {
            Ok(Movement::stay(self.current_floor))
        }
    }

    fn check_range(&self, to: i64) -> Result<u32, ElevatorError> {
        u32::try_from(to)
            .ok()
            .filter(|floor| *floor <= self.floors)
            .ok_or(ElevatorError::OutOfRange {
                requested: to,
                floors: self.floors,
            })
    }

    /// Runs the encoded trip and commits the move only if it fully succeeds.
    fn travel(&mut self, direction: Direction, to: u32) -> Result<Movement, ElevatorError> {
        let from = self.current_floor;
        let distance = from.abs_diff(to);
        let bits = encode_travel(direction, distance)?;

        self.executions += 1;
        let steps = self.automaton.execute(&bits)?;
        if steps != distance as usize {
            return Err(ElevatorError::StepMismatch {
                expected: distance as usize,
                actual: steps,
            });
        }

        self.current_floor = match direction {
            Direction::Up => from + steps as u32,
            Direction::Down => from - steps as u32,
        };

        tracing::info!(
            "Elevator moved {} from floor {} to floor {} ({} steps, input {})",
            direction,
            from,
            self.current_floor,
            steps,
            bits
        );

        Ok(Movement {
            from,
            to: self.current_floor,
            steps,
            direction: Some(direction),
        })
    }
}
