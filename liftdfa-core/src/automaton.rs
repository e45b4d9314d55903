//! Deterministic finite automaton over the `{0, 1}` alphabet.
//!
//! States are stored in an arena and addressed by [`StateId`]. Execution is a
//! plain walk: one transition per symbol starting at the start state, and the
//! input is accepted only if the walk ends in a final state.

use crate::error::AutomatonError;
use crate::state::{State, StateId, Symbol};
use std::collections::HashMap;

/// Outcome of a successful execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Number of symbols consumed, equal to the number of transitions taken.
    pub steps: usize,
    /// The final state reached.
    pub end: StateId,
}

/// A registry of named states with exactly one start state.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    /// State arena, indexed by `StateId`.
    states: Vec<State>,

    /// Registered names -> arena index.
    index: HashMap<String, StateId>,

    /// The single start state, once registered.
    start: Option<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `state` under `name`.
    ///
    /// Fails without modifying the automaton if the name is taken or if the
    /// state is a second start state.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        state: State,
    ) -> Result<StateId, AutomatonError> {
        let name = name.into();

        if self.index.contains_key(&name) {
            return Err(AutomatonError::DuplicateState { name });
        }

        if state.is_start() {
            if let Some(existing) = self.start {
                return Err(AutomatonError::DuplicateStartState {
                    existing: self.states[existing.0].name().to_string(),
                    state: state.name().to_string(),
                });
            }
        }

        let id = StateId(self.states.len());
        if state.is_start() {
            self.start = Some(id);
        }
        self.states.push(state);
        self.index.insert(name, id);

        Ok(id)
    }

    /// Looks up a state by registered name.
    pub fn lookup(&self, name: &str) -> Result<StateId, AutomatonError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AutomatonError::UnknownState {
                name: name.to_string(),
            })
    }

    /// Returns the state behind an id handed out by this automaton.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not returned by this automaton and is out of
    /// bounds for its arena. Use [`Automaton::get`] for foreign ids.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Returns the state behind `id`, or `None` if it is not in this arena.
    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    /// Wires `from --symbol--> to` by registered names.
    pub fn add_transition(
        &mut self,
        from: &str,
        symbol: Symbol,
        to: &str,
    ) -> Result<(), AutomatonError> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        self.states[from.0].add_transition(to, symbol)
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over all states in registration order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i), state))
    }

    /// Executes a bitstring and returns the number of steps taken.
    ///
    /// Characters are decoded while walking, so the input is never copied.
    pub fn execute(&self, input: &str) -> Result<usize, AutomatonError> {
        let symbols = input.chars().enumerate().map(|(position, c)| {
            Symbol::try_from(c).map_err(|_| AutomatonError::InvalidSymbol {
                symbol: c,
                position,
            })
        });
        Ok(self.walk(symbols)?.steps)
    }

    /// Returns true if the automaton accepts `input`.
    pub fn accepts(&self, input: &str) -> bool {
        self.execute(input).is_ok()
    }

    /// Walks the automaton over `symbols` from the start state.
    pub fn run(&self, symbols: &[Symbol]) -> Result<Run, AutomatonError> {
        self.walk(symbols.iter().copied().map(Ok))
    }

    fn walk(
        &self,
        symbols: impl Iterator<Item = Result<Symbol, AutomatonError>>,
    ) -> Result<Run, AutomatonError> {
        let mut symbols = symbols.peekable();
        if symbols.peek().is_none() {
            return Err(AutomatonError::EmptyInput);
        }
        let mut current = self.start.ok_or(AutomatonError::NoStartState)?;
        let mut steps = 0;

        for symbol in symbols {
            let symbol = symbol?;
            let next = self.states[current.0].transition(symbol)?;
            tracing::trace!(
                "{} --{}--> {}",
                self.states[current.0].name(),
                symbol,
                self.states[next.0].name()
            );
            current = next;
            steps += 1;
        }

        let end = &self.states[current.0];
        if !end.is_final() {
            return Err(AutomatonError::InvalidString {
                state: end.name().to_string(),
            });
        }

        tracing::debug!("Accepted {} symbols, ended in {}", steps, end.name());

        Ok(Run {
            steps,
            end: current,
        })
    }
}
