//! Automaton states and the input alphabet.
//!
//! The alphabet has exactly two symbols, `0` and `1`. States live in an
//! arena owned by [`Automaton`](crate::Automaton); transitions refer to their
//! targets by [`StateId`], so self-loops and cycles need no shared ownership.

use crate::error::AutomatonError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One symbol of the two-symbol input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
        }
    }

    /// Parses a full input string, reporting the first offending position.
    pub fn parse_str(input: &str) -> Result<Vec<Symbol>, AutomatonError> {
        input
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Symbol::try_from(c).map_err(|_| AutomatonError::InvalidSymbol {
                    symbol: c,
                    position,
                })
            })
            .collect()
    }
}

impl TryFrom<char> for Symbol {
    type Error = AutomatonError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            other => Err(AutomatonError::InvalidSymbol {
                symbol: other,
                position: 0,
            }),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Index of a state in its automaton's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named automaton node.
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    is_start: bool,
    is_final: bool,
    transitions: HashMap<Symbol, StateId>,
}

impl State {
    /// Creates a plain state (neither start nor final).
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_flags(name, false, false)
    }

    pub fn with_flags(name: impl Into<String>, is_start: bool, is_final: bool) -> Self {
        Self {
            name: name.into(),
            is_start,
            is_final,
            transitions: HashMap::new(),
        }
    }

    /// Marks this state as the start state.
    pub fn start(mut self) -> Self {
        self.is_start = true;
        self
    }

    /// Marks this state as accepting.
    pub fn final_state(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Registers `target` as the destination for `symbol`.
    ///
    /// A state has at most one edge per symbol; a second registration is
    /// rejected and the existing edge is kept.
    pub fn add_transition(
        &mut self,
        target: StateId,
        symbol: Symbol,
    ) -> Result<(), AutomatonError> {
        if self.transitions.contains_key(&symbol) {
            return Err(AutomatonError::DuplicateTransition {
                state: self.name.clone(),
                symbol,
            });
        }
        self.transitions.insert(symbol, target);
        Ok(())
    }

    /// Returns the destination for `symbol`.
    pub fn transition(&self, symbol: Symbol) -> Result<StateId, AutomatonError> {
        self.transitions
            .get(&symbol)
            .copied()
            .ok_or_else(|| AutomatonError::UndefinedTransition {
                state: self.name.clone(),
                symbol,
            })
    }

    /// Returns the symbols with an outgoing edge, in alphabet order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.transitions.keys().copied().collect();
        symbols.sort();
        symbols
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
