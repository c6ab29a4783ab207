// src/lexer/dfa.rs
// Deterministic engine: one active state, (state, symbol) -> state.

use std::{fmt::Debug, hash::Hash};

use hashbrown::HashMap;

use super::scan::{Classifier, Match, Scan, symbol_at};

/// Table-driven deterministic scanner.
///
/// Determinism is not validated: registering a second target for the same
/// `(state, symbol)` replaces the first one.
pub struct Dfa<S, T, Y = char> {
    classify: Classifier<Y>,
    verbose: bool,
    start: S,
    transitions: HashMap<S, HashMap<Y, S>>,
    accepting: HashMap<S, T>,
}

impl<S, T> Dfa<S, T, char>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone,
{
    pub fn new(start: S) -> Self {
        Self::with_classes(start, |c| c)
    }
}

impl<S, T, Y> Dfa<S, T, Y>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone,
    Y: Clone + Eq + Hash + Debug,
{
    /// Engine whose table is keyed by `classify(c)` instead of the raw char.
    pub fn with_classes<F>(start: S, classify: F) -> Self
    where
        F: Fn(char) -> Y + Send + Sync + 'static,
    {
        Self {
            classify: Box::new(classify),
            verbose: false,
            start,
            transitions: HashMap::new(),
            accepting: HashMap::new(),
        }
    }

    pub fn set_start(&mut self, state: S) {
        self.start = state;
    }

    pub fn start(&self) -> &S {
        &self.start
    }

    /// Log every step of `scan` at debug level.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Sets `(from, symbol) -> to` for every symbol in `inputs`.
    pub fn transition<I>(&mut self, from: S, inputs: I, to: S)
    where
        I: IntoIterator<Item = Y>,
    {
        let row = self.transitions.entry(from.clone()).or_default();
        for sym in inputs {
            if let Some(old) = row.insert(sym.clone(), to.clone())
                && old != to
            {
                log::warn!("dfa: {from:?} --{sym:?}--> {old:?} overwritten by {to:?}");
            }
        }
    }

    pub fn accept(&mut self, state: S, token: T) {
        self.accepting.insert(state, token);
    }

    pub fn target(&self, state: &S, symbol: &Y) -> Option<&S> {
        self.transitions.get(state)?.get(symbol)
    }

    pub fn token_of(&self, state: &S) -> Option<&T> {
        self.accepting.get(state)
    }

    /// Greedy longest match from byte offset `start`. The last accepting
    /// state reached wins; there is no retry of shorter prefixes.
    pub fn scan<'t>(&self, text: &'t str, start: usize) -> Match<'t, T> {
        let mut pos = start;
        let mut state = &self.start;

        let mut token = None;
        let mut end = start;

        while let Some((sym, width)) = symbol_at(text, pos, &*self.classify) {
            let Some(next) = self.target(state, &sym) else {
                break;
            };
            if self.verbose {
                log::debug!("input {sym:?}, moving from {state:?} to {next:?}");
            }
            state = next;
            pos += width;

            if let Some(t) = self.accepting.get(state) {
                token = Some(t.clone());
                end = pos;
            }
        }

        if self.verbose {
            log::debug!("no more transitions at byte {pos} (state {state:?})");
        }

        match (token, text.get(start..end)) {
            (Some(token), Some(lexeme)) => Match {
                token: Some(token),
                lexeme,
            },
            _ => Match::none(),
        }
    }
}

impl<S, T, Y> Scan<T> for Dfa<S, T, Y>
where
    S: Clone + Eq + Hash + Debug,
    T: Clone,
    Y: Clone + Eq + Hash + Debug,
{
    fn scan<'t>(&self, text: &'t str, start: usize) -> Match<'t, T> {
        Dfa::scan(self, text, start)
    }
}
