// src/lexer/tables/mod.rs
// Serializable table description that can be replayed into either engine.

pub mod io;
pub mod sample;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

// Re-exports to keep the external API flat.
pub use io::{load_table_json, load_table_json_bytes, save_table_json};
pub use sample::sample_table;

use super::{dfa::Dfa, nfa::Nfa};

/// One registration call. `on: None` is an epsilon link, otherwise every
/// char of `on` is a symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: String,
    #[serde(default)]
    pub on: Option<String>,
    pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AcceptSpec {
    pub state: String,
    pub token: String,
    #[serde(default)]
    pub priority: i32,
}

/// A hand-built transition table over chars, with string states and tokens.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    pub start: String,
    #[serde(default)]
    pub transitions: Vec<EdgeSpec>,
    #[serde(default)]
    pub accepts: Vec<AcceptSpec>,
}

impl TableSpec {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            ..Self::default()
        }
    }

    pub fn edge(&mut self, from: &str, on: &str, to: &str) -> &mut Self {
        self.transitions.push(EdgeSpec {
            from: from.to_string(),
            on: Some(on.to_string()),
            to: to.to_string(),
        });
        self
    }

    pub fn epsilon(&mut self, from: &str, to: &str) -> &mut Self {
        self.transitions.push(EdgeSpec {
            from: from.to_string(),
            on: None,
            to: to.to_string(),
        });
        self
    }

    pub fn accept(&mut self, state: &str, token: &str, priority: i32) -> &mut Self {
        self.accepts.push(AcceptSpec {
            state: state.to_string(),
            token: token.to_string(),
            priority,
        });
        self
    }

    pub fn has_epsilon(&self) -> bool {
        self.transitions.iter().any(|e| e.on.is_none())
    }

    /// Replays edges, then accepts, in declared order.
    pub fn build_nfa(&self) -> Nfa<String, String> {
        let mut nfa = Nfa::new(self.start.clone());
        for e in &self.transitions {
            nfa.link(
                e.from.clone(),
                e.on.as_deref().map(str::chars),
                e.to.clone(),
            );
        }
        for a in &self.accepts {
            nfa.accept_with_priority(a.state.clone(), a.token.clone(), a.priority);
        }
        log::debug!(
            "[tables] nfa: {} states from {} edge(s), {} accept(s)",
            nfa.state_count(),
            self.transitions.len(),
            self.accepts.len()
        );
        nfa
    }

    /// Fails on epsilon links. Priorities have no meaning for a single
    /// active state and are dropped.
    pub fn build_dfa(&self) -> Result<Dfa<String, String>> {
        let mut dfa = Dfa::new(self.start.clone());
        for e in &self.transitions {
            let Some(on) = &e.on else {
                bail!(
                    "epsilon link {} -> {} cannot be expressed by a deterministic table",
                    e.from,
                    e.to
                );
            };
            dfa.transition(e.from.clone(), on.chars(), e.to.clone());
        }
        for a in &self.accepts {
            if a.priority != 0 {
                log::warn!(
                    "[tables] priority {} on {} ignored by the deterministic engine",
                    a.priority,
                    a.state
                );
            }
            dfa.accept(a.state.clone(), a.token.clone());
        }
        Ok(dfa)
    }
}
