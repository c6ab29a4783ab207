// src/lexer/nfa.rs
// Nondeterministic engine with epsilon links.
//
// Closures are maintained incrementally. Every registration recomputes its
// propagation from the *current* forward/reverse closure maps, so the table
// content after a batch of calls does not depend on their order:
//
//   * a symbol edge on `p` is copied to every state that epsilon-reaches `p`;
//   * an accept entry on `q` is copied to every state that epsilon-reaches `q`;
//   * an epsilon link `p -> q` merges closures, then pulls `q`'s edges and
//     accept entry into everything that now reaches `q`.
//
// Scanning therefore only needs the closure of the start state; every later
// state set is closed by construction.

use std::{
    fmt::{self, Debug},
    hash::Hash,
};

use hashbrown::HashMap;

use super::{
    scan::{Classifier, Match, Scan, symbol_at},
    state_set::{StateId, StateSet},
};

pub type Priority = i32;

pub struct Nfa<S, T, Y = char> {
    classify: Classifier<Y>,
    verbose: bool,

    // state arena
    labels: Vec<S>,
    ids: HashMap<S, StateId>,
    start: StateId,

    // per-state rows, indexed by StateId
    transitions: Vec<HashMap<Y, StateSet>>,
    accepting: Vec<Option<(Priority, T)>>,
    forward: Vec<StateSet>,
    reverse: Vec<StateSet>,

    accept_set: StateSet,
}

impl<S, T> Nfa<S, T, char>
where
    S: Clone + Eq + Hash + Ord + Debug,
    T: Clone + Ord,
{
    pub fn new(start: S) -> Self {
        Self::with_classes(start, |c| c)
    }
}

impl<S, T, Y> Nfa<S, T, Y>
where
    S: Clone + Eq + Hash + Ord + Debug,
    T: Clone + Ord,
    Y: Clone + Eq + Hash + Debug,
{
    /// Engine whose table is keyed by `classify(c)` instead of the raw char.
    pub fn with_classes<F>(start: S, classify: F) -> Self
    where
        F: Fn(char) -> Y + Send + Sync + 'static,
    {
        let mut nfa = Self {
            classify: Box::new(classify),
            verbose: false,
            labels: Vec::new(),
            ids: HashMap::new(),
            start: StateId(0),
            transitions: Vec::new(),
            accepting: Vec::new(),
            forward: Vec::new(),
            reverse: Vec::new(),
            accept_set: StateSet::new(),
        };
        nfa.start = nfa.intern(start);
        nfa
    }

    fn intern(&mut self, label: S) -> StateId {
        if let Some(&id) = self.ids.get(&label) {
            return id;
        }
        let id = StateId(self.labels.len() as u32);
        self.ids.insert(label.clone(), id);
        self.labels.push(label);
        self.transitions.push(HashMap::new());
        self.accepting.push(None);
        self.forward.push(StateSet::new());
        self.reverse.push(StateSet::new());
        id
    }

    /// `{id} ∪ reverse(id)`: every state that epsilon-reaches `id`.
    fn reaching(&self, id: StateId) -> StateSet {
        let mut s = self.reverse[id.idx()].clone();
        s.insert(id);
        s
    }

    /// `{id} ∪ forward(id)`
    fn reachable(&self, id: StateId) -> StateSet {
        let mut s = self.forward[id.idx()].clone();
        s.insert(id);
        s
    }

    fn mark_accepting(&mut self, states: &StateSet, priority: Priority, token: &T) {
        for st in states.iter() {
            self.accepting[st.idx()] = Some((priority, token.clone()));
            self.accept_set.insert(st);
        }
    }

    pub fn set_start(&mut self, state: S) {
        self.start = self.intern(state);
    }

    pub fn start(&self) -> &S {
        &self.labels[self.start.idx()]
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Adds `from --sym--> to` for every symbol in `inputs`. The edge is
    /// inherited by every state that epsilon-reaches `from`.
    pub fn transition<I>(&mut self, from: S, inputs: I, to: S)
    where
        I: IntoIterator<Item = Y>,
    {
        let from = self.intern(from);
        let to = self.intern(to);
        let sources = self.reaching(from);

        for sym in inputs {
            log::trace!(
                "nfa: {:?} --{sym:?}--> {:?} ({} source(s))",
                self.labels[from.idx()],
                self.labels[to.idx()],
                sources.len()
            );
            for st in sources.iter() {
                self.transitions[st.idx()]
                    .entry(sym.clone())
                    .or_default()
                    .insert(to);
            }
        }
    }

    /// Adds an epsilon link `from -> to`.
    pub fn epsilon(&mut self, from: S, to: S) {
        let from = self.intern(from);
        let to = self.intern(to);

        let sources = self.reaching(from);
        let targets = self.reachable(to);

        for st in sources.iter() {
            self.forward[st.idx()].union_with(&targets);
        }
        for st in targets.iter() {
            self.reverse[st.idx()].union_with(&sources);
        }

        // `to`'s row already holds everything its own closure can do.
        if !self.transitions[to.idx()].is_empty() {
            let inherited = self.transitions[to.idx()].clone();
            for st in sources.iter() {
                let row = &mut self.transitions[st.idx()];
                for (sym, set) in &inherited {
                    row.entry(sym.clone()).or_default().union_with(set);
                }
            }
        }

        if let Some((priority, token)) = self.accepting[to.idx()].clone() {
            self.mark_accepting(&sources, priority, &token);
        }

        log::trace!(
            "nfa: {:?} -ε-> {:?} (merged {} x {} states)",
            self.labels[from.idx()],
            self.labels[to.idx()],
            sources.len(),
            targets.len()
        );
    }

    /// Single entry point: `None` registers an epsilon link.
    pub fn link<I>(&mut self, from: S, inputs: Option<I>, to: S)
    where
        I: IntoIterator<Item = Y>,
    {
        match inputs {
            Some(inputs) => self.transition(from, inputs, to),
            None => self.epsilon(from, to),
        }
    }

    pub fn accept(&mut self, state: S, token: T) {
        self.accept_with_priority(state, token, 0);
    }

    /// Marks `state`, and every state that currently epsilon-reaches it, as
    /// accepting with `(priority, token)`. Existing entries are overwritten.
    pub fn accept_with_priority(&mut self, state: S, token: T, priority: Priority) {
        let id = self.intern(state);
        let states = self.reaching(id);
        self.mark_accepting(&states, priority, &token);
    }

    // ---------- introspection ----------

    pub fn state_count(&self) -> usize {
        self.labels.len()
    }

    fn sorted_labels(&self, set: &StateSet) -> Vec<&S> {
        let mut out: Vec<&S> = set.iter().map(|id| &self.labels[id.idx()]).collect();
        out.sort();
        out
    }

    /// States reachable from `state` by one or more epsilon links, sorted.
    /// Unknown states have an empty closure.
    pub fn forward_closure(&self, state: &S) -> Vec<&S> {
        match self.ids.get(state) {
            Some(id) => self.sorted_labels(&self.forward[id.idx()]),
            None => Vec::new(),
        }
    }

    /// States that reach `state` by one or more epsilon links, sorted.
    pub fn reverse_closure(&self, state: &S) -> Vec<&S> {
        match self.ids.get(state) {
            Some(id) => self.sorted_labels(&self.reverse[id.idx()]),
            None => Vec::new(),
        }
    }

    pub fn is_accepting(&self, state: &S) -> bool {
        self.ids
            .get(state)
            .is_some_and(|id| self.accept_set.contains(*id))
    }

    pub fn accept_entry(&self, state: &S) -> Option<(Priority, &T)> {
        let id = self.ids.get(state)?;
        self.accepting[id.idx()].as_ref().map(|(p, t)| (*p, t))
    }

    /// Targets of `state` on `symbol`, sorted.
    pub fn targets(&self, state: &S, symbol: &Y) -> Vec<&S> {
        self.ids
            .get(state)
            .and_then(|id| self.transitions[id.idx()].get(symbol))
            .map(|set| self.sorted_labels(set))
            .unwrap_or_default()
    }

    fn fmt_set(&self, set: &StateSet) -> String {
        let parts: Vec<String> = self
            .sorted_labels(set)
            .into_iter()
            .map(|s| format!("{s:?}"))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    // ---------- scanning ----------

    /// Longest match from byte offset `start`. When several accepting states
    /// are active at the final accept, the highest priority wins, then the
    /// smallest token label.
    pub fn scan<'t>(&self, text: &'t str, start: usize) -> Match<'t, T> {
        let mut pos = start;
        let mut active = self.reachable(self.start);
        if self.verbose {
            log::debug!("starting state set is {}", self.fmt_set(&active));
        }

        let mut last_accepts = StateSet::new();
        let mut last_end = start;

        while let Some((sym, width)) = symbol_at(text, pos, &*self.classify) {
            let mut next = StateSet::new();
            for st in active.iter() {
                if let Some(targets) = self.transitions[st.idx()].get(&sym) {
                    next.union_with(targets);
                }
            }
            if next.is_empty() {
                break;
            }
            if self.verbose {
                log::debug!("input {sym:?}, moving to state set {}", self.fmt_set(&next));
            }

            active = next;
            pos += width;

            let accepts = self.accept_set.intersection(&active);
            if !accepts.is_empty() {
                last_accepts = accepts;
                last_end = pos;
            }
        }

        if self.verbose {
            log::debug!("no more transitions possible at byte {pos}");
        }

        let best = last_accepts
            .iter()
            .filter_map(|id| self.accepting[id.idx()].as_ref())
            .min_by(|(pa, ta), (pb, tb)| pb.cmp(pa).then_with(|| ta.cmp(tb)));

        match best {
            Some((_, token)) => {
                if self.verbose {
                    log::debug!(
                        "accept state(s) encountered: {}",
                        self.fmt_set(&last_accepts)
                    );
                }
                Match {
                    token: Some(token.clone()),
                    lexeme: &text[start..last_end],
                }
            }
            None => {
                if self.verbose {
                    log::debug!("no accept state encountered");
                }
                Match::none()
            }
        }
    }
}

impl<S, T, Y> Scan<T> for Nfa<S, T, Y>
where
    S: Clone + Eq + Hash + Ord + Debug,
    T: Clone + Ord,
    Y: Clone + Eq + Hash + Debug,
{
    fn scan<'t>(&self, text: &'t str, start: usize) -> Match<'t, T> {
        Nfa::scan(self, text, start)
    }
}

impl<S, T, Y> fmt::Display for Nfa<S, T, Y>
where
    S: Clone + Eq + Hash + Ord + Debug,
    T: Clone + Ord + Debug,
    Y: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States: {} (start {:?})", self.labels.len(), self.start())?;

        let mut order: Vec<StateId> = (0..self.labels.len() as u32).map(StateId).collect();
        order.sort_by(|a, b| self.labels[a.idx()].cmp(&self.labels[b.idx()]));

        for &id in &order {
            if let Some((p, t)) = &self.accepting[id.idx()] {
                writeln!(f, "{:?} = {:?} (priority {p})", self.labels[id.idx()], t)?;
            }
        }
        for &id in &order {
            let label = &self.labels[id.idx()];
            if !self.forward[id.idx()].is_empty() {
                writeln!(f, "{label:?} -ε-> {}", self.fmt_set(&self.forward[id.idx()]))?;
            }
            let mut row: Vec<(String, &StateSet)> = self.transitions[id.idx()]
                .iter()
                .map(|(sym, set)| (format!("{sym:?}"), set))
                .collect();
            row.sort_by(|a, b| a.0.cmp(&b.0));
            for (sym, set) in row {
                writeln!(f, "{label:?} --{sym}--> {}", self.fmt_set(set))?;
            }
        }
        Ok(())
    }
}
