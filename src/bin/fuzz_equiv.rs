// src/bin/fuzz_equiv.rs
// Random tables + random inputs, two checks per case:
//   - single-target tables without epsilon links: DFA and NFA must agree;
//   - tables with epsilon links: replaying the registrations in a shuffled
//     order must scan exactly like replaying them in declared order.
// Env:
//   FUZZ_SEED=<u64>     base seed (default: time based)
//   FUZZ_CASES=<n>      number of cases (default 2000)
//   FUZZ_LEN=<n>        input length per case (default 64)
//   FUZZ_STATES=<n>     states per table (default 8)

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;
use tablex::lexer::{
    Nfa, Scan,
    tables::{AcceptSpec, EdgeSpec, TableSpec},
};

const ALPHABET: &[char] = &['a', 'b', 'c'];
const TOKENS: &[&str] = &["A", "B", "C"];

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn state(i: usize) -> String {
    format!("q{i}")
}

fn deterministic_table<R: Rng>(rng: &mut R, n: usize) -> TableSpec {
    let mut t = TableSpec::new(state(0));
    for s in 0..n {
        for &c in ALPHABET {
            if rng.random_bool(0.6) {
                let to = rng.random_range(0..n);
                t.edge(&state(s), &c.to_string(), &state(to));
            }
        }
        if rng.random_bool(0.3) {
            let tok = TOKENS[rng.random_range(0..TOKENS.len())];
            t.accept(&state(s), tok, 0);
        }
    }
    t
}

// One token and one priority everywhere, so every state has at most one
// possible accept entry whatever the order.
fn epsilon_table<R: Rng>(rng: &mut R, n: usize) -> TableSpec {
    let mut t = TableSpec::new(state(0));
    for s in 0..n {
        for &c in ALPHABET {
            for _ in 0..rng.random_range(0..=2) {
                let to = rng.random_range(0..n);
                t.edge(&state(s), &c.to_string(), &state(to));
            }
        }
        if rng.random_bool(0.25) {
            let to = rng.random_range(0..n);
            t.epsilon(&state(s), &state(to));
        }
        if rng.random_bool(0.2) {
            t.accept(&state(s), "T", 0);
        }
    }
    t
}

enum Op<'a> {
    Edge(&'a EdgeSpec),
    Accept(&'a AcceptSpec),
}

fn build_shuffled<R: Rng>(rng: &mut R, t: &TableSpec) -> Nfa<String, String> {
    let mut ops: Vec<Op> = t
        .transitions
        .iter()
        .map(Op::Edge)
        .chain(t.accepts.iter().map(Op::Accept))
        .collect();
    ops.shuffle(rng);

    let mut nfa = Nfa::new(t.start.clone());
    for op in ops {
        match op {
            Op::Edge(e) => {
                nfa.link(e.from.clone(), e.on.as_deref().map(str::chars), e.to.clone())
            }
            Op::Accept(a) => {
                nfa.accept_with_priority(a.state.clone(), a.token.clone(), a.priority)
            }
        }
    }
    nfa
}

fn random_input<R: Rng>(rng: &mut R, len: usize) -> String {
    // 'd' never appears in a table, so dead ends are exercised too.
    (0..len)
        .map(|_| match rng.random_range(0u32..10) {
            0 => 'd',
            k => ALPHABET[k as usize % ALPHABET.len()],
        })
        .collect()
}

fn run_case(seed: u64, n_states: usize, len: usize) -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(seed);

    // --- DFA vs NFA ---
    let t = deterministic_table(&mut rng, n_states);
    let dfa = t
        .build_dfa()
        .map_err(|e| format!("seed {seed}: build_dfa failed: {e}"))?;
    let nfa = t.build_nfa();
    let src = random_input(&mut rng, len);
    for pos in 0..src.len() {
        let (d, n) = (dfa.scan(&src, pos), nfa.scan(&src, pos));
        if d != n {
            return Err(format!(
                "seed {seed}: dfa/nfa diverge at {pos} on {src:?}: dfa={d:?} nfa={n:?}"
            ));
        }
    }
    if dfa.tokenize(&src) != nfa.tokenize(&src) {
        return Err(format!("seed {seed}: dfa/nfa tokenize diverge on {src:?}"));
    }

    // --- declared order vs shuffled order ---
    let t = epsilon_table(&mut rng, n_states);
    let declared = t.build_nfa();
    let shuffled = build_shuffled(&mut rng, &t);
    let src = random_input(&mut rng, len);
    for pos in 0..src.len() {
        let (a, b) = (declared.scan(&src, pos), shuffled.scan(&src, pos));
        if a != b {
            return Err(format!(
                "seed {seed}: order dependence at {pos} on {src:?}: declared={a:?} shuffled={b:?}\n{declared}"
            ));
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let seed = env_u64(
        "FUZZ_SEED",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    );
    let cases = env_u64("FUZZ_CASES", 2000);
    let len = env_usize("FUZZ_LEN", 64);
    let n_states = env_usize("FUZZ_STATES", 8).max(1);

    eprintln!("[fuzz] seed={seed} cases={cases} len={len} states={n_states}");
    let t0 = Instant::now();

    let failures: Vec<String> = (0..cases)
        .into_par_iter()
        .filter_map(|i| run_case(seed.wrapping_add(i), n_states, len).err())
        .collect();

    eprintln!(
        "[fuzz] {} case(s) in {} ms, {} failure(s)",
        cases,
        t0.elapsed().as_millis(),
        failures.len()
    );
    if !failures.is_empty() {
        for f in failures.iter().take(5) {
            eprintln!("{f}");
        }
        std::process::exit(1);
    }
}
