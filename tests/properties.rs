//! Order independence, closure symmetry and DFA/NFA agreement.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tablex::lexer::{Dfa, Nfa, Scan};

type Engine = Nfa<&'static str, &'static str>;

#[derive(Clone, Copy, Debug)]
enum Reg {
    Edge(&'static str, &'static str, &'static str),
    Eps(&'static str, &'static str),
    Accept(&'static str, &'static str, i32),
}

fn apply(regs: &[Reg]) -> Engine {
    let mut n = Nfa::new("s");
    for r in regs {
        match *r {
            Reg::Edge(from, on, to) => n.transition(from, on.chars(), to),
            Reg::Eps(from, to) => n.epsilon(from, to),
            Reg::Accept(st, tok, p) => n.accept_with_priority(st, tok, p),
        }
    }
    n
}

const LABELS: &[&str] = &["s", "a", "b", "c", "d", "e", "f"];

// Every accepting state resolves to a single (priority, token) whatever the
// order: each token is reachable from a disjoint set of states.
fn registrations() -> Vec<Reg> {
    vec![
        Reg::Eps("s", "a"),
        Reg::Eps("a", "b"),
        Reg::Eps("s", "d"),
        Reg::Edge("b", "x", "c"),
        Reg::Edge("c", "y", "c"),
        Reg::Eps("c", "f"),
        Reg::Accept("f", "XY", 2),
        Reg::Edge("d", "xz", "e"),
        Reg::Accept("e", "XZ", 1),
        Reg::Edge("a", "q", "b"),
    ]
}

fn outputs(n: &Engine) -> Vec<(Option<&'static str>, String)> {
    ["x", "xy", "xyyy", "xz", "z", "q", "qx", "w", ""]
        .iter()
        .map(|src| {
            let m = n.scan(src, 0);
            (m.token, m.lexeme.to_string())
        })
        .collect()
}

#[test]
fn order_independence_over_permutations() {
    let base = registrations();
    let expected = outputs(&apply(&base));
    assert_eq!(expected[0], (Some("XY"), "x".to_string()));
    // 'z' is only reachable from d, so "xz" stops after the x
    assert_eq!(expected[3], (Some("XY"), "x".to_string()));
    assert_eq!(expected[4], (Some("XZ"), "z".to_string()));
    assert_eq!(expected[6], (Some("XY"), "qx".to_string()));

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let mut regs = base.clone();
        regs.shuffle(&mut rng);
        assert_eq!(outputs(&apply(&regs)), expected, "round {round}: {regs:?}");
    }

    let mut reversed = base.clone();
    reversed.reverse();
    assert_eq!(outputs(&apply(&reversed)), expected);
}

#[test]
fn closure_symmetry_after_random_links() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut n: Engine = Nfa::new("s");
        for _ in 0..rng.random_range(1..12) {
            let from = LABELS[rng.random_range(0..LABELS.len())];
            let to = LABELS[rng.random_range(0..LABELS.len())];
            n.epsilon(from, to);
        }
        for &p in LABELS {
            for &q in LABELS {
                let fwd = n.forward_closure(&p).contains(&&q);
                let rev = n.reverse_closure(&q).contains(&&p);
                assert_eq!(fwd, rev, "{q} in forward({p}) vs {p} in reverse({q})");
            }
        }
    }
}

#[test]
fn closure_is_transitive_for_chains() {
    let chain = ["s", "a", "b", "c", "d"];
    let mut links: Vec<(&str, &str)> = chain.windows(2).map(|w| (w[0], w[1])).collect();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        links.shuffle(&mut rng);
        let mut n: Engine = Nfa::new("s");
        for &(from, to) in &links {
            n.epsilon(from, to);
        }
        assert_eq!(n.forward_closure(&"s"), vec![&"a", &"b", &"c", &"d"]);
        assert_eq!(n.reverse_closure(&"d"), vec![&"a", &"b", &"c", &"s"]);
    }
}

#[test]
fn longest_match_and_spec_example() {
    let mut d = Dfa::new("start");
    let mut n = Nfa::new("start");
    d.transition("start", ['a'], "S1");
    n.transition("start", ['a'], "S1");
    d.transition("S1", ['b'], "S2");
    n.transition("S1", ['b'], "S2");
    d.accept("S1", "A");
    n.accept("S1", "A");
    d.accept("S2", "AB");
    n.accept("S2", "AB");

    assert_eq!(d.scan("ab", 0).into_pair(), (Some("AB"), "ab"));
    assert_eq!(n.scan("ab", 0).into_pair(), (Some("AB"), "ab"));
    assert_eq!(n.scan("abc", 0).into_pair(), (Some("AB"), "ab"));
}

#[test]
fn priority_five_beats_one_and_ties_use_label_order() {
    let mut n: Engine = Nfa::new("s");
    n.transition("s", ['k'], "p5");
    n.transition("s", ['k'], "p1");
    n.accept_with_priority("p5", "ZZZ", 5);
    n.accept_with_priority("p1", "AAA", 1);
    assert_eq!(n.scan("k", 0).token, Some("ZZZ"));

    let mut n: Engine = Nfa::new("s");
    n.transition("s", ['k'], "u");
    n.transition("s", ['k'], "v");
    n.accept_with_priority("u", "beta", 3);
    n.accept_with_priority("v", "alpha", 3);
    assert_eq!(n.scan("k", 0).token, Some("alpha"));
}

#[test]
fn dfa_and_nfa_agree_on_random_single_target_tables() {
    let mut rng = StdRng::seed_from_u64(2024);
    let alphabet = ['a', 'b', 'c'];
    let tokens = ["T0", "T1", "T2"];

    for case in 0..100 {
        let n_states = rng.random_range(1..8u32);
        let mut d = Dfa::new(0u32);
        let mut n = Nfa::new(0u32);
        for s in 0..n_states {
            for &c in &alphabet {
                if rng.random_bool(0.6) {
                    let to = rng.random_range(0..n_states);
                    d.transition(s, [c], to);
                    n.transition(s, [c], to);
                }
            }
            if rng.random_bool(0.4) {
                let tok = tokens[rng.random_range(0..tokens.len())];
                d.accept(s, tok);
                n.accept(s, tok);
            }
        }

        let src: String = (0..rng.random_range(0..24))
            .map(|_| ['a', 'b', 'c', 'x'][rng.random_range(0..4)])
            .collect();
        for pos in 0..=src.len() {
            assert_eq!(d.scan(&src, pos), n.scan(&src, pos), "case {case} pos {pos} {src:?}");
        }
        assert_eq!(d.tokenize(&src), n.tokenize(&src), "case {case} {src:?}");
    }
}
