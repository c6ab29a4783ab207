// src/main.rs
use tablex::lexer::{Scan, TokenKind, tables::sample_table};

fn main() {
    env_logger::init();

    // A tiny sample covering identifiers, keywords, ints, comments, and symbols.
    let src = r#"
        if x1 == 12 // hello
        else y = (x1 + 3) * 2 $ 7
    "#;

    let mut nfa = sample_table().build_nfa();
    nfa.set_verbose(std::env::var("SCAN_VERBOSE").ok().as_deref() == Some("1"));

    println!("TOKENS:");
    for t in nfa.tokenize(src) {
        match &t.kind {
            TokenKind::Matched(kind) if kind == "White" => {}
            TokenKind::Matched(kind) => println!("{kind:<12} {:?}", t.text(src)),
            TokenKind::Error => println!("{:<12} {:?} at byte {}", "ERROR", t.text(src), t.start),
        }
    }
}
