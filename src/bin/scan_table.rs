// src/bin/scan_table.rs
// Tokenize a file (or stdin) with a JSON table.
// Usage:
//   cargo run --bin scan_table -- tables/sample_table.json input.txt
// Env:
//   SCAN_ENGINE=nfa|dfa   engine to replay the table into (default nfa)
//   SCAN_VERBOSE=1        trace every scan step (shown at RUST_LOG=debug)
//   SCAN_KEEP_ALL=1       also print tokens named White/LineComment

use std::{
    env, fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, bail};
use tablex::lexer::{
    Scan, Token, TokenKind,
    tables::{TableSpec, load_table_json},
};

fn env_flag(name: &str) -> bool {
    env::var(name).ok().as_deref() == Some("1")
}

fn tokenize_with(
    t: &TableSpec,
    engine: &str,
    verbose: bool,
    src: &str,
) -> Result<Vec<Token<String>>> {
    Ok(match engine {
        "nfa" => {
            let mut nfa = t.build_nfa();
            nfa.set_verbose(verbose);
            nfa.tokenize(src)
        }
        "dfa" => {
            let mut dfa = t.build_dfa()?;
            dfa.set_verbose(verbose);
            dfa.tokenize(src)
        }
        other => bail!("unknown SCAN_ENGINE {other:?} (expected nfa or dfa)"),
    })
}

fn main() -> Result<()> {
    let verbose = env_flag("SCAN_VERBOSE");
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut args = env::args().skip(1);
    let Some(table_path) = args.next() else {
        bail!("usage: scan_table <table.json> [input]");
    };
    let table = load_table_json(Path::new(&table_path))?;

    let src = match args.next() {
        Some(p) => fs::read_to_string(&p).with_context(|| format!("read {p}"))?,
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("read stdin")?;
            s
        }
    };

    let engine = env::var("SCAN_ENGINE").unwrap_or_else(|_| "nfa".to_string());
    let keep_all = env_flag("SCAN_KEEP_ALL");
    let tokens = tokenize_with(&table, &engine, verbose, &src)?;

    let mut errors = 0usize;
    for t in &tokens {
        match &t.kind {
            TokenKind::Matched(kind) => {
                if !keep_all && (kind == "White" || kind == "LineComment") {
                    continue;
                }
                println!("{:>6} {kind:<14} {:?}", t.start, t.text(&src));
            }
            TokenKind::Error => {
                errors += 1;
                println!("{:>6} {:<14} {:?}", t.start, "<error>", t.text(&src));
            }
        }
    }
    eprintln!(
        "[scan_table] {} token(s), {errors} error(s) via {engine}",
        tokens.len()
    );
    Ok(())
}
