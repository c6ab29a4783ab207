// src/bin/gen_table.rs
// Write the sample table to JSON so it can be edited and fed to scan_table.
// Usage:
//   cargo run --bin gen_table                # writes tables/sample_table.json
//   cargo run --bin gen_table -- /path/out.json

use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use tablex::lexer::tables::{sample_table, save_table_json};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out = env::args()
        .nth(1)
        .unwrap_or_else(|| "tables/sample_table.json".to_string());
    let out_path = Path::new(&out);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }

    let t = sample_table();
    let nfa = t.build_nfa();
    println!(
        "[gen_table] {} states, {} edge(s), {} accept(s), epsilon links: {}",
        nfa.state_count(),
        t.transitions.len(),
        t.accepts.len(),
        t.has_epsilon()
    );

    save_table_json(out_path, &t)?;
    println!("[gen_table] wrote {}", out_path.display());
    Ok(())
}
