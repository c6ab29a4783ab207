// src/lexer/tables/io.rs
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use anyhow::{Context, Result};

use super::TableSpec;

pub fn save_table_json(path: &Path, t: &TableSpec) -> Result<()> {
    let instant = Instant::now();
    let f = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, t).context("serialize table")?;
    w.flush()?;
    log::info!(
        "[tables] saved {} edge(s), {} accept(s) to {} in {} ms",
        t.transitions.len(),
        t.accepts.len(),
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

pub fn load_table_json_bytes(data: &[u8]) -> Result<TableSpec> {
    serde_json::from_slice::<TableSpec>(data).context("failed to parse table JSON")
}

pub fn load_table_json(path: &Path) -> Result<TableSpec> {
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    load_table_json_bytes(&data).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tables::sample_table;

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("tablex-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.json");

        let t = sample_table();
        save_table_json(&path, &t).unwrap();
        let back = load_table_json(&path).unwrap();
        assert_eq!(back, t);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_json_reports_context() {
        let err = load_table_json_bytes(b"{\"start\": 3}").unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse table JSON"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_table_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
