use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use tld_compiler::Compilation;

pub fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}

pub fn write_text(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
        }
    }
    fs::write(path, text)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
    write_text(path, &json)
}

/// Write the intermediate tries and decoded labels next to each other.
///
/// - `tld_tree.json`: raw tries
/// - `tld_itree.json`: compacted tries
/// - `xntlds.json`: `xn--` label -> Unicode form
/// - `tlds.txt`: source list followed by the decoded forms
pub fn write_diagnostics(dir: &Path, compilation: &Compilation, suffix_text: &str) -> Result<Vec<PathBuf>, String> {
    let diagnostics = compilation.diagnostics();

    let tree = dir.join("tld_tree.json");
    write_json(&tree, &diagnostics.raw)?;

    let itree = dir.join("tld_itree.json");
    write_json(&itree, &diagnostics.compacted)?;

    let xntlds = dir.join("xntlds.json");
    write_json(&xntlds, diagnostics.decoded_labels)?;

    let tlds = dir.join("tlds.txt");
    write_text(&tlds, suffix_text)?;

    Ok(vec![tree, itree, xntlds, tlds])
}
