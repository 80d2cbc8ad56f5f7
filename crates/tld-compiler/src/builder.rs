//! Suffix list -> regex pipeline
//!
//! The literal and decoded suffix sets each go through the same four steps:
//! build a trie in the chosen orientation, compact pass-through chains,
//! compile the compacted trie into a fragment, then assemble both fragments
//! into one named group. The intermediate tries are kept on [`Compilation`]
//! so the CLI can dump them.

use std::collections::BTreeMap;

use serde::Serialize;

use tld_core::{
    assemble_named, build_trie, compact, compile, CompactedTrie, Orientation, Trie,
    DEFAULT_GROUP_NAME,
};

use crate::parser::{parse_suffix_list, ParseError, SuffixList};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub orientation: Orientation,
    pub group_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Suffix,
            group_name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

/// Result of one pipeline run. The tries are kept for diagnostics only.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub pattern: String,
    pub literal: Trie,
    pub decoded: Trie,
    pub literal_compacted: CompactedTrie,
    pub decoded_compacted: CompactedTrie,
    pub decoded_labels: BTreeMap<String, String>,
}

/// Serializable view of the intermediate tries.
#[derive(Debug, Serialize)]
pub struct Diagnostics<'a> {
    pub raw: TreePair<'a, Trie>,
    pub compacted: TreePair<'a, CompactedTrie>,
    pub decoded_labels: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct TreePair<'a, T> {
    pub literal: &'a T,
    pub decoded: &'a T,
}

impl Compilation {
    pub fn diagnostics(&self) -> Diagnostics<'_> {
        Diagnostics {
            raw: TreePair {
                literal: &self.literal,
                decoded: &self.decoded,
            },
            compacted: TreePair {
                literal: &self.literal_compacted,
                decoded: &self.decoded_compacted,
            },
            decoded_labels: &self.decoded_labels,
        }
    }
}

/// Build → compact → compile both suffix sets, then assemble the pattern.
pub fn build_pattern(list: &SuffixList, options: &CompileOptions) -> Compilation {
    let literal = build_trie(&list.literal, options.orientation);
    let decoded = build_trie(&list.decoded, options.orientation);

    let literal_compacted = compact(&literal);
    let decoded_compacted = compact(&decoded);

    let literal_fragment = compile(&literal_compacted);
    let decoded_fragment = compile(&decoded_compacted);

    let pattern = assemble_named(&options.group_name, &literal_fragment, &decoded_fragment);

    log::debug!(
        "compiled {} literal and {} decoded suffixes into {} bytes",
        list.literal.len(),
        list.decoded.len(),
        pattern.len()
    );

    Compilation {
        pattern,
        literal,
        decoded,
        literal_compacted,
        decoded_compacted,
        decoded_labels: list.decoded_labels.clone(),
    }
}

/// Parse a suffix list and compile it in one step.
pub fn compile_suffix_text(text: &str, options: &CompileOptions) -> Result<Compilation, ParseError> {
    let list = parse_suffix_list(text)?;
    Ok(build_pattern(&list, options))
}

/// The source text followed by one line per decoded label.
pub fn render_suffix_text(source: &str, list: &SuffixList) -> String {
    let mut out = source.to_string();
    for decoded in list.decoded_labels.values() {
        out.push('\n');
        out.push_str(decoded);
    }
    out
}
