//! TLD Regex Compiler
//!
//! This crate turns a line-delimited suffix list (such as the IANA root zone
//! TLD list) into a single regex that matches exactly those suffixes, both in
//! their ASCII-compatible form and, for `xn--` labels, their decoded form.

pub mod parser;
pub mod builder;

pub use builder::{
    build_pattern, compile_suffix_text, render_suffix_text, Compilation, CompileOptions,
    Diagnostics,
};
pub use parser::{
    decode_label, parse_suffix_list, parse_suffix_list_with, validate_decoded, ParseError,
    ParseStats, SkippedEntry, SuffixList,
};
