//! TLD Regex Core Library
//!
//! This crate turns a finite set of domain suffixes into a single regular
//! expression that matches exactly that set and nothing else.
//!
//! # Architecture
//!
//! Suffixes are inserted into a character trie (reversed by default, so that
//! suffixes sharing an ending share a path). The trie is compacted by folding
//! pass-through chains into multi-character edges, then compiled into a regex
//! fragment that uses character classes and dash ranges wherever sibling
//! edges allow it. Two fragments (ASCII-compatible labels and their decoded
//! Unicode forms) are finally assembled into one named group.
//!
//! # Modules
//!
//! - `trie`: Trie construction with explicit terminal flags
//! - `compact`: Collapsing non-branching, non-terminal chains
//! - `compile`: Regex fragment emission with class/range merging
//! - `escape`: Metacharacter escaping inside and outside character classes
//! - `assemble`: Final named-group pattern assembly
//!
//! # Example
//!
//! ```
//! use tld_core::{assemble, build_trie, compact, compile, Orientation};
//!
//! let trie = build_trie(["aa", "ba", "ca"], Orientation::Suffix);
//! let fragment = compile(&compact(&trie));
//! assert_eq!(fragment, "[a-c]a");
//! assert_eq!(assemble(&fragment, ""), "(?<tld>[a-c]a)");
//! ```

pub mod assemble;
pub mod compact;
pub mod compile;
pub mod escape;
pub mod trie;

// Re-export commonly used types
pub use assemble::{assemble, assemble_named, DEFAULT_GROUP_NAME, NEVER_MATCH};
pub use compact::{compact, compact_node, CompactedNode, CompactedTrie};
pub use compile::{compile, compile_node, Fragment};
pub use trie::{build_trie, Orientation, Trie, TrieBuilder, TrieNode};
