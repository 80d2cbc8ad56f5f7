//! Character trie over a suffix set
//!
//! Every node owns its children in a `BTreeMap`, so iteration is always in
//! ascending code point order and two tries built from the same set are
//! identical regardless of insertion order.
//!
//! # Orientation
//!
//! With [`Orientation::Suffix`] the characters of each suffix are inserted
//! from last to first, so `"co"` and `"ico"` share the `o -> c` path. With
//! [`Orientation::Prefix`] they are inserted as written. The orientation is
//! kept on the [`Trie`] so later stages can emit patterns in reading order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// =============================================================================
// Orientation
// =============================================================================

/// Direction in which suffix characters are inserted into the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Last character first; shared endings share a path
    #[default]
    Suffix,
    /// First character first; shared beginnings share a path
    Prefix,
}

impl Orientation {
    /// Return the characters of `s` in trie insertion order.
    pub fn trie_order(self, s: &str) -> Vec<char> {
        match self {
            Self::Suffix => s.chars().rev().collect(),
            Self::Prefix => s.chars().collect(),
        }
    }

    /// Convert a string spelled in trie order back to reading order.
    pub fn reading_order(self, s: &str) -> String {
        match self {
            Self::Suffix => s.chars().rev().collect(),
            Self::Prefix => s.to_string(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix => f.write_str("suffix"),
            Self::Prefix => f.write_str("prefix"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suffix" | "reversed" => Ok(Self::Suffix),
            "prefix" | "forward" => Ok(Self::Prefix),
            other => Err(format!("unknown orientation '{other}' (expected 'suffix' or 'prefix')")),
        }
    }
}

// =============================================================================
// Trie Nodes
// =============================================================================

/// One character position in the trie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrieNode {
    /// Set when some suffix ends exactly at this node.
    #[serde(skip_serializing_if = "is_false")]
    pub terminal: bool,
    /// Child nodes keyed by the next character.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<char, TrieNode>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TrieNode {
    /// Create an empty, non-terminal node.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Insert a sequence of characters below this node.
    ///
    /// An empty sequence marks this node itself as terminal.
    pub fn insert<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self;
        for ch in chars {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    /// Walk a sequence of characters from this node.
    pub fn get<I>(&self, chars: I) -> Option<&TrieNode>
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self;
        for ch in chars {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Every string accepted from this node, spelled in trie order.
    pub fn strings(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut path = String::new();
        self.collect(&mut path, &mut out);
        out
    }

    fn collect(&self, path: &mut String, out: &mut BTreeSet<String>) {
        if self.terminal {
            out.insert(path.clone());
        }
        for (ch, child) in &self.children {
            path.push(*ch);
            child.collect(path, out);
            path.pop();
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }

    /// Number of terminal nodes in this subtree.
    pub fn terminal_count(&self) -> usize {
        usize::from(self.terminal)
            + self.children.values().map(TrieNode::terminal_count).sum::<usize>()
    }
}

// =============================================================================
// Trie
// =============================================================================

/// A suffix trie together with the orientation it was built in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trie {
    pub orientation: Orientation,
    pub root: TrieNode,
}

impl Trie {
    /// True if `suffix` (in reading order) is a member of the set.
    pub fn contains(&self, suffix: &str) -> bool {
        if suffix.is_empty() {
            return false;
        }
        self.root
            .get(self.orientation.trie_order(suffix))
            .is_some_and(|node| node.terminal)
    }

    /// The accepted set, in reading order.
    pub fn suffixes(&self) -> BTreeSet<String> {
        self.root
            .strings()
            .into_iter()
            .map(|s| self.orientation.reading_order(&s))
            .collect()
    }

    /// Number of suffixes in the trie.
    pub fn len(&self) -> usize {
        self.root.terminal_count()
    }

    /// True if no suffix was inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf() && !self.root.terminal
    }
}

/// Incremental trie construction.
#[derive(Debug, Default)]
pub struct TrieBuilder {
    trie: Trie,
}

impl TrieBuilder {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            trie: Trie {
                orientation,
                root: TrieNode::new(),
            },
        }
    }

    /// Insert one suffix. Empty strings are ignored.
    pub fn insert(&mut self, suffix: &str) -> &mut Self {
        if !suffix.is_empty() {
            let chars = self.trie.orientation.trie_order(suffix);
            self.trie.root.insert(chars);
        }
        self
    }

    pub fn build(self) -> Trie {
        self.trie
    }
}

/// Build a trie from a set of suffixes.
pub fn build_trie<I, S>(suffixes: I, orientation: Orientation) -> Trie
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TrieBuilder::new(orientation);
    for suffix in suffixes {
        builder.insert(suffix.as_ref());
    }
    builder.build()
}
