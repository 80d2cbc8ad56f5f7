//! Trie compaction
//!
//! Folds maximal runs of pass-through nodes (exactly one child, not terminal)
//! into a single multi-character edge. Branching nodes and terminal nodes are
//! compaction boundaries, so the accepted set and the position of every
//! terminal flag are unchanged.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::trie::{Orientation, Trie, TrieNode};

/// A trie node whose edges may carry more than one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompactedNode {
    #[serde(skip_serializing_if = "is_false")]
    pub terminal: bool,
    /// Edge label (in trie order) to child. Sibling labels start with
    /// distinct characters, so map order is first-character order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, CompactedNode>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CompactedNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
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
        for (label, child) in &self.children {
            let len = path.len();
            path.push_str(label);
            child.collect(path, out);
            path.truncate(len);
        }
    }

    /// Number of edges in this subtree.
    pub fn edge_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.edge_count())
            .sum()
    }
}

/// A compacted trie together with the orientation of its labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompactedTrie {
    pub orientation: Orientation,
    pub root: CompactedNode,
}

impl CompactedTrie {
    /// The accepted set, in reading order.
    pub fn suffixes(&self) -> BTreeSet<String> {
        self.root
            .strings()
            .into_iter()
            .map(|s| self.orientation.reading_order(&s))
            .collect()
    }
}

/// Compact a whole trie. The root itself is never merged away.
pub fn compact(trie: &Trie) -> CompactedTrie {
    let root = compact_node(&trie.root);
    log::debug!(
        "compacted trie: {} nodes -> {} edges",
        trie.root.node_count(),
        root.edge_count()
    );
    CompactedTrie {
        orientation: trie.orientation,
        root,
    }
}

/// Compact the subtree rooted at `node`.
pub fn compact_node(node: &TrieNode) -> CompactedNode {
    let mut children = BTreeMap::new();

    for (&ch, child) in &node.children {
        let mut label = String::from(ch);
        let mut end = child;

        // Absorb pass-through successors into the edge label
        while !end.terminal && end.children.len() == 1 {
            let Some((&next_ch, next)) = end.children.iter().next() else {
                break;
            };
            label.push(next_ch);
            end = next;
        }

        children.insert(label, compact_node(end));
    }

    CompactedNode {
        terminal: node.terminal,
        children,
    }
}
