//! Regex emission from a compacted trie
//!
//! Each node compiles to a [`Fragment`] matching exactly the strings that
//! complete a suffix from that node, in reading order:
//!
//! - Single-character edges whose subtrees compile to the same fragment are
//!   merged into one character class, with runs of three or more
//!   consecutive code points written as `first-last`.
//! - Multi-character edges become literal sequences.
//! - More than one alternative is wrapped in `(?:...)`.
//! - A terminal node with children makes its fragment optional (`x?` or
//!   `(?:...)?`).
//!
//! Children are visited in ascending code point order and alternatives are
//! then ordered by longest match (stable), so output is byte-for-byte
//! reproducible.

use std::fmt;

use crate::compact::{CompactedNode, CompactedTrie};
use crate::escape::{escape_literal, push_class_member, push_literal};
use crate::trie::Orientation;

/// A compiled regex fragment.
///
/// No variant ever contains a top-level `|`, so any two fragments can be
/// concatenated as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Matches only the empty string (a leaf)
    Empty,
    /// A single quantifiable unit: a character, a class or a group
    Atom(String),
    /// A concatenation; needs a group before it can take a quantifier
    Sequence(String),
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Atom(text) | Self::Sequence(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Atom(text) | Self::Sequence(text) => text,
        }
    }

    /// Concatenate `next` after `self`.
    fn then(self, next: Fragment) -> Fragment {
        match (self, next) {
            (Self::Empty, other) | (other, Self::Empty) => other,
            (first, second) => {
                let mut text = first.into_string();
                text.push_str(second.as_str());
                Self::Sequence(text)
            }
        }
    }

    /// Make the fragment match the empty string as well.
    fn optional(self) -> Fragment {
        match self {
            Self::Empty => Self::Empty,
            Self::Atom(text) => Self::Sequence(format!("{text}?")),
            Self::Sequence(text) => Self::Sequence(format!("(?:{text})?")),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alternative at a node, before rendering.
enum Branch {
    /// Single-character edges sharing the same subtree fragment
    Class {
        members: Vec<char>,
        tail: Fragment,
        span: usize,
    },
    /// A multi-character edge (label in trie order)
    Edge {
        label: String,
        tail: Fragment,
        span: usize,
    },
}

impl Branch {
    /// Length in characters of the longest string this branch matches.
    fn span(&self) -> usize {
        match self {
            Self::Class { span, .. } | Self::Edge { span, .. } => *span,
        }
    }

    fn render(self, orientation: Orientation) -> Fragment {
        let (head, tail) = match self {
            Self::Class { members, tail, .. } => (render_class(members), tail),
            Self::Edge { label, tail, .. } => {
                let text = escape_literal(&orientation.reading_order(&label));
                (Fragment::Sequence(text), tail)
            }
        };
        match orientation {
            Orientation::Prefix => head.then(tail),
            Orientation::Suffix => tail.then(head),
        }
    }
}

/// Compile a compacted trie into a regex fragment (no anchors, no group).
pub fn compile(trie: &CompactedTrie) -> String {
    compile_node(&trie.root, trie.orientation).into_string()
}

/// Compile the subtree rooted at `node`.
///
/// Alternatives are ordered longest-match first (ties keep code point
/// order), so a leftmost-first engine prefers `com` over `co` or `c` when
/// the pattern is embedded without a right anchor.
pub fn compile_node(node: &CompactedNode, orientation: Orientation) -> Fragment {
    compile_spanned(node, orientation).0
}

/// Compile `node`, also returning the length of the longest string it matches.
fn compile_spanned(node: &CompactedNode, orientation: Orientation) -> (Fragment, usize) {
    let mut branches: Vec<Branch> = Vec::new();

    for (label, child) in &node.children {
        let (tail, child_span) = compile_spanned(child, orientation);
        let label_len = label.chars().count();
        let span = label_len + child_span;
        if label_len == 1 {
            let ch = label.chars().next().unwrap_or_default();
            let existing = branches.iter().position(|branch| {
                matches!(branch, Branch::Class { tail: other, .. } if *other == tail)
            });
            match existing {
                Some(index) => {
                    if let Branch::Class { members, .. } = &mut branches[index] {
                        members.push(ch);
                    }
                }
                None => branches.push(Branch::Class {
                    members: vec![ch],
                    tail,
                    span,
                }),
            }
        } else {
            branches.push(Branch::Edge {
                label: label.clone(),
                tail,
                span,
            });
        }
    }

    // Stable sort: equal spans stay in code point order
    branches.sort_by(|a, b| b.span().cmp(&a.span()));
    let max_span = branches.first().map_or(0, Branch::span);

    let mut alternatives: Vec<Fragment> = branches
        .into_iter()
        .map(|branch| branch.render(orientation))
        .collect();

    let combined = match alternatives.len() {
        0 => Fragment::Empty,
        1 => alternatives.remove(0),
        _ => {
            let joined: Vec<&str> = alternatives.iter().map(Fragment::as_str).collect();
            Fragment::Atom(format!("(?:{})", joined.join("|")))
        }
    };

    let fragment = if node.terminal {
        combined.optional()
    } else {
        combined
    };
    (fragment, max_span)
}

/// Render a set of single characters as a bare character or a class.
fn render_class(mut members: Vec<char>) -> Fragment {
    members.sort_unstable();
    members.dedup();

    if let [only] = members.as_slice() {
        let mut text = String::new();
        push_literal(&mut text, *only);
        return Fragment::Atom(text);
    }

    let mut text = String::from("[");
    let mut run: Option<(char, char)> = None;
    for ch in members {
        run = match run {
            Some((start, end)) if ch as u32 == end as u32 + 1 => Some((start, ch)),
            Some((start, end)) => {
                push_run(&mut text, start, end);
                Some((ch, ch))
            }
            None => Some((ch, ch)),
        };
    }
    if let Some((start, end)) = run {
        push_run(&mut text, start, end);
    }
    text.push(']');

    Fragment::Atom(text)
}

fn push_run(text: &mut String, start: char, end: char) {
    let len = end as u32 - start as u32 + 1;
    push_class_member(text, start);
    match len {
        1 => {}
        2 => push_class_member(text, end),
        _ => {
            text.push('-');
            push_class_member(text, end);
        }
    }
}
