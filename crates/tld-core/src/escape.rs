//! Regex escaping
//!
//! The emitted dialect is the one shared by the `regex` crate, PCRE and
//! Java. ECMAScript is not a target: it rejects the `\x{HEX}` form and, in
//! unicode mode, the `\&` and `\~` class escapes. Outside a class only the
//! classic metacharacters are escaped and `-` stays bare, so `xn--` labels
//! are emitted as written. Inside a class the set is different: `]`, `^`,
//! `-` and the class set operators are escaped instead of `.`, `(` and
//! friends.

use std::fmt::Write;

/// Metacharacters escaped outside of a character class.
pub const LITERAL_META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$',
];

/// Metacharacters escaped inside a character class.
pub const CLASS_META: &[char] = &['\\', ']', '[', '^', '-', '&', '~'];

/// Append `ch` to `out`, escaped for use outside a character class.
pub fn push_literal(out: &mut String, ch: char) {
    push_escaped(out, ch, LITERAL_META);
}

/// Append `ch` to `out`, escaped for use inside `[...]`.
pub fn push_class_member(out: &mut String, ch: char) {
    push_escaped(out, ch, CLASS_META);
}

/// Escape a whole string for use outside a character class.
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        push_literal(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char, meta: &[char]) {
    if ch.is_control() || ch.is_whitespace() {
        // Never emit raw control or whitespace characters into the pattern
        let _ = write!(out, "\\x{{{:X}}}", ch as u32);
    } else {
        if meta.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_member(ch: char) -> String {
        let mut out = String::new();
        push_class_member(&mut out, ch);
        out
    }

    #[test]
    fn test_plain_characters_pass_through() {
        assert_eq!(escape_literal("xn--p1ai"), "xn--p1ai");
        assert_eq!(escape_literal("рф"), "рф");
    }

    #[test]
    fn test_literal_metacharacters() {
        assert_eq!(escape_literal("a.b"), r"a\.b");
        assert_eq!(escape_literal("(x)"), r"\(x\)");
        assert_eq!(escape_literal("[]"), r"\[\]");
        assert_eq!(escape_literal("\\"), r"\\");
        assert_eq!(escape_literal("a|b*"), r"a\|b\*");
    }

    #[test]
    fn test_class_metacharacters() {
        assert_eq!(class_member(']'), r"\]");
        assert_eq!(class_member('^'), r"\^");
        assert_eq!(class_member('-'), r"\-");
        assert_eq!(class_member('.'), ".");
        assert_eq!(class_member('a'), "a");
    }

    #[test]
    fn test_control_and_whitespace_use_hex_escapes() {
        assert_eq!(escape_literal(" "), r"\x{20}");
        assert_eq!(escape_literal("\t"), r"\x{9}");
        assert_eq!(class_member('\u{7f}'), r"\x{7F}");
    }

    #[test]
    fn test_escaped_literals_match_themselves() {
        let raw = r"a.b(c)[d]\e|f*g+h?i{j}^k$ l";
        let re = regex::Regex::new(&format!("^{}$", escape_literal(raw))).unwrap();
        assert!(re.is_match(raw));
        assert!(!re.is_match("axb(c)[d]\\e|f*g+h?i{j}^k$ l"));
    }

    #[test]
    fn test_escaped_class_members_match_themselves() {
        let members = [']', '[', '^', '-', '&', '~', '\\', '.', 'z'];
        let mut class = String::from("[");
        for ch in members {
            push_class_member(&mut class, ch);
        }
        class.push(']');

        let re = regex::Regex::new(&format!("^{class}$")).unwrap();
        for ch in members {
            assert!(re.is_match(&ch.to_string()), "class should match {ch:?}");
        }
        assert!(!re.is_match("a"));
    }
}
