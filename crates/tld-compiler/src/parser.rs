use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Prefix of ASCII-compatible encoded (punycode) labels.
pub const ACE_PREFIX: &str = "xn--";

/// Error type for suffix list ingestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid suffix '{suffix}' at line {line}: unexpected character {character:?}")]
    InvalidSuffix {
        line: usize,
        suffix: String,
        character: char,
    },
}

/// An entry whose decoded form could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub line: usize,
    pub suffix: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines: usize,
    pub comments: usize,
    pub entries: usize,
    pub duplicates: usize,
    pub decoded: usize,
    pub skipped: usize,
}

/// Normalized suffix set ready for trie construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixList {
    /// Every entry as written (lowercased), including `xn--` labels.
    pub literal: BTreeSet<String>,
    /// Unicode forms of the `xn--` labels that decoded cleanly.
    pub decoded: BTreeSet<String>,
    /// `xn--` label -> Unicode form.
    pub decoded_labels: BTreeMap<String, String>,
    pub skipped: Vec<SkippedEntry>,
    pub stats: ParseStats,
}

impl SuffixList {
    /// Build a list directly from suffix strings, as if each were one line.
    pub fn from_suffixes<I, S>(suffixes: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for (index, suffix) in suffixes.into_iter().enumerate() {
            list.stats.lines += 1;
            list.add_entry(index + 1, suffix.as_ref(), &mut decode_label)?;
        }
        Ok(list)
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty() && self.decoded.is_empty()
    }

    /// Total number of suffixes the pattern has to match.
    pub fn len(&self) -> usize {
        self.literal.len() + self.decoded.len()
    }

    fn add_entry<F>(&mut self, line: usize, raw: &str, decode: &mut F) -> Result<(), ParseError>
    where
        F: FnMut(&str) -> Result<String, String>,
    {
        let suffix = raw.trim().to_lowercase();
        if suffix.is_empty() {
            return Ok(());
        }

        if let Some(character) = suffix.chars().find(|ch| !is_literal_char(*ch)) {
            return Err(ParseError::InvalidSuffix {
                line,
                suffix,
                character,
            });
        }

        if self.literal.contains(&suffix) {
            self.stats.duplicates += 1;
            return Ok(());
        }
        self.stats.entries += 1;

        if suffix.starts_with(ACE_PREFIX) {
            match decode(&suffix) {
                Ok(decoded) => {
                    self.stats.decoded += 1;
                    self.decoded.insert(decoded.clone());
                    self.decoded_labels.insert(suffix.clone(), decoded);
                }
                Err(reason) => {
                    log::warn!("Skipping decoded form of '{}' (line {}): {}", suffix, line, reason);
                    self.stats.skipped += 1;
                    self.skipped.push(SkippedEntry {
                        line,
                        suffix: suffix.clone(),
                        reason,
                    });
                }
            }
        }

        self.literal.insert(suffix);
        Ok(())
    }
}

/// Parse a line-delimited suffix list (e.g. the IANA `tlds-alpha-by-domain.txt`).
///
/// Blank lines and `#` comments are ignored, entries are lowercased and
/// deduplicated. Any entry outside `[a-z0-9-]` aborts the parse. `xn--`
/// entries that fail to decode stay in the literal set and are reported in
/// [`SuffixList::skipped`].
pub fn parse_suffix_list(text: &str) -> Result<SuffixList, ParseError> {
    parse_suffix_list_with(text, decode_label)
}

/// Like [`parse_suffix_list`], with a custom decoder for `xn--` entries.
///
/// The decoder returns the Unicode form or a reason for skipping it.
pub fn parse_suffix_list_with<F>(text: &str, mut decode: F) -> Result<SuffixList, ParseError>
where
    F: FnMut(&str) -> Result<String, String>,
{
    let mut list = SuffixList::default();

    for (index, raw_line) in text.lines().enumerate() {
        list.stats.lines += 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if is_comment_line(line) {
            list.stats.comments += 1;
            continue;
        }
        list.add_entry(index + 1, line, &mut decode)?;
    }

    log::debug!(
        "parsed {} entries ({} decoded, {} skipped, {} duplicates)",
        list.stats.entries,
        list.stats.decoded,
        list.stats.skipped,
        list.stats.duplicates
    );

    Ok(list)
}

/// Decode one `xn--` label to its Unicode form.
pub fn decode_label(label: &str) -> Result<String, String> {
    let (decoded, result) = idna::domain_to_unicode(label);
    if result.is_err() {
        return Err(format!("invalid punycode in '{label}'"));
    }
    validate_decoded(decoded)
}

/// Accept a decoded form only if it is non-ASCII and free of control
/// characters, whitespace and dots.
pub fn validate_decoded(decoded: String) -> Result<String, String> {
    if decoded.is_ascii() {
        return Err("label does not decode to a Unicode form".to_string());
    }
    if let Some(ch) = decoded.chars().find(|ch| !is_decoded_char(*ch)) {
        return Err(format!("decoded form contains {ch:?}"));
    }
    Ok(decoded)
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#')
}

fn is_literal_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-'
}

fn is_decoded_char(ch: char) -> bool {
    !ch.is_control() && !ch.is_whitespace() && ch != '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let list = parse_suffix_list("# Version 2024061000\n\nCOM\n  net  \n# trailing\n").unwrap();
        assert_eq!(
            list.literal.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["com", "net"]
        );
        assert_eq!(list.stats.lines, 5);
        assert_eq!(list.stats.comments, 2);
        assert_eq!(list.stats.entries, 2);
    }

    #[test]
    fn test_entries_are_lowercased_and_deduplicated() {
        let list = parse_suffix_list("COM\ncom\nCom\n").unwrap();
        assert_eq!(list.literal.len(), 1);
        assert_eq!(list.stats.duplicates, 2);
    }

    #[test]
    fn test_ace_labels_are_decoded() {
        let list = parse_suffix_list("XN--P1AI\n").unwrap();
        assert!(list.literal.contains("xn--p1ai"));
        assert!(list.decoded.contains("рф"));
        assert_eq!(list.decoded_labels.get("xn--p1ai").map(String::as_str), Some("рф"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let err = parse_suffix_list("com\nco m\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSuffix {
                line: 2,
                suffix: "co m".to_string(),
                character: ' ',
            }
        );

        assert!(matches!(
            parse_suffix_list("exa.mple").unwrap_err(),
            ParseError::InvalidSuffix { character: '.', .. }
        ));
        assert!(matches!(
            parse_suffix_list("рф").unwrap_err(),
            ParseError::InvalidSuffix { character: 'р', .. }
        ));
    }

    #[test]
    fn test_undecodable_label_is_skipped_not_fatal() {
        let list = parse_suffix_list("com\nxn--abc-\nxn--p1ai\n").unwrap();
        assert!(list.literal.contains("com"));
        assert!(list.literal.contains("xn--abc-"));
        assert!(list.decoded.contains("рф"));
        assert_eq!(list.decoded.len(), 1);
        assert_eq!(list.skipped.len(), 1);
        assert_eq!(list.skipped[0].line, 2);
        assert_eq!(list.skipped[0].suffix, "xn--abc-");
        assert_eq!(list.stats.skipped, 1);
    }

    #[test]
    fn test_invalid_punycode_reason_names_the_label() {
        let list = parse_suffix_list("xn--abc-\n").unwrap();
        assert_eq!(list.skipped.len(), 1);
        assert!(
            list.skipped[0].reason.starts_with("invalid punycode in 'xn--abc-'"),
            "got: {}",
            list.skipped[0].reason
        );
    }

    #[test]
    fn test_ascii_only_decode_is_skipped() {
        let list =
            parse_suffix_list_with("com\nxn--abc\n", |_| validate_decoded("abc".to_string()))
                .unwrap();
        assert!(list.literal.contains("xn--abc"));
        assert!(list.decoded.is_empty());
        assert!(list.decoded_labels.is_empty());
        assert_eq!(list.stats.skipped, 1);
        assert_eq!(
            list.skipped,
            vec![SkippedEntry {
                line: 2,
                suffix: "xn--abc".to_string(),
                reason: "label does not decode to a Unicode form".to_string(),
            }]
        );
    }

    #[test]
    fn test_decoded_form_with_forbidden_characters_is_skipped() {
        for (decoded, ch) in [("р ф", ' '), ("р.ф", '.'), ("р\u{1}ф", '\u{1}'), ("р\tф", '\t')] {
            let list =
                parse_suffix_list_with("xn--p1ai\n", |_| validate_decoded(decoded.to_string()))
                    .unwrap();
            assert!(list.literal.contains("xn--p1ai"));
            assert!(list.decoded.is_empty());
            assert_eq!(list.skipped.len(), 1);
            assert_eq!(list.skipped[0].suffix, "xn--p1ai");
            assert_eq!(list.skipped[0].reason, format!("decoded form contains {ch:?}"));
        }
    }

    #[test]
    fn test_valid_decoded_form_is_accepted() {
        assert_eq!(validate_decoded("рф".to_string()), Ok("рф".to_string()));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let list = parse_suffix_list("# only a comment\n").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_from_suffixes() {
        let list = SuffixList::from_suffixes(["co", "com", "co"]).unwrap();
        assert_eq!(list.literal.len(), 2);
        assert_eq!(list.stats.duplicates, 1);
        assert!(SuffixList::from_suffixes(["a_b"]).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = parse_suffix_list("a_b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid suffix 'a_b' at line 1: unexpected character '_'"
        );
    }
}
