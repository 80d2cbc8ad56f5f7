//! Final pattern assembly
//!
//! The literal (ASCII-compatible) fragment and the decoded (Unicode)
//! fragment become the two alternatives of one named capturing group:
//! `(?<tld>literal|decoded)`. The pattern is never anchored here; the
//! embedding context decides where it must match.

/// Group name used by [`assemble`].
pub const DEFAULT_GROUP_NAME: &str = "tld";

/// Body used when both fragments are empty. A word boundary immediately
/// followed by a non-boundary can never hold, so the group matches nothing
/// (not even the empty string).
pub const NEVER_MATCH: &str = r"\b\B";

/// Assemble the final pattern with the default group name.
///
/// If both fragments are empty the result is `(?<tld>\b\B)`, which matches
/// nothing at all. Callers feeding an empty suffix set get this pattern and a
/// logged warning.
pub fn assemble(literal: &str, decoded: &str) -> String {
    assemble_named(DEFAULT_GROUP_NAME, literal, decoded)
}

/// Assemble the final pattern into a group called `name`.
pub fn assemble_named(name: &str, literal: &str, decoded: &str) -> String {
    let body = match (literal.is_empty(), decoded.is_empty()) {
        (false, false) => format!("{literal}|{decoded}"),
        (false, true) => literal.to_string(),
        (true, false) => decoded.to_string(),
        (true, true) => {
            log::warn!("no suffixes to compile; emitting a pattern that never matches");
            NEVER_MATCH.to_string()
        }
    };
    format!("(?<{name}>{body})")
}
