//! POSIX-style quoting for generated statements.
//!
//! Fish accepts the same single-quote forms as POSIX shells for the strings
//! emitted here, so words are quoted the way `sh` would need them.

use std::borrow::Cow;

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quotes `word` so the shell reads it back as a single literal word.
///
/// Words made only of safe characters are returned unchanged; anything else
/// is wrapped in single quotes, with embedded single quotes spelled
/// `'"'"'`.
///
/// # Examples
///
/// ```
/// use helptree_fish::quote::quote;
///
/// assert_eq!(quote("smartlog"), "smartlog");
/// assert_eq!(quote(""), "''");
/// assert_eq!(quote("two words"), "'two words'");
/// assert_eq!(quote("it's"), r#"'it'"'"'s'"#);
/// ```
pub fn quote(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }
    if word.chars().all(is_safe) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("'{}'", word.replace('\'', r#"'"'"'"#)))
}

/// Quotes each word and joins them with single spaces.
///
/// # Examples
///
/// ```
/// use helptree_fish::quote::join;
///
/// assert_eq!(join(&["-s", "v"]), "-s v");
/// assert_eq!(join(&["amend", "sl"]), "amend sl");
/// assert_eq!(join(&["a b", "c"]), "'a b' c");
/// ```
pub fn join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| quote(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
