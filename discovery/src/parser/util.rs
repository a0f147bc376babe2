//! Shared text helpers for block parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters separate help columns.
static COLUMN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("static regex must compile"));

/// Number of leading whitespace characters.
pub fn indentation(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Removes the whitespace prefix common to all non-blank lines.
///
/// Whitespace-only lines come back empty, so a blank line in the input is
/// always `""` in the output.
pub fn dedent<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let common = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(indentation)
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(AsRef::as_ref)
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.chars().skip(common).collect::<String>().trim_end().to_string()
            }
        })
        .collect()
}

/// Splits a two-column line (`NAME  description`) at the first column break.
///
/// The second element is `None` when the line has a single column.
pub fn split_columns(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match COLUMN_BREAK.find(line) {
        Some(found) => {
            let rest = line[found.end()..].trim();
            (
                &line[..found.start()],
                (!rest.is_empty()).then_some(rest),
            )
        }
        None => (line, None),
    }
}

/// Joins an optional inline description with the leading paragraph of
/// `rest`, i.e. every line up to the first blank one.
pub fn leading_paragraph(inline: Option<&str>, rest: &[String]) -> String {
    let mut lines: Vec<&str> = inline.into_iter().collect();
    lines.extend(
        rest.iter()
            .map(String::as_str)
            .take_while(|line| !line.is_empty()),
    );
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedent_removes_common_prefix() {
        let lines = ["          First line", "            nested", "   ", "          Last"];
        assert_eq!(dedent(&lines), vec!["First line", "  nested", "", "Last"]);
    }

    #[test]
    fn test_dedent_empty_input() {
        let lines: [&str; 0] = [];
        assert!(dedent(&lines).is_empty());
    }

    #[test]
    fn test_split_columns() {
        assert_eq!(split_columns("  <FILE>  Input file"), ("<FILE>", Some("Input file")));
        assert_eq!(split_columns("--output <PATH>"), ("--output <PATH>", None));
        assert_eq!(split_columns("[TARGET]   "), ("[TARGET]", None));
    }

    #[test]
    fn test_leading_paragraph_stops_at_blank() {
        let rest = vec!["one".to_string(), "two".to_string(), String::new(), "three".to_string()];
        assert_eq!(leading_paragraph(None, &rest), "one\ntwo");
        assert_eq!(leading_paragraph(Some("zero"), &rest), "zero\none\ntwo");
        assert_eq!(leading_paragraph(None, &[]), "");
    }
}
