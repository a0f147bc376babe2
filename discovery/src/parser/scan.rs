//! Line scanner that splits help text into tagged blocks.
//!
//! The scanner walks the text once, tracking which section it is in:
//!
//! - Any non-blank line without indentation is a section header. `Commands:`
//!   and `Arguments:` open those sections, every other header (`Options:`,
//!   `Usage: ...`, custom headings) opens a generic section.
//! - In generic sections (and before the first header) an indented line
//!   starting with `-` followed by a non-space character opens a
//!   [`FlagBlock`], provided it sits in the header column; following lines
//!   belong to it until the next flag header or section header.
//! - The header column starts at the first flag header of the section and
//!   reaches four more columns for long-only flags aligned after a short
//!   column (`  -h, --help` / `      --color`). Once a flag body has been
//!   seen, only lines indented less than that body open a new flag, so a
//!   description line such as `-1 means one job per CPU` stays put.
//! - In `Arguments:`, a line indented by exactly two spaces opens an
//!   [`ArgBlock`].
//! - In `Commands:`, each line at the entry indent is a [`CommandLine`];
//!   deeper-indented lines continue the previous entry's description.

use regex::Regex;
use std::sync::LazyLock;

use super::util::indentation;

static PATTERNS: LazyLock<ScanPatterns> = LazyLock::new(ScanPatterns::new);

struct ScanPatterns {
    flag_header: Regex,
    argument_start: Regex,
}

impl ScanPatterns {
    fn new() -> Self {
        Self {
            flag_header: Regex::new(r"^\s+-\S").expect("static regex must compile"),
            argument_start: Regex::new(r"^  \S").expect("static regex must compile"),
        }
    }
}

/// A flag definition: header line plus the raw lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagBlock {
    /// Zero-based line index of the header.
    pub line: usize,
    /// Header with its indentation removed (e.g. `-o, --output <PATH>`).
    pub header: String,
    /// Following lines, indentation preserved.
    pub body: Vec<String>,
}

/// A positional argument entry from the `Arguments:` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgBlock {
    pub line: usize,
    /// First line, trimmed (e.g. `[TARGET]`).
    pub header: String,
    pub body: Vec<String>,
}

/// One `name  description` entry from the `Commands:` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub line: usize,
    pub name: String,
    pub description: String,
}

/// A tagged unit of help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpBlock {
    Flag(FlagBlock),
    Arg(ArgBlock),
    Command(CommandLine),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Generic,
    Commands,
    Arguments,
}

impl Section {
    fn from_header(header: &str) -> Self {
        match header.trim_end() {
            "Commands:" => Self::Commands,
            "Arguments:" => Self::Arguments,
            _ => Self::Generic,
        }
    }
}

/// Splits help text into flag, argument and command blocks, in source order.
///
/// # Examples
///
/// ```
/// use helptree_discovery::parser::{HelpBlock, scan_blocks};
///
/// let help = "\
/// Commands:
///   build  Build the thing
///
/// Options:
///   -v, --verbose
///           Increase verbosity
/// ";
///
/// let blocks = scan_blocks(help);
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(&blocks[0], HelpBlock::Command(c) if c.name == "build"));
/// assert!(matches!(&blocks[1], HelpBlock::Flag(f) if f.header == "-v, --verbose"));
/// ```
pub fn scan_blocks(text: &str) -> Vec<HelpBlock> {
    let mut scanner = Scanner::default();
    for (index, raw) in text.lines().enumerate() {
        scanner.feed(index, raw.trim_end());
    }
    scanner.finish()
}

enum OpenBlock {
    Flag(FlagBlock),
    Arg(ArgBlock),
}

struct Scanner {
    section: Section,
    open: Option<OpenBlock>,
    command_indent: Option<usize>,
    flag_column: Option<FlagColumn>,
    flag_body_indent: Option<usize>,
    blocks: Vec<HelpBlock>,
}

/// Where flag headers start in the current section.
#[derive(Debug, Clone, Copy)]
struct FlagColumn {
    indent: usize,
    /// The first header began with a short alias, so long-only headers may be
    /// pushed right past the short column.
    has_short_column: bool,
}

/// Width of a `-x, ` short alias column.
const SHORT_COLUMN_WIDTH: usize = 4;

impl Default for Scanner {
    fn default() -> Self {
        Self {
            section: Section::Generic,
            open: None,
            command_indent: None,
            flag_column: None,
            flag_body_indent: None,
            blocks: Vec::new(),
        }
    }
}

impl Scanner {
    fn feed(&mut self, index: usize, line: &str) {
        if !line.is_empty() && indentation(line) == 0 {
            self.close();
            self.section = Section::from_header(line);
            self.command_indent = None;
            self.flag_column = None;
            self.flag_body_indent = None;
            return;
        }

        match self.section {
            Section::Generic => {
                if PATTERNS.flag_header.is_match(line) && self.in_flag_column(line) {
                    self.close();
                    self.open = Some(OpenBlock::Flag(FlagBlock {
                        line: index,
                        header: line.trim_start().to_string(),
                        body: Vec::new(),
                    }));
                } else {
                    self.continue_block(line);
                }
            }
            Section::Arguments => {
                if PATTERNS.argument_start.is_match(line) {
                    self.close();
                    self.open = Some(OpenBlock::Arg(ArgBlock {
                        line: index,
                        header: line.trim().to_string(),
                        body: Vec::new(),
                    }));
                } else {
                    self.continue_block(line);
                }
            }
            Section::Commands => self.feed_command(index, line),
        }
    }

    fn feed_command(&mut self, index: usize, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        let indent = indentation(line);
        if let Some(entry_indent) = self.command_indent {
            if indent > entry_indent {
                if let Some(HelpBlock::Command(previous)) = self.blocks.last_mut() {
                    if !previous.description.is_empty() {
                        previous.description.push(' ');
                    }
                    previous.description.push_str(trimmed);
                    return;
                }
            }
        }
        self.command_indent = Some(self.command_indent.map_or(indent, |e| e.min(indent)));

        let (name, description) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };
        self.blocks.push(HelpBlock::Command(CommandLine {
            line: index,
            name: name.to_string(),
            description: description.to_string(),
        }));
    }

    /// Whether a dash line is a flag header rather than part of a body.
    fn in_flag_column(&mut self, line: &str) -> bool {
        let indent = indentation(line);
        let Some(column) = self.flag_column else {
            self.flag_column = Some(FlagColumn {
                indent,
                has_short_column: !line.trim_start().starts_with("--"),
            });
            return true;
        };

        if let Some(body_indent) = self.flag_body_indent {
            if indent >= body_indent {
                return false;
            }
        }
        let reach = if column.has_short_column {
            column.indent + SHORT_COLUMN_WIDTH
        } else {
            column.indent
        };
        if indent > reach {
            return false;
        }

        if indent < column.indent {
            self.flag_column = Some(FlagColumn {
                indent,
                has_short_column: column.has_short_column
                    || !line.trim_start().starts_with("--"),
            });
        }
        true
    }

    fn continue_block(&mut self, line: &str) {
        match self.open.as_mut() {
            Some(OpenBlock::Flag(block)) => {
                if self.flag_body_indent.is_none() && !line.trim().is_empty() {
                    self.flag_body_indent = Some(indentation(line));
                }
                block.body.push(line.to_string());
            }
            Some(OpenBlock::Arg(block)) => block.body.push(line.to_string()),
            None => {}
        }
    }

    fn close(&mut self) {
        match self.open.take() {
            Some(OpenBlock::Flag(block)) => self.blocks.push(HelpBlock::Flag(block)),
            Some(OpenBlock::Arg(block)) => self.blocks.push(HelpBlock::Arg(block)),
            None => {}
        }
    }

    fn finish(mut self) -> Vec<HelpBlock> {
        self.close();
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(blocks: &[HelpBlock]) -> Vec<&FlagBlock> {
        blocks
            .iter()
            .filter_map(|block| match block {
                HelpBlock::Flag(flag) => Some(flag),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_flag_block_spans_until_next_header() {
        let help = "\
Options:
  -m, --mode <MODE>
          How to run

          Possible values:
          - fast: Quick
          - slow: Careful

  -h, --help
          Print help
";
        let blocks = scan_blocks(help);
        let flags = flags(&blocks);
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].header, "-m, --mode <MODE>");
        assert_eq!(flags[0].line, 1);
        assert_eq!(flags[0].body.len(), 6);
        assert_eq!(flags[1].header, "-h, --help");
        assert_eq!(flags[1].body, vec!["          Print help".to_string()]);
    }

    #[test]
    fn test_dash_lines_in_body_do_not_open_flags() {
        let help = "Options:\n  --color <WHEN>\n      - auto: Detect\n      -never\n";
        let blocks = scan_blocks(help);
        let flags = flags(&blocks);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].body, vec!["      - auto: Detect", "      -never"]);
    }

    #[test]
    fn test_description_lines_starting_with_dashes() {
        let help = "\
Options:
      --jobs <NUM_JOBS>
          Number of jobs
          -1 means one job per CPU

  -f, --force
          --dry-run is ignored when this is set

  -h, --help
          Print help
";
        let blocks = scan_blocks(help);
        let flags = flags(&blocks);
        let headers: Vec<&str> = flags.iter().map(|flag| flag.header.as_str()).collect();
        assert_eq!(headers, vec!["--jobs <NUM_JOBS>", "-f, --force", "-h, --help"]);
        assert_eq!(flags[0].body[1], "          -1 means one job per CPU");
    }

    #[test]
    fn test_first_body_line_with_dash_stays_in_body() {
        let help = "Options:\n  -j, --jobs <N>\n          -1 means one job per CPU\n";
        let blocks = scan_blocks(help);
        let flags = flags(&blocks);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].body.len(), 1);
    }

    #[test]
    fn test_long_only_flags_after_short_column() {
        let help = "\
Options:
  -h, --help              Print help
      --color <WHEN>      When to color
  -V, --version           Print version
";
        let blocks = scan_blocks(help);
        let headers: Vec<&str> = flags(&blocks).iter().map(|flag| flag.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                "-h, --help              Print help",
                "--color <WHEN>      When to color",
                "-V, --version           Print version",
            ]
        );
    }

    #[test]
    fn test_command_continuation_lines() {
        let help = "\
Commands:
  amend    Amend the current HEAD commit
             with changes
  help     Print this message
Options:
";
        let blocks = scan_blocks(help);
        assert_eq!(
            blocks,
            vec![
                HelpBlock::Command(CommandLine {
                    line: 1,
                    name: "amend".to_string(),
                    description: "Amend the current HEAD commit with changes".to_string(),
                }),
                HelpBlock::Command(CommandLine {
                    line: 3,
                    name: "help".to_string(),
                    description: "Print this message".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn test_arguments_section_is_bounded_by_next_header() {
        let help = "\
Arguments:
  [TARGET]
          The commit or branch to check out

  <LEFT>  Left side

Options:
  -q, --quiet
";
        let blocks = scan_blocks(help);
        let args: Vec<_> = blocks
            .iter()
            .filter_map(|block| match block {
                HelpBlock::Arg(arg) => Some(arg.header.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(args, vec!["[TARGET]", "<LEFT>  Left side"]);
        assert_eq!(flags(&blocks).len(), 1);
    }

    #[test]
    fn test_dash_lines_inside_commands_are_not_flags() {
        let help = "Commands:\n  -x  weird entry\n";
        let blocks = scan_blocks(help);
        assert!(flags(&blocks).is_empty());
        assert!(matches!(&blocks[0], HelpBlock::Command(c) if c.name == "-x"));
    }

    #[test]
    fn test_empty_text_has_no_blocks() {
        assert!(scan_blocks("").is_empty());
        assert!(scan_blocks("Usage: tool\n\nJust prose.\n").is_empty());
    }
}
