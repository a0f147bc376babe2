//! Help text parser for clap-style `--help` output.
//!
//! Parsing happens in two steps. [`scan_blocks`] walks the text line by line
//! and produces tagged [`HelpBlock`]s; the block parsers below then turn each
//! block into a model value:
//!
//! - [`parse_flag_block`]: aliases, placeholder, description and
//!   `Possible values:` choices of one flag;
//! - [`parse_arg_block`]: name and description of a positional argument;
//! - [`CommandLine`]s are used as-is.
//!
//! The dialect handled is the one clap prints for `--help`:
//!
//! ```text
//! Commands:
//!   build  Build the thing
//!
//! Arguments:
//!   [TARGET]
//!           What to build
//!
//! Options:
//!   -m, --mode <MODE>
//!           Build mode
//!
//!           Possible values:
//!           - debug:   Unoptimized
//!           - release: Optimized
//! ```

mod scan;
mod util;

use tracing::debug;

use crate::error::ParseError;
use helptree_core::{ArgSchema, Choice, FlagSchema};

pub use scan::{ArgBlock, CommandLine, FlagBlock, HelpBlock, scan_blocks};
pub use util::dedent;

/// Line introducing an enumerated value list inside a flag block.
const POSSIBLE_VALUES_HEADER: &str = "Possible values:";

/// Everything parsed from one help page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHelp {
    /// Command the page belongs to.
    pub command: String,
    pub flags: Vec<FlagSchema>,
    /// Entries of the `Commands:` section, `help` included.
    pub commands: Vec<CommandLine>,
    pub positional: Vec<ArgSchema>,
}

/// Parses one help page.
///
/// Sections missing from the text produce empty lists.
///
/// # Errors
///
/// Returns [`ParseError::MultiplePlaceholders`] when a flag header lists more
/// than one value placeholder.
///
/// # Examples
///
/// ```
/// use helptree_discovery::parser::parse_help_text;
///
/// let help = "\
/// Usage: mycli [OPTIONS] <FILE>
///
/// Arguments:
///   <FILE>  Input file to process
///
/// Options:
///   -o, --output <PATH>
///           Output file
///
///   -h, --help
///           Print help
/// ";
///
/// let parsed = parse_help_text("mycli", help).unwrap();
/// assert_eq!(parsed.positional[0].name, "<FILE>");
/// assert_eq!(parsed.flags[0].placeholder.as_deref(), Some("<PATH>"));
/// assert!(parsed.commands.is_empty());
/// ```
pub fn parse_help_text(command: &str, text: &str) -> Result<ParsedHelp, ParseError> {
    let mut parsed = ParsedHelp {
        command: command.to_string(),
        ..Default::default()
    };

    for block in scan_blocks(text) {
        match block {
            HelpBlock::Flag(block) => {
                let flag = parse_flag_block(&block)?;
                debug!(
                    command = command,
                    line = block.line,
                    flag = flag.canonical_name(),
                    takes_value = flag.takes_value(),
                    "Parsed flag"
                );
                parsed.flags.push(flag);
            }
            HelpBlock::Arg(block) => parsed.positional.push(parse_arg_block(&block)),
            HelpBlock::Command(line) => parsed.commands.push(line),
        }
    }

    debug!(
        command = command,
        flags = parsed.flags.len(),
        commands = parsed.commands.len(),
        positional = parsed.positional.len(),
        "Parsed help page"
    );
    Ok(parsed)
}

/// Parses a flag block.
///
/// Alias tokens are read from the header up to the first token without a
/// trailing comma; the token after them, if any, is the placeholder. A header
/// may carry its description in a second column.
///
/// # Errors
///
/// [`ParseError::MultiplePlaceholders`] if more than one token follows the
/// aliases.
///
/// # Examples
///
/// ```
/// use helptree_discovery::parser::{FlagBlock, parse_flag_block};
///
/// let block = FlagBlock {
///     line: 0,
///     header: "-x, --long <PLACEHOLDER>".to_string(),
///     body: vec!["    Some text".to_string(), "".to_string()],
/// };
/// let flag = parse_flag_block(&block).unwrap();
/// assert_eq!(flag.shorts, vec!["-x"]);
/// assert_eq!(flag.longs, vec!["--long"]);
/// assert_eq!(flag.placeholder.as_deref(), Some("<PLACEHOLDER>"));
/// assert_eq!(flag.description, "Some text");
/// ```
pub fn parse_flag_block(block: &FlagBlock) -> Result<FlagSchema, ParseError> {
    let (head, inline) = util::split_columns(&block.header);

    let mut aliases = Vec::new();
    let mut placeholders = Vec::new();
    let mut reading_aliases = true;
    for token in head.split(' ').filter(|token| !token.is_empty()) {
        if reading_aliases {
            aliases.push(token.trim_end_matches([',', '.']).to_string());
            reading_aliases = token.ends_with(',');
        } else {
            placeholders.push(token.to_string());
        }
    }
    if placeholders.len() > 1 {
        return Err(ParseError::MultiplePlaceholders {
            header: block.header.clone(),
            placeholders,
        });
    }

    let rest = dedent(&block.body);

    Ok(FlagSchema {
        shorts: aliases
            .iter()
            .filter(|alias| alias.starts_with('-') && !alias.starts_with("--"))
            .cloned()
            .collect(),
        longs: aliases
            .iter()
            .filter(|alias| alias.starts_with("--"))
            .cloned()
            .collect(),
        placeholder: placeholders.pop(),
        choices: parse_possible_values(&rest),
        description: util::leading_paragraph(inline, &rest),
    })
}

/// Parses the `Possible values:` list in a dedented flag body.
///
/// Each `- ` line up to the next blank line is one choice; other lines extend
/// the previous choice's description.
fn parse_possible_values(lines: &[String]) -> Vec<Choice> {
    let Some(start) = lines
        .iter()
        .position(|line| line.trim() == POSSIBLE_VALUES_HEADER)
    else {
        return Vec::new();
    };

    let mut choices: Vec<Choice> = Vec::new();
    for line in &lines[start + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }

        if let Some(entry) = trimmed.strip_prefix("- ") {
            let entry = entry.trim_start();
            let (value, description) = match entry.split_once(char::is_whitespace) {
                Some((value, rest)) => (value, rest.trim()),
                None => (entry, ""),
            };
            let value = value.strip_suffix(':').unwrap_or(value);
            choices.push(Choice::new(value, description));
        } else if let Some(previous) = choices.last_mut() {
            if !previous.description.is_empty() {
                previous.description.push('\n');
            }
            previous.description.push_str(trimmed);
        }
    }
    choices
}

/// Parses an argument block: the first column of the header is the name.
///
/// # Examples
///
/// ```
/// use helptree_discovery::parser::{ArgBlock, parse_arg_block};
///
/// let block = ArgBlock {
///     line: 0,
///     header: "[TARGET]".to_string(),
///     body: vec!["          The commit or branch to check out".to_string()],
/// };
/// let arg = parse_arg_block(&block);
/// assert_eq!(arg.name, "[TARGET]");
/// assert_eq!(arg.description, "The commit or branch to check out");
/// ```
pub fn parse_arg_block(block: &ArgBlock) -> ArgSchema {
    let (name, inline) = util::split_columns(&block.header);
    let rest = dedent(&block.body);
    ArgSchema::new(name, &util::leading_paragraph(inline, &rest))
}
