//! Command tree definitions.
//!
//! These types model what a program reports about itself in its `--help`
//! output: its flags, positional arguments and subcommands. A tree is built
//! once by the harvest pass and consumed by a renderer; it derives
//! [`serde`] traits so it can be dumped for inspection.

use serde::{Deserialize, Serialize};

/// Description given to the synthesized `help` subcommand.
///
/// Help generators list a `help` pseudo-subcommand that is never probed; it is
/// added to the tree with this fixed text instead.
pub const HELP_SUBCOMMAND_DESCRIPTION: &str =
    "Print this message or the help of the given subcommand(s)";

/// One fixed value accepted by a flag (from a `Possible values:` list).
///
/// # Examples
///
/// ```
/// use helptree_core::Choice;
///
/// let choice = Choice::new("json", "Machine readable output");
/// assert_eq!(choice.value, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The literal value, without trailing colon.
    pub value: String,
    /// Text describing the value; may be empty.
    pub description: String,
}

impl Choice {
    pub fn new(value: &str, description: &str) -> Self {
        Self {
            value: value.to_string(),
            description: description.to_string(),
        }
    }
}

/// A flag or option as described in help text.
///
/// A flag has any number of short (`-v`) and long (`--verbose`) aliases, at
/// most one placeholder naming the value it takes (`<PATH>`), an optional list
/// of enumerated choices and a description.
///
/// # Examples
///
/// ```
/// use helptree_core::FlagSchema;
///
/// let flag = FlagSchema::new(&["-o"], &["--output"])
///     .with_placeholder("<OUTPUT>")
///     .with_description("Write the result here");
///
/// assert!(flag.takes_value());
/// assert_eq!(flag.canonical_name(), "--output");
/// assert!(flag.matches("-o"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSchema {
    /// Single-dash aliases (e.g. "-v")
    pub shorts: Vec<String>,
    /// Double-dash aliases (e.g. "--verbose")
    pub longs: Vec<String>,
    /// Placeholder for the value the flag takes (e.g. "<PATH>")
    pub placeholder: Option<String>,
    /// Enumerated values, in the order the help text lists them
    pub choices: Vec<Choice>,
    /// Description from help text
    pub description: String,
}

impl FlagSchema {
    /// Creates a flag with the given aliases and nothing else.
    pub fn new(shorts: &[&str], longs: &[&str]) -> Self {
        Self {
            shorts: shorts.iter().map(|s| s.to_string()).collect(),
            longs: longs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Sets the value placeholder.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Adds an enumerated choice.
    pub fn with_choice(mut self, value: &str, description: &str) -> Self {
        self.choices.push(Choice::new(value, description));
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Whether the flag consumes a value.
    pub fn takes_value(&self) -> bool {
        self.placeholder.is_some() || !self.choices.is_empty()
    }

    /// Returns the first long alias, falling back to the first short one.
    ///
    /// # Examples
    ///
    /// ```
    /// use helptree_core::FlagSchema;
    ///
    /// assert_eq!(FlagSchema::new(&["-v"], &["--verbose"]).canonical_name(), "--verbose");
    /// assert_eq!(FlagSchema::new(&["-v"], &[]).canonical_name(), "-v");
    /// ```
    pub fn canonical_name(&self) -> &str {
        self.longs
            .first()
            .or(self.shorts.first())
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    /// Checks if any alias equals `s`.
    pub fn matches(&self, s: &str) -> bool {
        self.shorts.iter().chain(self.longs.iter()).any(|alias| alias == s)
    }

    /// Iterates over every alias, shorts first.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.shorts
            .iter()
            .chain(self.longs.iter())
            .map(String::as_str)
    }
}

/// A positional argument: the display name from help text and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSchema {
    /// Display name, usually a placeholder such as `<FILE>` or `[TARGET]`
    pub name: String,
    pub description: String,
}

impl ArgSchema {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A node of the command tree.
///
/// The root node is the executable itself; every other node is a subcommand
/// reached from its parent. Parents own their children.
///
/// # Examples
///
/// ```
/// use helptree_core::{ArgSchema, FlagSchema, SubcommandSchema};
///
/// let root = SubcommandSchema::new("tool")
///     .with_flag(FlagSchema::new(&["-v"], &["--verbose"]))
///     .with_subcommand(
///         SubcommandSchema::new("build")
///             .with_description("Build the thing")
///             .with_arg(ArgSchema::new("[TARGET]", "What to build")),
///     );
///
/// assert_eq!(root.subcommand_names(), vec!["build"]);
/// assert_eq!(root.find_subcommand("build").unwrap().positional.len(), 1);
/// assert_eq!(root.node_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandSchema {
    /// Name of the command as typed on the command line
    pub name: String,
    /// Short description (taken from the parent's listing)
    pub description: String,
    /// Flags accepted by this command
    pub flags: Vec<FlagSchema>,
    /// Nested subcommands, in listing order
    pub subcommands: Vec<SubcommandSchema>,
    /// Positional arguments, in listing order
    pub positional: Vec<ArgSchema>,
}

impl SubcommandSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// The synthesized `help` pseudo-subcommand.
    pub fn help() -> Self {
        Self::new("help").with_description(HELP_SUBCOMMAND_DESCRIPTION)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_flag(mut self, flag: FlagSchema) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn with_arg(mut self, arg: ArgSchema) -> Self {
        self.positional.push(arg);
        self
    }

    pub fn with_subcommand(mut self, sub: SubcommandSchema) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Returns a deep copy of this node under another name.
    ///
    /// # Examples
    ///
    /// ```
    /// use helptree_core::SubcommandSchema;
    ///
    /// let smartlog = SubcommandSchema::new("smartlog").with_description("Show the graph");
    /// let sl = smartlog.renamed("sl");
    /// assert_eq!(sl.name, "sl");
    /// assert_eq!(sl.description, "Show the graph");
    /// ```
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandSchema> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of nodes in the tree rooted here, this node included.
    pub fn node_count(&self) -> usize {
        1 + self
            .subcommands
            .iter()
            .map(SubcommandSchema::node_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_aliases_and_matching() {
        let flag = FlagSchema::new(&["-v"], &["--verbose", "--loud"]);

        assert_eq!(flag.aliases().collect::<Vec<_>>(), vec!["-v", "--verbose", "--loud"]);
        assert!(flag.matches("--loud"));
        assert!(!flag.matches("-x"));
        assert!(!flag.takes_value());
    }

    #[test]
    fn test_choices_imply_value() {
        let flag = FlagSchema::new(&[], &["--color"]).with_choice("auto", "");
        assert!(flag.takes_value());
        assert_eq!(flag.canonical_name(), "--color");
    }

    #[test]
    fn test_help_subcommand_is_leaf() {
        let help = SubcommandSchema::help();
        assert_eq!(help.name, "help");
        assert_eq!(help.description, HELP_SUBCOMMAND_DESCRIPTION);
        assert!(help.flags.is_empty());
        assert!(help.subcommands.is_empty());
        assert!(help.positional.is_empty());
    }

    #[test]
    fn test_renamed_keeps_children() {
        let node = SubcommandSchema::new("smartlog")
            .with_subcommand(SubcommandSchema::new("inner"))
            .with_flag(FlagSchema::new(&["-r"], &["--reverse"]));
        let alias = node.renamed("sl");

        assert_eq!(alias.name, "sl");
        assert_eq!(alias.subcommands, node.subcommands);
        assert_eq!(alias.flags, node.flags);
        assert_eq!(node.name, "smartlog");
    }

    #[test]
    fn test_tree_serializes_to_json() {
        let root = SubcommandSchema::new("tool").with_subcommand(SubcommandSchema::help());
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["name"], "tool");
        assert_eq!(json["subcommands"][0]["name"], "help");

        let back: SubcommandSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, root);
    }
}
