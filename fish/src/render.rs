//! Fish `complete` statements for a command tree.
//!
//! Every node is registered under a flattened command name: the root keeps
//! its own name and each child is `PARENT__CHILD`. A node with children
//! offers their names while none has been typed yet, and hands over to the
//! child's registration through a helper function once one has. The helper
//! (`_myfish_complete_subcommand` by default) is expected to be defined in
//! the user's fish configuration; it re-runs completion with `argv[0]` set to
//! the flattened name.

use std::collections::BTreeMap;
use std::io::{self, Write};

use tracing::debug;

use crate::error::RenderError;
use crate::quote::{join, quote};
use crate::suggestion::{Diagnostics, SuggestionTable, resolve};
use helptree_core::{Choice, FlagSchema, SubcommandSchema};

/// Fish function that delegates completion to a flattened subcommand name.
pub const DEFAULT_SUBCOMMAND_HELPER: &str = "_myfish_complete_subcommand";

/// Writes completion statements for [`SubcommandSchema`] trees.
///
/// The renderer owns the [`Diagnostics`] for its run, so unknown placeholders
/// are reported once no matter how many trees are rendered with it.
///
/// # Examples
///
/// ```
/// use helptree_core::{FlagSchema, SubcommandSchema};
/// use helptree_fish::render::FishRenderer;
/// use helptree_fish::suggestion::SuggestionTable;
///
/// let tree = SubcommandSchema::new("tool")
///     .with_flag(FlagSchema::new(&["-v"], &["--verbose"]).with_description("Increase verbosity"))
///     .with_subcommand(SubcommandSchema::new("build").with_description("Build the thing"));
///
/// let table = SuggestionTable::new();
/// let mut renderer = FishRenderer::new(&table);
/// let script = renderer.render_to_string(&tree, "").unwrap();
///
/// assert!(script.starts_with("complete -c tool -f -s v -l verbose -d 'Increase verbosity'\n"));
/// assert!(script.contains("--fcs-set-argv0=\"tool__build\""));
/// ```
pub struct FishRenderer<'a> {
    table: &'a SuggestionTable,
    helper: String,
    conditions: BTreeMap<String, String>,
    diagnostics: Diagnostics,
}

impl<'a> FishRenderer<'a> {
    pub fn new(table: &'a SuggestionTable) -> Self {
        Self {
            table,
            helper: DEFAULT_SUBCOMMAND_HELPER.to_string(),
            conditions: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Uses `helper` as the delegating fish function.
    pub fn with_helper(mut self, helper: &str) -> Self {
        self.helper = helper.to_string();
        self
    }

    /// Replaces the "no subcommand typed yet" condition for `command`.
    ///
    /// Host commands ship their own test for this, e.g. git's
    /// `__fish_git_needs_command`.
    pub fn set_needs_command_condition(&mut self, command: &str, condition: &str) {
        self.conditions
            .insert(command.to_string(), condition.to_string());
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Writes the statements for `node` and all of its descendants.
    ///
    /// The node is registered as `prefix + node.name`.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails or a contextual suggestion matches
    /// none of its rules.
    pub fn render<W: Write>(
        &mut self,
        node: &SubcommandSchema,
        prefix: &str,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let cmd = format!("{prefix}{}", node.name);
        debug!(command = %cmd, "Rendering completions");

        for flag in &node.flags {
            let line = self.flag_statement(&cmd, flag)?;
            writeln!(out, "{line}")?;
        }

        if !node.subcommands.is_empty() {
            writeln!(out, "{}", self.dispatch_statement(&cmd, node))?;
            for sub in &node.subcommands {
                writeln!(out, "{}", self.delegation_statement(&cmd, &sub.name))?;
            }
        }

        let child_prefix = format!("{cmd}__");
        for sub in &node.subcommands {
            writeln!(out)?;
            self.render(sub, &child_prefix, out)?;
        }

        if !node.positional.is_empty() {
            let names: Vec<&str> = node.positional.iter().map(|arg| arg.name.as_str()).collect();
            let synthetic = FlagSchema::new(&[], &[])
                .with_placeholder(&names.join(" "))
                .with_description(&node.description);
            let fragment = resolve(self.table, &synthetic, &mut self.diagnostics)?;
            writeln!(out, "{}", statement(&["complete", "-c", &cmd, "-f", &fragment]))?;
        }

        Ok(())
    }

    /// Renders into a string instead of a writer.
    pub fn render_to_string(
        &mut self,
        node: &SubcommandSchema,
        prefix: &str,
    ) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render(node, prefix, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|err| RenderError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    fn flag_statement(&mut self, cmd: &str, flag: &FlagSchema) -> Result<String, RenderError> {
        let shorts = flag
            .shorts
            .iter()
            .map(|short| join(&["-s", short.trim_start_matches('-')]))
            .collect::<Vec<_>>()
            .join(" ");
        let longs = flag
            .longs
            .iter()
            .map(|long| join(&["-l", long.trim_start_matches('-')]))
            .collect::<Vec<_>>()
            .join(" ");
        let args = if flag.choices.is_empty() {
            resolve(self.table, flag, &mut self.diagnostics)?
        } else {
            format!("-r {}", suggest_list(&flag.choices))
        };

        Ok(statement(&[
            "complete",
            "-c",
            cmd,
            "-f",
            &shorts,
            &longs,
            "-d",
            &quote(&flag.description),
            &args,
        ]))
    }

    fn dispatch_statement(&self, cmd: &str, node: &SubcommandSchema) -> String {
        let condition = match self.conditions.get(cmd) {
            Some(condition) => condition.clone(),
            None => format!(
                "\"not __fish_seen_subcommand_from \"{}",
                quote(&join(&node.subcommand_names()))
            ),
        };
        let choices: Vec<Choice> = node
            .subcommands
            .iter()
            .map(|sub| Choice::new(&sub.name, &sub.description))
            .collect();

        statement(&[
            "complete",
            "-c",
            cmd,
            "-f",
            "--condition",
            &condition,
            &suggest_list(&choices),
        ])
    }

    fn delegation_statement(&self, cmd: &str, sub: &str) -> String {
        format!(
            "complete -c {cmd} -f --condition \"__fish_seen_subcommand_from {sub}\" -a '({} --fcs-set-argv0=\"{cmd}__{sub}\")'",
            self.helper
        )
    }
}

/// Joins the non-empty parts of a statement with single spaces.
fn statement(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// One candidate of an `-a` list, with its description after a tab.
fn suggest(value: &str, description: &str) -> String {
    let mut candidate = quote(value).into_owned();
    if !description.is_empty() {
        candidate.push_str(&quote(&format!("\t{description}")));
    }
    candidate.push('\n');
    quote(&candidate).into_owned()
}

fn suggest_list(choices: &[Choice]) -> String {
    let candidates: String = choices
        .iter()
        .map(|choice| suggest(&choice.value, &choice.description))
        .collect();
    format!("-a {candidates}")
}
