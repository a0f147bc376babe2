//! Recursive harvest of a command tree.
//!
//! The harvester probes a command's help, parses it, and descends into every
//! listed subcommand, depth first and one probe at a time. The `help`
//! pseudo-subcommand is never probed; a fixed leaf takes its place.
//!
//! # Example
//!
//! ```
//! use helptree_discovery::error::Result;
//! use helptree_discovery::harvest::Harvester;
//!
//! let probe = |invocation: &[String]| -> Result<String> {
//!     Ok(match invocation.join(" ").as_str() {
//!         "tool" => "Commands:\n  build  Build the thing\n  help   Print help\n".to_string(),
//!         _ => "Usage: tool build\n".to_string(),
//!     })
//! };
//!
//! let mut harvester = Harvester::new(probe);
//! let root = harvester.harvest(&["tool".to_string()]).unwrap();
//! assert_eq!(root.subcommand_names(), vec!["build", "help"]);
//! assert_eq!(root.subcommands[0].description, "Build the thing");
//! assert_eq!(harvester.probe_count(), 2);
//! ```

use tracing::{debug, info, warn};

use crate::error::{DiscoveryError, Result};
use crate::parser::parse_help_text;
use crate::probe::{CommandProbe, HelpProbe};
use helptree_core::{SubcommandSchema, validate_tree};

/// Name of the pseudo-subcommand that is synthesized instead of probed.
pub const HELP_SUBCOMMAND: &str = "help";

/// Default limit on subcommand nesting.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Knobs for a harvest run.
#[derive(Debug, Clone, Copy)]
pub struct HarvestOptions {
    /// Deepest subcommand nesting accepted below the root.
    pub max_depth: usize,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds [`SubcommandSchema`] trees from help output.
pub struct Harvester<P> {
    probe: P,
    options: HarvestOptions,
    probes: usize,
}

impl<P: HelpProbe> Harvester<P> {
    pub fn new(probe: P) -> Self {
        Self::with_options(probe, HarvestOptions::default())
    }

    pub fn with_options(probe: P, options: HarvestOptions) -> Self {
        Self {
            probe,
            options,
            probes: 0,
        }
    }

    /// Number of help probes issued so far.
    pub fn probe_count(&self) -> usize {
        self.probes
    }

    /// Harvests the tree rooted at `invocation`.
    ///
    /// The root is named after the last invocation token and has an empty
    /// description. Structural problems in the finished tree are logged, not
    /// returned.
    ///
    /// # Errors
    ///
    /// Any probe or parse failure aborts the whole harvest.
    pub fn harvest(&mut self, invocation: &[String]) -> Result<SubcommandSchema> {
        let root = self.harvest_node(invocation)?;

        for problem in validate_tree(&root) {
            warn!(%problem, "Harvested tree has a structural problem");
        }
        info!(
            command = ?invocation,
            nodes = root.node_count(),
            probes = self.probes,
            "Harvested command tree"
        );
        Ok(root)
    }

    fn harvest_node(&mut self, invocation: &[String]) -> Result<SubcommandSchema> {
        let Some(name) = invocation.last() else {
            return Err(DiscoveryError::EmptyInvocation);
        };
        let depth = invocation.len() - 1;
        if depth > self.options.max_depth {
            return Err(DiscoveryError::DepthExceeded {
                invocation: invocation.to_vec(),
                max_depth: self.options.max_depth,
            });
        }

        debug!(command = ?invocation, depth = depth, "Probing subcommand");
        self.probes += 1;
        let help = self.probe.help_text(invocation)?;
        let parsed = parse_help_text(name, &help).map_err(|source| DiscoveryError::Parse {
            invocation: invocation.to_vec(),
            source,
        })?;

        let mut node = SubcommandSchema::new(name);
        node.flags = parsed.flags;
        node.positional = parsed.positional;

        for entry in parsed.commands {
            if entry.name == HELP_SUBCOMMAND {
                node.subcommands.push(SubcommandSchema::help());
                continue;
            }

            let mut child_invocation = invocation.to_vec();
            child_invocation.push(entry.name);
            let mut child = self.harvest_node(&child_invocation)?;
            // The parent's listing carries the one-line summary.
            child.description = entry.description;
            node.subcommands.push(child);
        }

        Ok(node)
    }
}

/// Harvests `command` by running it and its subcommands with `--help`.
///
/// # Errors
///
/// See [`Harvester::harvest`].
pub fn harvest_command(command: &str) -> Result<SubcommandSchema> {
    Harvester::new(CommandProbe::default()).harvest(&[command.to_string()])
}
