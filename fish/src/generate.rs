//! Full completion script for a harvested tree.
//!
//! Besides the tree itself, a script may register aliases (a root child
//! offered under a second name) and host integrations (the tool's commands
//! reachable through another executable, like `git move` for
//! `git-branchless move`).

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GenerateError;
use crate::profile::Profile;
use crate::render::FishRenderer;
use crate::suggestion::Diagnostics;
use helptree_core::SubcommandSchema;

/// Offers the root child `target` under the extra name `alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub target: String,
    pub alias: String,
}

impl AliasRule {
    pub fn new(target: &str, alias: &str) -> Self {
        Self {
            target: target.to_string(),
            alias: alias.to_string(),
        }
    }
}

/// Another executable that exposes some of the root's subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIntegration {
    /// Name of the host executable, e.g. `git`.
    pub command: String,
    /// Root children re-registered under the host.
    pub subcommands: Vec<String>,
    /// Fish condition for "no subcommand typed yet" on the host, if it has
    /// its own.
    #[serde(default)]
    pub needs_command_condition: Option<String>,
}

/// Returns a copy of `root` with every alias rule applied.
///
/// Alias children are appended after the existing children, in rule order.
///
/// # Errors
///
/// Fails with [`GenerateError::UnknownAliasTarget`] if a rule names a child
/// the root does not have.
pub fn with_aliases(
    root: &SubcommandSchema,
    aliases: &[AliasRule],
) -> Result<SubcommandSchema, GenerateError> {
    let mut root = root.clone();
    for rule in aliases {
        let Some(target) = root.find_subcommand(&rule.target) else {
            return Err(GenerateError::UnknownAliasTarget {
                target: rule.target.clone(),
                alias: rule.alias.clone(),
            });
        };
        let alias = target.renamed(&rule.alias);
        debug!(target = %rule.target, alias = %rule.alias, "Adding alias");
        root.subcommands.push(alias);
    }
    Ok(root)
}

/// Builds the synthetic root for `host`.
///
/// It carries the root's description and flags and the root children the
/// host allows, in the root's order. Allowed names the root lacks are
/// skipped.
pub fn host_root(root: &SubcommandSchema, host: &HostIntegration) -> SubcommandSchema {
    SubcommandSchema {
        name: host.command.clone(),
        description: root.description.clone(),
        flags: root.flags.clone(),
        subcommands: root
            .subcommands
            .iter()
            .filter(|sub| host.subcommands.contains(&sub.name))
            .cloned()
            .collect(),
        positional: root.positional.clone(),
    }
}

/// Writes the complete script for `root` under `profile` to `out`.
///
/// The aliased root is rendered first, then one tree per host integration.
/// Returns the diagnostics collected over the whole script.
///
/// # Errors
///
/// Fails on unknown alias targets and on any render failure.
pub fn generate<W: Write>(
    root: &SubcommandSchema,
    profile: &Profile,
    out: &mut W,
) -> Result<Diagnostics, GenerateError> {
    let root = with_aliases(root, &profile.aliases)?;

    let mut renderer = FishRenderer::new(&profile.suggestions).with_helper(&profile.helper);
    for host in &profile.hosts {
        if let Some(condition) = &host.needs_command_condition {
            renderer.set_needs_command_condition(&host.command, condition);
        }
    }

    renderer.render(&root, "", out)?;
    for host in &profile.hosts {
        let host_tree = host_root(&root, host);
        debug!(host = %host.command, subcommands = host_tree.subcommands.len(), "Rendering host integration");
        renderer.render(&host_tree, "", out)?;
    }

    let diagnostics = renderer.into_diagnostics();
    info!(
        root = %root.name,
        hosts = profile.hosts.len(),
        warnings = diagnostics.warnings().len(),
        "Generated fish completions"
    );
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helptree_core::FlagSchema;

    fn tree() -> SubcommandSchema {
        SubcommandSchema::new("tool")
            .with_flag(FlagSchema::new(&["-q"], &[]).with_description("Quiet"))
            .with_subcommand(SubcommandSchema::new("amend").with_description("Amend"))
            .with_subcommand(SubcommandSchema::new("init").with_description("Init"))
            .with_subcommand(SubcommandSchema::new("smartlog").with_description("Graph"))
    }

    #[test]
    fn test_aliases_are_appended() {
        let aliased = with_aliases(&tree(), &[AliasRule::new("smartlog", "sl")]).unwrap();
        assert_eq!(aliased.subcommand_names(), vec!["amend", "init", "smartlog", "sl"]);
        assert_eq!(aliased.subcommands[3].description, "Graph");
    }

    #[test]
    fn test_unknown_alias_target() {
        let err = with_aliases(&tree(), &[AliasRule::new("missing", "m")]).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnknownAliasTarget { ref target, ref alias } if target == "missing" && alias == "m"
        ));
    }

    #[test]
    fn test_host_root_keeps_root_order() {
        let host = HostIntegration {
            command: "git".to_string(),
            subcommands: vec!["smartlog".to_string(), "amend".to_string(), "nope".to_string()],
            needs_command_condition: None,
        };
        let git = host_root(&tree(), &host);

        assert_eq!(git.name, "git");
        assert_eq!(git.subcommand_names(), vec!["amend", "smartlog"]);
        assert_eq!(git.flags, tree().flags);
    }

    #[test]
    fn test_generate_renders_root_then_hosts() {
        let mut profile = Profile::new("tool");
        profile.aliases.push(AliasRule::new("smartlog", "sl"));
        profile.hosts.push(HostIntegration {
            command: "git".to_string(),
            subcommands: vec!["sl".to_string(), "amend".to_string()],
            needs_command_condition: Some("__fish_git_needs_command".to_string()),
        });

        let mut out = Vec::new();
        let diagnostics = generate(&tree(), &profile, &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();

        assert!(diagnostics.is_empty());
        assert!(script.starts_with("complete -c tool -f -s q -d Quiet\n"));
        assert!(script.contains("--fcs-set-argv0=\"tool__sl\""));
        assert!(script.contains("complete -c git -f --condition __fish_git_needs_command -a "));
        assert!(script.contains("--fcs-set-argv0=\"git__sl\""));
        assert!(script.contains("--fcs-set-argv0=\"git__amend\""));
        assert!(!script.contains("git__init"));

        let tool_at = script.find("complete -c tool ").unwrap();
        let git_at = script.find("complete -c git ").unwrap();
        assert!(tool_at < git_at);
    }
}
