//! Structural checks for harvested command trees.
//!
//! Help text is scraped heuristically, so a tree can come out with odd
//! aliases or duplicated entries. [`validate_tree`] reports such problems
//! without rejecting the tree; callers decide whether to log or fail.
//!
//! # Examples
//!
//! ```
//! use helptree_core::*;
//!
//! let root = SubcommandSchema::new("tool")
//!     .with_flag(FlagSchema::new(&["-v"], &["--verbose"]));
//! assert!(validate_tree(&root).is_empty());
//!
//! // Short alias missing its dash
//! let bad = SubcommandSchema::new("tool").with_flag(FlagSchema::new(&["v"], &[]));
//! assert!(!validate_tree(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{FlagSchema, SubcommandSchema};

/// A structural problem found in a command tree.
///
/// Every variant carries the space-separated command path of the node where
/// the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Node name is empty or whitespace-only.
    #[error("{path}: command name cannot be empty")]
    EmptyName { path: String },
    /// Short alias is not a single dash followed by a name.
    #[error("{path}: invalid short flag format: {alias}")]
    InvalidShortFlag { path: String, alias: String },
    /// Long alias does not start with `--` or is too short.
    #[error("{path}: invalid long flag format: {alias}")]
    InvalidLongFlag { path: String, alias: String },
    /// A flag has no alias at all.
    #[error("{path}: flag must define a short or long form")]
    MissingFlagName { path: String },
    /// Two flags of the same node share an alias.
    #[error("{path}: duplicate flag: {alias}")]
    DuplicateFlag { path: String, alias: String },
    /// Two children of the same node share a name.
    #[error("{path}: duplicate subcommand: {name}")]
    DuplicateSubcommand { path: String, name: String },
    /// A subcommand repeats the name of one of its ancestors.
    ///
    /// The tree itself stays finite; this usually means a command lists
    /// itself or an alias of a parent among its subcommands.
    #[error("{path}: subcommand repeats an ancestor's name: {name}")]
    RepeatedAncestorName { path: String, name: String },
}

/// Validates a command tree, returning every problem found.
///
/// # Examples
///
/// ```
/// use helptree_core::*;
///
/// let root = SubcommandSchema::new("git")
///     .with_subcommand(SubcommandSchema::new("remote").with_subcommand(SubcommandSchema::new("git")));
/// let errors = validate_tree(&root);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::RepeatedAncestorName { .. })));
/// ```
pub fn validate_tree(root: &SubcommandSchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut path = vec![root.name.trim().to_string()];
    validate_node(root, &mut path, &mut errors);
    errors
}

fn validate_node(node: &SubcommandSchema, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    let here = path.join(" ");
    if node.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName { path: here.clone() });
    }

    validate_flags(&node.flags, &here, errors);

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &node.subcommands {
        let name = sub.name.trim();
        if !name.is_empty() && !seen.insert(name) {
            errors.push(ValidationError::DuplicateSubcommand {
                path: here.clone(),
                name: name.to_string(),
            });
            continue;
        }

        if !name.is_empty() && path.iter().any(|segment| segment == name) {
            errors.push(ValidationError::RepeatedAncestorName {
                path: here.clone(),
                name: name.to_string(),
            });
        }

        path.push(name.to_string());
        validate_node(sub, path, errors);
        path.pop();
    }
}

fn validate_flags(flags: &[FlagSchema], path: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for flag in flags {
        if flag.shorts.is_empty() && flag.longs.is_empty() {
            errors.push(ValidationError::MissingFlagName {
                path: path.to_string(),
            });
            continue;
        }

        for short in &flag.shorts {
            if !short.starts_with('-') || short.starts_with("--") || short.len() < 2 {
                errors.push(ValidationError::InvalidShortFlag {
                    path: path.to_string(),
                    alias: short.clone(),
                });
            }
        }
        for long in &flag.longs {
            if !long.starts_with("--") || long.len() < 3 {
                errors.push(ValidationError::InvalidLongFlag {
                    path: path.to_string(),
                    alias: long.clone(),
                });
            }
        }

        for alias in flag.aliases() {
            if !seen.insert(alias) {
                errors.push(ValidationError::DuplicateFlag {
                    path: path.to_string(),
                    alias: alias.to_string(),
                });
            }
        }
    }
}
