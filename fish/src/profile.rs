//! What to harvest and how to render it.
//!
//! A [`Profile`] bundles the root command, the placeholder table, alias
//! rules, and host integrations. [`Profile::git_branchless`] is the built-in
//! default; a [`GeneratorConfig`](crate::config::GeneratorConfig) can adjust
//! any of it.

use std::time::Duration;

use crate::generate::{AliasRule, HostIntegration};
use crate::quote::quote;
use crate::render::DEFAULT_SUBCOMMAND_HELPER;
use crate::suggestion::{Suggestion, SuggestionTable};

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Executable harvested as the root of the tree.
    pub root: String,
    /// Flag appended to every probe.
    pub help_flag: String,
    /// Limit for each probe; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Fish function used to delegate to subcommands.
    pub helper: String,
    pub aliases: Vec<AliasRule>,
    pub hosts: Vec<HostIntegration>,
    pub suggestions: SuggestionTable,
}

impl Profile {
    /// A profile for `root` with no aliases, hosts, or suggestions.
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            help_flag: "--help".to_string(),
            timeout: None,
            helper: DEFAULT_SUBCOMMAND_HELPER.to_string(),
            aliases: Vec::new(),
            hosts: Vec::new(),
            suggestions: SuggestionTable::new(),
        }
    }

    /// The built-in profile for `git-branchless`.
    ///
    /// `smartlog` is also offered as `sl`, and the commands git-branchless
    /// installs as git aliases are completed under `git` too.
    pub fn git_branchless() -> Self {
        let mut profile = Self::new("git-branchless");
        profile.aliases.push(AliasRule::new("smartlog", "sl"));
        profile.hosts.push(HostIntegration {
            command: "git".to_string(),
            subcommands: [
                "amend", "hide", "move", "next", "prev", "query", "record", "restack", "reword",
                "sl", "smartlog", "submit", "sw", "sync", "test", "undo", "unhide",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            needs_command_condition: Some("__fish_git_needs_command".to_string()),
        });
        profile.suggestions = git_branchless_suggestions();
        profile
    }
}

const PATHS: &str = "-xa \"(__fish_complete_path)\"";
const BRANCHES: &str = "-r -ka '(__fish_git_branches)'";
const COMMITS_OR_BRANCHES: &str = "-kra '(__fish_git_commits; __fish_git_branches)'";

/// Candidates for a checkout-like target, in the order fish should list them.
const CHECKOUT_SOURCES: [&str; 5] = [
    "__fish_git_branches",
    "__fish_git_unique_remote_branches",
    "__fish_git_heads",
    "__fish_git_tags",
    "__fish_git_recent_commits --all",
];

fn git_branchless_suggestions() -> SuggestionTable {
    let checkout = format!("({})", CHECKOUT_SOURCES.join("; "));

    let mut table = SuggestionTable::new()
        .with_literal("<WORKING_DIRECTORY>", "-ra \"(__fish_complete_directories)\"")
        .with_literal("<OUTPUT>", PATHS)
        .with_literal("<MAIN_BRANCH_NAME>", BRANCHES)
        .with_literal("<BRANCH_NAME>", BRANCHES)
        .with_literal("<SOURCE>", COMMITS_OR_BRANCHES)
        .with_literal("<EXACT>", COMMITS_OR_BRANCHES)
        .with_literal("<DEST>", COMMITS_OR_BRANCHES)
        .with_literal("[TARGET]", &format!("-kra {}", quote(&checkout)))
        .with_literal("<MESSAGES>", "-r")
        .with_literal("<CREATE>", "-r")
        .with_literal("<COMMIT_TO_FIXUP>", "-ka '(__fish_git_recent_commits)'")
        // Smartlog event ids have no completion source.
        .with_literal("<EVENT_ID>", "-r")
        .with_literal("<MESSAGE>", "-r")
        .with_literal("<NUM_JOBS>", "-r")
        .with_literal("<EXEC>", "-r")
        .with_literal("<COMMAND>", "-r")
        .with_literal("<JOBS>", "-r")
        .with_literal("[NUM_COMMITS]", "-r")
        .with_literal("<GIT_EXECUTABLE>", PATHS)
        .with_literal("<PATH>", PATHS)
        .with_literal("<LEFT> <RIGHT>", PATHS)
        .with_literal("[REVSETS]...", "-kra '(__fish_git_commits)'")
        // Free-form revset expressions.
        .with_literal("<REVSET>", "-r")
        .with_literal("[REVSET]", COMMITS_OR_BRANCHES);

    // `difftool` takes a path as its base, `move` takes a commit.
    table.insert(
        "<BASE>",
        Suggestion::by_description([
            ("difftool", PATHS),
            ("commit inside a subtree", "-r -ka '(__fish_git_commits)'"),
        ]),
    );
    table
}
