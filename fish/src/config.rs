//! YAML overrides for a [`Profile`].
//!
//! Every field is optional; anything left out keeps the profile's value.
//!
//! # Example YAML
//!
//! ```yaml
//! root: git-branchless
//! help_flag: --help
//! timeout_ms: 5000
//! aliases:
//!   - target: smartlog
//!     alias: sl
//! hosts:
//!   - command: git
//!     subcommands: [amend, move, sl, smartlog]
//!     needs_command_condition: __fish_git_needs_command
//! suggestions:
//!   "<WIDGET>": "-r"
//!   "<PATH>": '-xa "(__fish_complete_path)"'
//! contextual:
//!   "<BASE>":
//!     - contains: difftool
//!       fragment: '-xa "(__fish_complete_path)"'
//!     - contains: commit inside a subtree
//!       fragment: "-r -ka '(__fish_git_commits)'"
//! ```

use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::generate::{AliasRule, HostIntegration};
use crate::profile::Profile;
use crate::suggestion::{Suggestion, SuggestionTable};

/// One rule of a description-dependent suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRule {
    /// Substring looked for in the flag description.
    pub contains: String,
    /// Fragment used when it is found.
    pub fragment: String,
}

/// Generator settings read from a YAML file.
///
/// # Examples
///
/// ```
/// use helptree_fish::config::GeneratorConfig;
/// use helptree_fish::profile::Profile;
///
/// let config = GeneratorConfig::from_yaml_str("root: mytool\ntimeout_ms: 250\n").unwrap();
/// let profile = config.apply(Profile::git_branchless());
///
/// assert_eq!(profile.root, "mytool");
/// assert_eq!(profile.timeout.unwrap().as_millis(), 250);
/// // Untouched settings keep their defaults.
/// assert_eq!(profile.aliases.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub root: Option<String>,
    pub help_flag: Option<String>,
    pub timeout_ms: Option<u64>,
    pub helper: Option<String>,
    /// Replaces the profile's alias rules when present.
    pub aliases: Option<Vec<AliasRule>>,
    /// Replaces the profile's host integrations when present.
    pub hosts: Option<Vec<HostIntegration>>,
    /// Literal fragments, added to or overriding the profile's table.
    pub suggestions: BTreeMap<String, String>,
    /// Description-dependent fragments, applied after `suggestions`.
    pub contextual: BTreeMap<String, Vec<DescriptionRule>>,
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading generator config");
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Returns `profile` with these settings applied.
    pub fn apply(self, mut profile: Profile) -> Profile {
        if let Some(root) = self.root {
            profile.root = root;
        }
        if let Some(help_flag) = self.help_flag {
            profile.help_flag = help_flag;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            profile.timeout = Some(Duration::from_millis(timeout_ms));
        }
        if let Some(helper) = self.helper {
            profile.helper = helper;
        }
        if let Some(aliases) = self.aliases {
            profile.aliases = aliases;
        }
        if let Some(hosts) = self.hosts {
            profile.hosts = hosts;
        }

        let mut overrides = SuggestionTable::new();
        for (placeholder, fragment) in self.suggestions {
            overrides.insert(placeholder, Suggestion::Literal(fragment));
        }
        for (placeholder, rules) in self.contextual {
            let rules = rules.into_iter().map(|rule| (rule.contains, rule.fragment));
            overrides.insert(placeholder, Suggestion::by_description(rules));
        }
        profile.suggestions.extend(overrides);
        profile
    }
}
