//! Fish shell completions for harvested command trees.
//!
//! Takes a [`SubcommandSchema`] tree (usually from `helptree-discovery`) and
//! writes fish `complete` statements for it.
//!
//! # Main entry points
//!
//! - [`generate::generate`] writes the whole script for a [`profile::Profile`]:
//!   the tree, its aliases, and its host integrations.
//! - [`render::FishRenderer`] renders a single tree.
//! - [`config::GeneratorConfig`] loads YAML overrides for a profile.
//!
//! # Example
//!
//! ```
//! use helptree_core::SubcommandSchema;
//! use helptree_fish::{Profile, generate};
//!
//! let root = SubcommandSchema::new("tool")
//!     .with_subcommand(SubcommandSchema::new("build").with_description("Build the thing"));
//!
//! let mut out = Vec::new();
//! let diagnostics = generate(&root, &Profile::new("tool"), &mut out).unwrap();
//! let script = String::from_utf8(out).unwrap();
//!
//! assert!(script.contains("__fish_seen_subcommand_from build"));
//! assert!(diagnostics.is_empty());
//! ```
//!
//! [`SubcommandSchema`]: helptree_core::SubcommandSchema

pub mod config;
pub mod error;
pub mod generate;
pub mod profile;
pub mod quote;
pub mod render;
pub mod suggestion;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, RenderError, SuggestionError};
pub use generate::{AliasRule, HostIntegration, generate};
pub use profile::Profile;
pub use render::FishRenderer;
pub use suggestion::{Diagnostics, Suggestion, SuggestionTable};
