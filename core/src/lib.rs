//! Command tree types shared by the harvest and render passes.
//!
//! - [`SubcommandSchema`]: one node of a command tree (the root is the
//!   executable itself) with its flags, positional arguments and children.
//! - [`FlagSchema`]: a flag with its short/long aliases, optional value
//!   placeholder and enumerated [`Choice`]s.
//! - [`ArgSchema`]: a positional argument.
//!
//! [`validate_tree`] reports structural problems such as malformed aliases,
//! duplicates and subcommands repeating an ancestor's name.
//!
//! # Example
//!
//! ```
//! use helptree_core::*;
//!
//! let root = SubcommandSchema::new("mycli")
//!     .with_flag(FlagSchema::new(&["-v"], &["--verbose"]).with_description("Be loud"))
//!     .with_subcommand(
//!         SubcommandSchema::new("run")
//!             .with_flag(FlagSchema::new(&[], &["--port"]).with_placeholder("<PORT>"))
//!             .with_arg(ArgSchema::new("<SCRIPT>", "Script to run")),
//!     )
//!     .with_subcommand(SubcommandSchema::help());
//!
//! assert_eq!(root.subcommand_names(), vec!["run", "help"]);
//! assert!(validate_tree(&root).is_empty());
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{ValidationError, validate_tree};
