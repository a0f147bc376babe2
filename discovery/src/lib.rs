//! Harvest command trees from `--help` output.
//!
//! This crate runs a program's `--help`, parses the clap-style text into
//! flags, positional arguments and subcommands, and recurses into every
//! subcommand to build a [`SubcommandSchema`] tree.
//!
//! # Main entry points
//!
//! - [`parser::parse_help_text`]: parse one pre-captured help page without
//!   running anything.
//! - [`harvest::Harvester`]: recursive harvest over any
//!   [`probe::HelpProbe`].
//! - [`harvest::harvest_command`]: harvest an installed command with
//!   [`probe::CommandProbe`].
//!
//! # Example
//!
//! ```
//! use helptree_discovery::parser::parse_help_text;
//!
//! let help = "\
//! Usage: mycli [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build  Build the thing
//!   help   Print this message or the help of the given subcommand(s)
//!
//! Options:
//!   -v, --verbose
//!           Increase verbosity
//! ";
//!
//! let parsed = parse_help_text("mycli", help).unwrap();
//! assert_eq!(parsed.commands.len(), 2);
//! assert_eq!(parsed.flags[0].longs, vec!["--verbose"]);
//! ```
//!
//! [`SubcommandSchema`]: helptree_core::SubcommandSchema

pub mod error;
pub mod harvest;
pub mod parser;
pub mod probe;

pub use error::{DiscoveryError, ParseError};
pub use harvest::{HarvestOptions, Harvester, harvest_command};
pub use probe::{CommandProbe, HelpProbe};
