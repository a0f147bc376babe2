//! Error types for rendering completions.

use thiserror::Error;

/// A placeholder could not be turned into a suggestion fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// A description-dependent placeholder met a description none of its
    /// rules recognize.
    #[error("no rule for placeholder {placeholder} matches description {description:?}")]
    UnmatchedDescription {
        placeholder: String,
        description: String,
    },
}

/// Errors while writing completion statements.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
}

/// Errors while generating the full completion script.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An alias rule names a subcommand the root does not have.
    #[error("cannot alias `{alias}`: no subcommand named `{target}`")]
    UnknownAliasTarget { target: String, alias: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors loading a generator configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
