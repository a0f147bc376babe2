//! Mapping value placeholders to fish argument-suggestion fragments.
//!
//! A fragment is the tail of a `complete` statement that tells fish how to
//! complete a flag's value, e.g. `-xa "(__fish_complete_path)"` for `<PATH>`.
//! Fragments come from a [`SuggestionTable`]; a placeholder the table does
//! not know falls back to suggesting the placeholder text itself and is
//! reported once through [`Diagnostics`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::SuggestionError;
use crate::quote::quote;
use helptree_core::FlagSchema;

type ResolveFn = dyn Fn(&FlagSchema) -> Result<String, SuggestionError> + Send + Sync;

/// A function choosing a fragment by looking at the whole flag.
#[derive(Clone)]
pub struct Resolver(Arc<ResolveFn>);

impl Resolver {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn(&FlagSchema) -> Result<String, SuggestionError> + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    pub fn resolve(&self, flag: &FlagSchema) -> Result<String, SuggestionError> {
        (self.0)(flag)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// How a placeholder is completed.
#[derive(Debug, Clone)]
pub enum Suggestion {
    /// The same fragment wherever the placeholder appears.
    Literal(String),
    /// A fragment that depends on the flag, used when one placeholder name
    /// means different things on different flags.
    Contextual(Resolver),
}

impl Suggestion {
    pub fn literal(fragment: impl Into<String>) -> Self {
        Self::Literal(fragment.into())
    }

    /// Picks the fragment of the first rule whose needle occurs in the flag
    /// description.
    ///
    /// # Examples
    ///
    /// ```
    /// use helptree_core::FlagSchema;
    /// use helptree_fish::suggestion::Suggestion;
    ///
    /// let base = Suggestion::by_description([
    ///     ("difftool", "-xa \"(__fish_complete_path)\""),
    ///     ("commit inside a subtree", "-r -ka '(__fish_git_branches)'"),
    /// ]);
    /// let flag = FlagSchema::new(&["-b"], &["--base"])
    ///     .with_placeholder("<BASE>")
    ///     .with_description("A commit inside a subtree to move");
    ///
    /// assert_eq!(base.resolve(&flag).unwrap(), "-r -ka '(__fish_git_branches)'");
    /// assert!(base.resolve(&flag.clone().with_description("Something else")).is_err());
    /// ```
    pub fn by_description<N, F>(rules: impl IntoIterator<Item = (N, F)>) -> Self
    where
        N: Into<String>,
        F: Into<String>,
    {
        let rules: Vec<(String, String)> = rules
            .into_iter()
            .map(|(needle, fragment)| (needle.into(), fragment.into()))
            .collect();

        Self::Contextual(Resolver::new(move |flag: &FlagSchema| {
            rules
                .iter()
                .find(|(needle, _)| flag.description.contains(needle.as_str()))
                .map(|(_, fragment)| fragment.clone())
                .ok_or_else(|| SuggestionError::UnmatchedDescription {
                    placeholder: flag.placeholder.clone().unwrap_or_default(),
                    description: flag.description.clone(),
                })
        }))
    }

    /// Produces the fragment for `flag`.
    pub fn resolve(&self, flag: &FlagSchema) -> Result<String, SuggestionError> {
        match self {
            Self::Literal(fragment) => Ok(fragment.clone()),
            Self::Contextual(resolver) => resolver.resolve(flag),
        }
    }
}

/// Placeholder name to [`Suggestion`] lookup.
#[derive(Debug, Clone, Default)]
pub struct SuggestionTable {
    entries: BTreeMap<String, Suggestion>,
}

impl SuggestionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `placeholder`.
    pub fn insert(&mut self, placeholder: impl Into<String>, suggestion: Suggestion) {
        self.entries.insert(placeholder.into(), suggestion);
    }

    /// Builder-style [`insert`](Self::insert) of a literal fragment.
    pub fn with_literal(mut self, placeholder: &str, fragment: &str) -> Self {
        self.insert(placeholder, Suggestion::literal(fragment));
        self
    }

    pub fn get(&self, placeholder: &str) -> Option<&Suggestion> {
        self.entries.get(placeholder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every entry of `other` into this table, replacing clashes.
    pub fn extend(&mut self, other: SuggestionTable) {
        self.entries.extend(other.entries);
    }
}

/// Warnings collected while resolving placeholders.
///
/// Each unknown placeholder is reported only the first time it is seen.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warned: BTreeSet<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an unknown placeholder. Returns `false` if it was already
    /// reported.
    pub fn warn_unknown_placeholder(&mut self, placeholder: &str) -> bool {
        if !self.warned.insert(placeholder.to_string()) {
            return false;
        }
        warn!(placeholder = placeholder, "unknown arg string placeholder");
        self.warnings
            .push(format!("unknown arg string placeholder {placeholder:?}"));
        true
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Unknown placeholders seen so far, sorted.
    pub fn unknown_placeholders(&self) -> impl Iterator<Item = &str> {
        self.warned.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Resolves the argument fragment for `flag`.
///
/// A flag without placeholder gets an empty fragment. Unknown placeholders
/// are recorded in `diagnostics` and fall back to `-a` with the placeholder
/// itself as the only suggestion.
///
/// # Errors
///
/// Propagates [`SuggestionError`] from contextual resolvers.
///
/// # Examples
///
/// ```
/// use helptree_core::FlagSchema;
/// use helptree_fish::suggestion::{Diagnostics, SuggestionTable, resolve};
///
/// let table = SuggestionTable::new().with_literal("<PATH>", "-xa \"(__fish_complete_path)\"");
/// let mut diagnostics = Diagnostics::new();
///
/// let path = FlagSchema::new(&[], &["--path"]).with_placeholder("<PATH>");
/// assert_eq!(resolve(&table, &path, &mut diagnostics).unwrap(), "-xa \"(__fish_complete_path)\"");
///
/// let widget = FlagSchema::new(&[], &["--widget"]).with_placeholder("<WIDGET>");
/// assert_eq!(
///     resolve(&table, &widget, &mut diagnostics).unwrap(),
///     r#"-a ''"'"'<WIDGET>'"'"''"#
/// );
/// assert_eq!(diagnostics.warnings().len(), 1);
/// ```
pub fn resolve(
    table: &SuggestionTable,
    flag: &FlagSchema,
    diagnostics: &mut Diagnostics,
) -> Result<String, SuggestionError> {
    let Some(placeholder) = flag.placeholder.as_deref() else {
        return Ok(String::new());
    };

    match table.get(placeholder) {
        Some(suggestion) => suggestion.resolve(flag),
        None => {
            diagnostics.warn_unknown_placeholder(placeholder);
            if placeholder.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!("-a {}", quote(&quote(placeholder))))
            }
        }
    }
}
