//! Filename transformations.
//!
//! A [`RenameMode`] describes what to do to a name; a [`Transformer`] is the
//! compiled form that can be applied to any number of names. Regex
//! compilation happens once, up front, so a bad pattern fails the run before
//! any file is touched.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};
use thiserror::Error;

/// Matches the pieces of a replacement string that need rewriting before it
/// is handed to the regex engine: `\1`-style backreferences, escaped
/// backslashes, and literal `$`.
static REPLACEMENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(\d+)|\\\\|\$").unwrap());

#[derive(Error, Debug)]
#[error("invalid regex pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Parameters for pattern mode (literal or regex search and replace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub pattern: String,
    pub replacement: String,
    pub use_regex: bool,
    pub case_insensitive: bool,
}

/// The active transformation, selected once from CLI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameMode {
    Lowercase,
    Uppercase,
    SpacesToDash,
    SpacesToUnderscore,
    RemoveSpaces,
    AddPrefix(String),
    AddSuffix(String),
    Number,
    Pattern(PatternSpec),
}

impl RenameMode {
    pub fn description(&self) -> &'static str {
        match self {
            RenameMode::Lowercase => "lowercase",
            RenameMode::Uppercase => "uppercase",
            RenameMode::SpacesToDash => "spaces-to-dash",
            RenameMode::SpacesToUnderscore => "spaces-to-underscore",
            RenameMode::RemoveSpaces => "remove-spaces",
            RenameMode::AddPrefix(_) => "add-prefix",
            RenameMode::AddSuffix(_) => "add-suffix",
            RenameMode::Number => "number",
            RenameMode::Pattern(spec) if spec.use_regex => "regex pattern",
            RenameMode::Pattern(_) => "literal pattern",
        }
    }
}

/// A rename mode with its pattern compiled and ready to apply.
pub struct Transformer {
    mode: RenameMode,
    /// Compiled matcher; present for regex mode and case-insensitive
    /// literal mode.
    matcher: Option<Regex>,
    /// Replacement rewritten to the engine's `${n}` syntax; regex mode only.
    replacement: Option<String>,
}

impl Transformer {
    pub fn new(mode: RenameMode) -> Result<Self, PatternError> {
        let mut matcher = None;
        let mut replacement = None;

        if let RenameMode::Pattern(spec) = &mode {
            if spec.use_regex {
                let re = RegexBuilder::new(&spec.pattern)
                    .case_insensitive(spec.case_insensitive)
                    .build()
                    .map_err(|source| PatternError {
                        pattern: spec.pattern.clone(),
                        source,
                    })?;
                matcher = Some(re);
                replacement = Some(rewrite_backrefs(&spec.replacement));
            } else if spec.case_insensitive {
                // Escaped pattern, so the only regex feature in play is the
                // case-insensitive flag. The escaped form always compiles,
                // but the size limit still applies.
                let re = RegexBuilder::new(&regex::escape(&spec.pattern))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PatternError {
                        pattern: spec.pattern.clone(),
                        source,
                    })?;
                matcher = Some(re);
            }
        }

        Ok(Self {
            mode,
            matcher,
            replacement,
        })
    }

    /// Compute the new base name for `name`.
    ///
    /// `ordinal` is the file's zero-based position in the sorted file list;
    /// only the numbering mode reads it. Pure: same inputs, same output.
    pub fn apply(&self, name: &str, ordinal: usize) -> String {
        match &self.mode {
            RenameMode::Lowercase => name.to_lowercase(),
            RenameMode::Uppercase => name.to_uppercase(),
            RenameMode::SpacesToDash => name.replace(' ', "-"),
            RenameMode::SpacesToUnderscore => name.replace(' ', "_"),
            RenameMode::RemoveSpaces => name.replace(' ', ""),
            RenameMode::AddPrefix(text) => format!("{text}{name}"),
            RenameMode::AddSuffix(text) => {
                let (stem, ext) = split_name(name);
                format!("{stem}{text}{ext}")
            }
            RenameMode::Number => format!("{:03}_{name}", ordinal + 1),
            RenameMode::Pattern(spec) => match &self.matcher {
                Some(re) if spec.use_regex => {
                    let rewritten = self.replacement.as_deref().unwrap_or(&spec.replacement);
                    re.replace_all(name, rewritten).into_owned()
                }
                // Case-insensitive literal: matched with case folding, but
                // the replacement text goes in verbatim.
                Some(re) => re.replace_all(name, NoExpand(&spec.replacement)).into_owned(),
                None => name.replace(&spec.pattern, &spec.replacement),
            },
        }
    }
}

/// Split a base name into (stem, extension-with-dot).
///
/// The final extension only: `archive.tar.gz` splits as `archive.tar` +
/// `.gz`. A leading dot is part of the stem, and a name with no dot has an
/// empty extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Rewrite `\1`-style backreferences to the regex engine's `${1}` form.
///
/// `\\` becomes a literal backslash and a bare `$` is neutralized to `$$`
/// so it never reads as a group reference.
fn rewrite_backrefs(replacement: &str) -> String {
    REPLACEMENT_TOKEN
        .replace_all(replacement, |caps: &regex::Captures| {
            if let Some(num) = caps.get(1) {
                format!("${{{}}}", num.as_str())
            } else if &caps[0] == "$" {
                "$$".to_string()
            } else {
                "\\".to_string()
            }
        })
        .into_owned()
}
