use clap::Parser;
use std::path::PathBuf;

use crate::transform::{PatternSpec, RenameMode};

const EXAMPLES: &str = "\
Examples:
  rename-files photo image                  Replace 'photo' with 'image'
  rename-files -r \"IMG_(\\d+)\" \"Photo_\\1\"    Regex with backreference
  rename-files -e jpg DSC Photo             Only .jpg files
  rename-files --lowercase                  Convert names to lowercase
  rename-files --spaces-to-dash             Replace spaces with dashes
  rename-files --add-prefix 2024_           Add a prefix
  rename-files --number                     Add sequential numbers
  rename-files -n old new                   Preview without renaming
  rename-files -i --lowercase               Confirm each rename";

#[derive(Parser, Debug)]
#[command(name = "rename-files")]
#[command(author, version, long_about = None)]
#[command(about = "Batch rename files with patterns")]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Text (or regex with -r) to search for in filenames
    pub pattern: Option<String>,

    /// Replacement text
    pub replacement: Option<String>,

    /// Directory to process
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    pub dir: PathBuf,

    /// Treat the pattern as a regular expression
    #[arg(short, long)]
    pub regex: bool,

    /// Only rename files with this extension
    #[arg(short, long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Show what would be renamed without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Ask for confirmation before each rename
    #[arg(short, long)]
    pub interactive: bool,

    /// Process subdirectories recursively
    #[arg(long)]
    pub recursive: bool,

    /// Case-insensitive matching
    #[arg(long)]
    pub case_insensitive: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Convert filenames to lowercase
    #[arg(long)]
    pub lowercase: bool,

    /// Convert filenames to uppercase
    #[arg(long)]
    pub uppercase: bool,

    /// Replace spaces with dashes
    #[arg(long)]
    pub spaces_to_dash: bool,

    /// Replace spaces with underscores
    #[arg(long)]
    pub spaces_to_underscore: bool,

    /// Remove all spaces
    #[arg(long)]
    pub remove_spaces: bool,

    /// Add a prefix to each filename
    #[arg(long, value_name = "TEXT")]
    pub add_prefix: Option<String>,

    /// Add a suffix before the extension
    #[arg(long, value_name = "TEXT")]
    pub add_suffix: Option<String>,

    /// Prefix files with sequential numbers (001, 002, ...)
    #[arg(long)]
    pub number: bool,
}

impl Args {
    /// Resolve the active rename mode from the parsed flags.
    ///
    /// Built-in modes take priority over pattern mode, checked in a fixed
    /// order: lowercase, uppercase, spaces-to-dash, spaces-to-underscore,
    /// remove-spaces, add-prefix, add-suffix, number. Prefix and suffix
    /// modes are only active when their text is non-empty. Returns `None`
    /// when no mode is selected.
    pub fn rename_mode(&self) -> Option<RenameMode> {
        if self.lowercase {
            return Some(RenameMode::Lowercase);
        }
        if self.uppercase {
            return Some(RenameMode::Uppercase);
        }
        if self.spaces_to_dash {
            return Some(RenameMode::SpacesToDash);
        }
        if self.spaces_to_underscore {
            return Some(RenameMode::SpacesToUnderscore);
        }
        if self.remove_spaces {
            return Some(RenameMode::RemoveSpaces);
        }
        if let Some(text) = self.add_prefix.as_deref() {
            if !text.is_empty() {
                return Some(RenameMode::AddPrefix(text.to_string()));
            }
        }
        if let Some(text) = self.add_suffix.as_deref() {
            if !text.is_empty() {
                return Some(RenameMode::AddSuffix(text.to_string()));
            }
        }
        if self.number {
            return Some(RenameMode::Number);
        }

        match (self.pattern.as_deref(), self.replacement.as_deref()) {
            (Some(pattern), Some(replacement)) => Some(RenameMode::Pattern(PatternSpec {
                pattern: pattern.to_string(),
                replacement: replacement.to_string(),
                use_regex: self.regex,
                case_insensitive: self.case_insensitive,
            })),
            _ => None,
        }
    }
}
