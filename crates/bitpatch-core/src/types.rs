use crate::error::PatchError;
use crate::rules::{CONVERT_SCRIPT_RULES, SETUP_SCRIPT_RULES};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONVERT_SCRIPT_NAME: &str = "convert-hf-to-gguf-bitnet.py";
pub const SETUP_SCRIPT_NAME: &str = "setup_env.py";

/// The two scripts this tool knows how to patch, keyed by base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    ConvertScript,
    SetupScript,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self, PatchError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match name.as_str() {
            CONVERT_SCRIPT_NAME => Ok(FileKind::ConvertScript),
            SETUP_SCRIPT_NAME => Ok(FileKind::SetupScript),
            _ => Err(PatchError::UnsupportedFile { name }),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            FileKind::ConvertScript => CONVERT_SCRIPT_NAME,
            FileKind::SetupScript => SETUP_SCRIPT_NAME,
        }
    }

    /// Rules are applied in the order returned.
    pub fn rules(self) -> &'static [PatchRule] {
        match self {
            FileKind::ConvertScript => CONVERT_SCRIPT_RULES,
            FileKind::SetupScript => SETUP_SCRIPT_RULES,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::ConvertScript => f.write_str("conversion script"),
            FileKind::SetupScript => f.write_str("setup script"),
        }
    }
}

/// A literal text transformation. The first field of each variant is the
/// anchor that has to be present for the edit to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Replace {
        target: &'static str,
        replacement: &'static str,
    },
    /// Insert `text` right after `line`, which must form a whole line. When
    /// `within` is set the search starts after its first occurrence.
    InsertAfterLine {
        line: &'static str,
        within: Option<&'static str>,
        text: &'static str,
    },
    InsertAfter {
        anchor: &'static str,
        text: &'static str,
    },
}

impl Edit {
    pub fn anchor(&self) -> &'static str {
        match self {
            Edit::Replace { target, .. } => target,
            Edit::InsertAfterLine { line, .. } => line,
            Edit::InsertAfter { anchor, .. } => anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchRule {
    pub name: &'static str,
    /// Present once the rule has been applied.
    pub marker: &'static str,
    /// Context that must exist before the edit is attempted.
    pub requires: &'static [&'static str],
    pub edit: Edit,
    /// A missing anchor aborts the whole run instead of being skipped.
    pub critical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    AlreadyApplied,
    MissingAnchor { anchor: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub rule: &'static str,
    pub outcome: Outcome,
}

/// In-memory result of running a file kind's rules over some content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: String,
    pub reports: Vec<RuleReport>,
}

impl Patched {
    pub fn changed(&self) -> bool {
        self.reports.iter().any(|r| r.outcome == Outcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub path: PathBuf,
    pub kind: FileKind,
    pub reports: Vec<RuleReport>,
    pub changed: bool,
    pub written: bool,
}
