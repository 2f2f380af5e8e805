use crate::error::PatchError;
use crate::matcher::{find_end_of, find_line, find_literal};
use crate::operations::file_operations::{read_file_content, write_file_content};
use crate::types::{Edit, FileKind, Outcome, PatchReport, PatchRule, Patched, RuleReport};
use log::{debug, info};
use std::path::Path;

/// Patches the file at `path` in place according to its kind.
///
/// The file is written at most once, and only if some rule applied. With
/// `dry_run` the outcome is computed but nothing is written.
pub fn apply_patches(path: &Path, dry_run: bool) -> Result<PatchReport, PatchError> {
    let kind = FileKind::from_path(path)?;
    debug!("Dispatching {:?} as {}", path, kind);

    let original = read_file_content(path)?;
    let patched = patch_content(kind, &original)?;
    let changed = patched.changed();

    let written = changed && !dry_run;
    if written {
        write_file_content(path, &patched.content)?;
        info!("Wrote patched {} to {:?}", kind, path);
    } else if changed {
        info!("Dry run, leaving {:?} untouched", path);
    } else {
        debug!("No rule applied to {:?}, skipping write", path);
    }

    Ok(PatchReport {
        path: path.to_path_buf(),
        kind,
        reports: patched.reports,
        changed,
        written,
    })
}

/// Runs every rule of `kind` over `content` in order.
///
/// A critical rule whose anchor is missing fails the whole call, discarding
/// edits made by earlier rules.
pub fn patch_content(kind: FileKind, content: &str) -> Result<Patched, PatchError> {
    let mut current = content.to_string();
    let mut reports = Vec::with_capacity(kind.rules().len());

    for rule in kind.rules() {
        let outcome = apply_rule(rule, &mut current);
        match outcome {
            Outcome::Applied => info!("Applied {} patch", rule.name),
            Outcome::AlreadyApplied => debug!("{} patch already present", rule.name),
            Outcome::MissingAnchor { anchor } if rule.critical => {
                return Err(PatchError::MissingAnchor {
                    rule: rule.name,
                    anchor,
                });
            }
            Outcome::MissingAnchor { anchor } => {
                debug!("Skipping {} patch, {:?} not found", rule.name, anchor)
            }
        }
        reports.push(RuleReport {
            rule: rule.name,
            outcome,
        });
    }

    Ok(Patched {
        content: current,
        reports,
    })
}

fn apply_rule(rule: &PatchRule, content: &mut String) -> Outcome {
    if content.contains(rule.marker) {
        return Outcome::AlreadyApplied;
    }

    if let Some(&missing) = rule.requires.iter().find(|r| !content.contains(**r)) {
        return Outcome::MissingAnchor { anchor: missing };
    }

    match apply_edit(&rule.edit, content) {
        Some(updated) => {
            *content = updated;
            Outcome::Applied
        }
        None => Outcome::MissingAnchor {
            anchor: rule.edit.anchor(),
        },
    }
}

/// Returns `None` when the edit's anchor cannot be located.
pub fn apply_edit(edit: &Edit, content: &str) -> Option<String> {
    match *edit {
        Edit::Replace {
            target,
            replacement,
        } => {
            let start = find_literal(content, target, 0)?;
            Some(splice(content, start, start + target.len(), replacement))
        }
        Edit::InsertAfterLine { line, within, text } => {
            let from = match within {
                Some(scope) => find_end_of(content, scope)?,
                None => 0,
            };
            let end = find_line(content, line, from)? + line.len();
            Some(splice(content, end, end, text))
        }
        Edit::InsertAfter { anchor, text } => {
            let end = find_end_of(content, anchor)?;
            Some(splice(content, end, end, text))
        }
    }
}

fn splice(content: &str, start: usize, end: usize, insert: &str) -> String {
    let mut out = String::with_capacity(content.len() - (end - start) + insert.len());
    out.push_str(&content[..start]);
    out.push_str(insert);
    out.push_str(&content[end..]);
    out
}
