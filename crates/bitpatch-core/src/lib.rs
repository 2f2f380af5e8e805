pub mod error;
pub mod matcher;
pub mod operations;
pub mod rules;
pub mod types;

pub use error::PatchError;
pub use operations::{apply_patches, patch_content};
pub use types::{
    Edit, FileKind, Outcome, PatchReport, PatchRule, Patched, RuleReport, CONVERT_SCRIPT_NAME,
    SETUP_SCRIPT_NAME,
};
