pub mod file_operations;
pub mod patch_applicator;

pub use patch_applicator::{apply_edit, apply_patches, patch_content};
