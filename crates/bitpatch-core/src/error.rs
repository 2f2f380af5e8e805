use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Unknown file to patch: {name:?}")]
    UnsupportedFile { name: String },

    #[error("Could not find {anchor:?} required by the {rule} patch")]
    MissingAnchor {
        rule: &'static str,
        anchor: &'static str,
    },

    #[error("Failed to read file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
