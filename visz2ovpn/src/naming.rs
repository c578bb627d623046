//! Input file validation and output path derivation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use visz_bundle::split_extension;

/// Extension of the Viscosity export bundles this tool accepts.
pub const INPUT_EXTENSION: &str = "visz";
/// Extension given to derived output files.
pub const OUTPUT_EXTENSION: &str = "ovpn";

/// What the `--input` path names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A `.visz` bundle; `stem` is the file name without the extension.
    Visz { stem: String },
    /// Any other file type.
    Unsupported { extension: String },
}

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("input file name {0} has no extension")]
    NoExtension(String),
}

/// Classify `path` by the extension of its final component.
///
/// Matching is case-sensitive: `export.VISZ` is unsupported.
pub fn classify_input(path: &Path) -> Result<InputKind, NamingError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| NamingError::NoExtension(path.display().to_string()))?;
    let (stem, extension) = split_extension(&file_name)
        .ok_or_else(|| NamingError::NoExtension(file_name.to_string()))?;

    if extension == INPUT_EXTENSION {
        Ok(InputKind::Visz {
            stem: stem.to_string(),
        })
    } else {
        Ok(InputKind::Unsupported {
            extension: extension.to_string(),
        })
    }
}

/// Output path used when `--output` is absent: same directory and base name, `.ovpn`.
pub fn derive_output_path(input: &Path, stem: &str) -> PathBuf {
    let file_name = format!("{stem}.{OUTPUT_EXTENSION}");
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Message printed for inputs that are not `.visz` bundles.
pub fn unsupported_message(extension: &str) -> String {
    format!("{extension} is not a supported file type.")
}
