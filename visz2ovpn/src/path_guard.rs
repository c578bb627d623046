use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write the generated config over the `.visz` archive it came from.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    let out_norm = normalize_for_compare(output)
        .with_context(|| format!("failed to normalize output path {}", output.display()))?;
    let in_norm = normalize_for_compare(input)
        .with_context(|| format!("failed to normalize input path {}", input.display()))?;

    if out_norm == in_norm {
        bail!(
            "refusing to overwrite source archive: output {} matches input {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

fn normalize_for_compare(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // The output usually does not exist yet; resolve its directory instead.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("current_dir")?,
    };
    let parent = if parent.exists() {
        parent
            .canonicalize()
            .with_context(|| format!("canonicalize {}", parent.display()))?
    } else {
        parent
    };

    Ok(match path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    })
}
