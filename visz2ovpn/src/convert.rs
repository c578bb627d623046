//! The `.visz` → `.ovpn` conversion run behind the command line.
//!
//! 1. **Classify** the input name; anything but `.visz` is reported and skipped
//! 2. **Resolve** the output path and make sure it is not the input archive
//! 3. **Read** the archive members and decode the PKCS#12 store
//! 4. **Assemble** the inline config
//! 5. **Write** the result, replacing any existing file

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use visz2ovpn::directives::builtin_directives;
use visz2ovpn::naming::{classify_input, derive_output_path, unsupported_message, InputKind};
use visz_bundle::{assemble, read_bundle, render};

use crate::cli::Cli;
use crate::path_guard::ensure_output_not_input;

/// How a run ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// The input was not a `.visz` bundle; nothing was written.
    Unsupported,
}

/// Execute one conversion.
///
/// # Errors
///
/// Returns error if:
/// - The input file name has no extension
/// - The output path resolves to the input archive
/// - The archive cannot be read or decoded
/// - The config references a section the archive does not carry
/// - The output file cannot be written
pub fn run_convert(args: Cli) -> Result<Outcome> {
    let stem = match classify_input(&args.input)? {
        InputKind::Visz { stem } => stem,
        InputKind::Unsupported { extension } => {
            println!("{}", unsupported_message(&extension));
            return Ok(Outcome::Unsupported);
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| derive_output_path(&args.input, &stem));
    ensure_output_not_input(&output, &args.input)?;

    let bundle = read_bundle(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        "decoded {}: tls-crypt key={} certificate store={} other members={}",
        args.input.display(),
        bundle.tls_key.is_some(),
        bundle.cert_bundle.is_some(),
        bundle.extras.len()
    );

    let directives = builtin_directives()?;
    let lines = assemble(&bundle, &directives)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    fs::write(&output, render(&lines))
        .with_context(|| format!("failed to write output config {}", output.display()))?;
    println!("New config written:  {}", output.display());

    Ok(Outcome::Written(output))
}
