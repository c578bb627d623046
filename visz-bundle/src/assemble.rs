//! Rewrite a decoded bundle as one OpenVPN config with inline key material.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::bundle::DecodedBundle;

/// Errors that can occur while assembling the inline config.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// A section needed by the config was not found in the archive.
    #[error("archive has no {0} section")]
    MissingSection(&'static str),
}

/// Line markers that drive the rewrite, plus the comment placed at the top of the output.
///
/// Each marker is matched as a plain substring anywhere in a config line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Directives {
    /// Marks the line replaced by a `<tls-crypt>` block.
    pub tls_crypt: String,
    /// Marks the line replaced by `<key>`, `<cert>` and `<ca>` blocks.
    pub pkcs12: String,
    /// Marks the exporter's banner comment, which is dropped.
    pub banner: String,
    /// First line of every generated config.
    pub provenance: String,
}

/// Produce the inline config lines for `bundle`.
///
/// Lines are classified independently, in this order: `tls-crypt` reference, PKCS#12
/// reference, exporter banner, passthrough.
///
/// # Errors
///
/// Returns [`AssembleError::MissingSection`] when the bundle has no config, or when the
/// config references a key or certificate store the bundle does not carry.
pub fn assemble(
    bundle: &DecodedBundle,
    directives: &Directives,
) -> Result<Vec<String>, AssembleError> {
    let config = bundle
        .config
        .as_ref()
        .ok_or(AssembleError::MissingSection("config"))?;

    let mut out = vec![directives.provenance.clone()];

    for line in config {
        if line.contains(directives.tls_crypt.as_str()) {
            let key = bundle
                .tls_key
                .as_ref()
                .ok_or(AssembleError::MissingSection("tls-crypt key"))?;
            debug!("inlining tls-crypt key ({} lines)", key.len());
            push_block(&mut out, "tls-crypt", key);
        } else if line.contains(directives.pkcs12.as_str()) {
            let certs = bundle
                .cert_bundle
                .as_ref()
                .ok_or(AssembleError::MissingSection("certificate store"))?;
            for (name, lines) in certs.sections() {
                debug!("inlining {name} ({} lines)", lines.len());
                push_block(&mut out, name, lines);
            }
        } else if line.contains(directives.banner.as_str()) {
            continue;
        } else {
            out.push(line.clone());
        }
    }

    Ok(out)
}

/// Join assembled lines into file contents terminated by a newline.
pub fn render(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_block(out: &mut Vec<String>, name: &str, lines: &[String]) {
    out.push(format!("<{name}>"));
    out.extend(lines.iter().cloned());
    out.push(format!("</{name}>"));
}
