//! `.visz` archive reading.
//!
//! A `.visz` file is a tar archive, usually gzip-compressed (bzip2 and xz are also
//! accepted), holding one directory with
//! the OpenVPN config, an optional `tls-crypt` key and an optional PKCS#12 store.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use log::{debug, warn};
use tar::Archive;
use thiserror::Error;
use xz2::read::XzDecoder;

use crate::bundle::{split_lines, DecodedBundle};
use crate::credentials::{decode_cert_store, CredentialError};
use crate::member::{split_extension, MemberKind};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];

/// Errors that can occur while reading a `.visz` archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Failed to read the archive file itself.
    #[error("failed to read archive file")]
    Io(#[from] io::Error),
    /// The bytes are not a readable tar archive, compressed or not.
    #[error("malformed archive")]
    Format(#[source] io::Error),
    /// A member name has no extension or is not valid UTF-8.
    #[error("archive member '{0}' has no usable file extension")]
    FileName(String),
    /// A text member is not valid UTF-8.
    #[error("archive member '{name}' is not valid UTF-8 text")]
    Decoding {
        name: String,
        source: std::string::FromUtf8Error,
    },
    /// The PKCS#12 member could not be decoded.
    #[error("failed to decode archive member '{name}'")]
    Credential {
        name: String,
        source: CredentialError,
    },
}

/// Read and decode the `.visz` archive at `path`.
///
/// The file is loaded into memory in full before decoding.
pub fn read_bundle(path: &Path) -> Result<DecodedBundle, ArchiveError> {
    let bytes = fs::read(path)?;
    read_bundle_bytes(&bytes)
}

/// Decode `.visz` archive bytes. Compression is detected from the magic bytes.
pub fn read_bundle_bytes(bytes: &[u8]) -> Result<DecodedBundle, ArchiveError> {
    if bytes.starts_with(GZIP_MAGIC) {
        debug!("archive is gzip-compressed");
        read_members(Archive::new(GzDecoder::new(bytes)))
    } else if bytes.starts_with(BZIP2_MAGIC) {
        debug!("archive is bzip2-compressed");
        read_members(Archive::new(BzDecoder::new(bytes)))
    } else if bytes.starts_with(XZ_MAGIC) {
        debug!("archive is xz-compressed");
        read_members(Archive::new(XzDecoder::new(bytes)))
    } else {
        read_members(Archive::new(bytes))
    }
}

fn read_members<R: Read>(mut archive: Archive<R>) -> Result<DecodedBundle, ArchiveError> {
    let mut bundle = DecodedBundle::default();

    for entry in archive.entries().map_err(ArchiveError::Format)? {
        let mut entry = entry.map_err(ArchiveError::Format)?;
        let path = entry.path().map_err(ArchiveError::Format)?.into_owned();

        if !entry.header().entry_type().is_file() {
            debug!("skipping non-file member {}", path.display());
            continue;
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ArchiveError::FileName(path.display().to_string()))?
            .to_string();
        let (_, extension) =
            split_extension(&name).ok_or_else(|| ArchiveError::FileName(name.clone()))?;
        let kind = MemberKind::from_extension(extension);

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(ArchiveError::Format)?;
        debug!("member {} ({} bytes) read as {kind:?}", path.display(), content.len());

        match kind {
            MemberKind::Config => {
                let lines = decode_text(&name, content)?;
                warn_if_replaced(bundle.config.replace(lines).is_some(), "config", &name);
            }
            MemberKind::TlsKey => {
                let lines = decode_text(&name, content)?;
                warn_if_replaced(bundle.tls_key.replace(lines).is_some(), "tls-crypt key", &name);
            }
            MemberKind::CertStore => {
                let certs = decode_cert_store(&content, None).map_err(|source| {
                    ArchiveError::Credential {
                        name: name.clone(),
                        source,
                    }
                })?;
                warn_if_replaced(
                    bundle.cert_bundle.replace(certs).is_some(),
                    "certificate store",
                    &name,
                );
            }
            MemberKind::Opaque => {
                bundle.extras.insert(name, content);
            }
        }
    }

    Ok(bundle)
}

fn decode_text(name: &str, content: Vec<u8>) -> Result<Vec<String>, ArchiveError> {
    let text = String::from_utf8(content).map_err(|source| ArchiveError::Decoding {
        name: name.to_string(),
        source,
    })?;
    Ok(split_lines(&text))
}

fn warn_if_replaced(replaced: bool, section: &str, name: &str) {
    if replaced {
        warn!("archive has more than one {section}; using '{name}'");
    }
}
