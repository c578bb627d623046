//! PKCS#12 decoding.
//!
//! OPNsense exports the client identity as a `.p12` store without a passphrase. This
//! module opens it and re-encodes the key and certificates as PEM so they can be inlined
//! into `<key>`, `<cert>` and `<ca>` blocks.

use log::debug;
use p12_keystore::error::Error as KeyStoreError;
use p12_keystore::KeyStore;
use pem::{EncodeConfig, LineEnding, Pem};
use thiserror::Error;

use crate::bundle::{split_lines, CertBundle};
use crate::cert_bags::read_store_bags;

const PRIVATE_KEY_TAG: &str = "PRIVATE KEY";
const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Errors that can occur while decoding a PKCS#12 certificate store.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The store is protected by a passphrase.
    #[error("passphrase-protected certificate stores are not supported")]
    Unsupported,
    /// The store bytes are corrupt or use an unsupported encoding.
    #[error("failed to parse certificate store")]
    Parse(#[source] KeyStoreError),
    /// The store parsed but lacks the client key or the certificate matching it.
    #[error("certificate store has no {0}")]
    MissingMaterial(&'static str),
}

/// Decode a PKCS#12 store into PEM text.
///
/// `passphrase` must be `None`; stores that need one are rejected with
/// [`CredentialError::Unsupported`], as is a store whose MAC does not verify under the
/// empty passphrase.
///
/// # Errors
///
/// Returns [`CredentialError::Parse`] when the bytes are not a readable PKCS#12 store and
/// [`CredentialError::MissingMaterial`] when it lacks the key or its certificate.
///
/// `ca` holds every certificate in the store other than the client's own, in store
/// order.
pub fn decode_cert_store(
    bytes: &[u8],
    passphrase: Option<&str>,
) -> Result<CertBundle, CredentialError> {
    if passphrase.is_some() {
        return Err(CredentialError::Unsupported);
    }

    let store = KeyStore::from_pkcs12(bytes, "").map_err(|err| match err {
        KeyStoreError::MacError(_) => CredentialError::Unsupported,
        other => CredentialError::Parse(other),
    })?;
    let bags = read_store_bags(bytes, "").map_err(CredentialError::Parse)?;

    let Some((alias, key_chain)) = store.private_key_chain() else {
        // A key bag without a matching certificate is dropped by the keystore.
        let missing = if bags.has_key {
            "client certificate"
        } else {
            "private key"
        };
        return Err(CredentialError::MissingMaterial(missing));
    };
    let leaf = key_chain
        .chain()
        .first()
        .ok_or(CredentialError::MissingMaterial("client certificate"))?;

    let mut ca = Vec::new();
    for der in bags.certificates.iter().filter(|der| der.as_slice() != leaf.as_der()) {
        ca.extend(pem_lines(CERTIFICATE_TAG, der));
    }
    debug!(
        "certificate store entry '{alias}': leaf '{}', {} other certificate(s)",
        leaf.subject(),
        bags.certificates.len().saturating_sub(1)
    );

    Ok(CertBundle {
        key: pem_lines(PRIVATE_KEY_TAG, key_chain.key()),
        cert: pem_lines(CERTIFICATE_TAG, leaf.as_der()),
        ca,
    })
}

fn pem_lines(tag: &str, der: &[u8]) -> Vec<String> {
    let block = Pem::new(tag, der);
    let config = EncodeConfig::new().set_line_ending(LineEnding::LF);
    split_lines(&pem::encode_config(&block, config))
}
