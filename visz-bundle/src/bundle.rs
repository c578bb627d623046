use std::collections::BTreeMap;

/// Everything decoded from one `.visz` archive.
///
/// Text sections are stored as lines. `config` is required for assembly; `tls_key` and
/// `cert_bundle` are only required when the config references them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBundle {
    pub config: Option<Vec<String>>,
    pub tls_key: Option<Vec<String>>,
    pub cert_bundle: Option<CertBundle>,
    /// Members with an unrecognised extension, keyed by file name.
    pub extras: BTreeMap<String, Vec<u8>>,
}

/// PEM text extracted from a PKCS#12 store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertBundle {
    /// Unencrypted PKCS#8 private key.
    pub key: Vec<String>,
    /// Leaf (client) certificate.
    pub cert: Vec<String>,
    /// Every other certificate in the store, concatenated in store order.
    pub ca: Vec<String>,
}

impl CertBundle {
    /// Inline block name and lines, in output order.
    pub fn sections(&self) -> [(&'static str, &[String]); 3] {
        [
            ("key", self.key.as_slice()),
            ("cert", self.cert.as_slice()),
            ("ca", self.ca.as_slice()),
        ]
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
