/// How an archive member is decoded, keyed off its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// OpenVPN client configuration text (`.conf`).
    Config,
    /// Static key used by the `tls-crypt` directive (`.key`).
    TlsKey,
    /// PKCS#12 container holding the client key and certificates (`.p12`).
    CertStore,
    /// Anything else; kept verbatim but never inlined.
    Opaque,
}

const KNOWN_EXTENSIONS: &[(&str, MemberKind)] = &[
    ("conf", MemberKind::Config),
    ("key", MemberKind::TlsKey),
    ("p12", MemberKind::CertStore),
];

impl MemberKind {
    /// Look up an extension in the supported vocabulary. Matching is exact.
    pub fn from_extension(ext: &str) -> Self {
        KNOWN_EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, kind)| *kind)
            .unwrap_or(MemberKind::Opaque)
    }
}

/// Split a file name on its last `.` into `(stem, extension)`.
///
/// Returns `None` when the name has no `.` at all. A leading dot counts, so
/// `.visz` splits into an empty stem and `visz`.
pub fn split_extension(file_name: &str) -> Option<(&str, &str)> {
    file_name.rsplit_once('.')
}
