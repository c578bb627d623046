//! Process exit codes.
//!
//! Each failure kind gets its own code so scripts can tell a corrupt archive from a
//! passphrase-protected certificate store without parsing stderr. Code 2 is left to clap
//! for usage errors.

use visz_bundle::{ArchiveError, AssembleError, CredentialError};

use crate::naming::NamingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    UnsupportedInput,
    ArchiveFormat,
    FileNameFormat,
    Decoding,
    UnsupportedCredential,
    CredentialParse,
    MissingMaterial,
    MissingSection,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::UnsupportedInput => 3,
            ExitStatus::ArchiveFormat => 4,
            ExitStatus::FileNameFormat => 5,
            ExitStatus::Decoding => 6,
            ExitStatus::UnsupportedCredential => 7,
            ExitStatus::CredentialParse => 8,
            ExitStatus::MissingMaterial => 9,
            ExitStatus::MissingSection => 10,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Pick the exit status for an error by walking its cause chain.
///
/// The first typed pipeline error found decides; anything else (I/O on the output file,
/// path guard refusals) is a generic failure.
pub fn status_for_error(err: &anyhow::Error) -> ExitStatus {
    for cause in err.chain() {
        if let Some(archive) = cause.downcast_ref::<ArchiveError>() {
            return match archive {
                ArchiveError::Io(_) => ExitStatus::Failure,
                ArchiveError::Format(_) => ExitStatus::ArchiveFormat,
                ArchiveError::FileName(_) => ExitStatus::FileNameFormat,
                ArchiveError::Decoding { .. } => ExitStatus::Decoding,
                ArchiveError::Credential { source, .. } => credential_status(source),
            };
        }
        if let Some(credential) = cause.downcast_ref::<CredentialError>() {
            return credential_status(credential);
        }
        if let Some(AssembleError::MissingSection(_)) = cause.downcast_ref::<AssembleError>() {
            return ExitStatus::MissingSection;
        }
        if cause.downcast_ref::<NamingError>().is_some() {
            return ExitStatus::FileNameFormat;
        }
    }
    ExitStatus::Failure
}

fn credential_status(err: &CredentialError) -> ExitStatus {
    match err {
        CredentialError::Unsupported => ExitStatus::UnsupportedCredential,
        CredentialError::Parse(_) => ExitStatus::CredentialParse,
        CredentialError::MissingMaterial(_) => ExitStatus::MissingMaterial,
    }
}
