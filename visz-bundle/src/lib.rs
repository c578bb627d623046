//! Primitives for turning a Viscosity `.visz` export bundle into a single-file OpenVPN config.
//!
//! The pipeline is linear: [`archive`] reads the tar members, [`credentials`] turns the
//! PKCS#12 store into PEM text, and [`assemble`] rewrites the config with inline blocks.

pub mod archive;
pub mod assemble;
pub mod bundle;
mod cert_bags;
pub mod credentials;
pub mod member;

pub use archive::{read_bundle, read_bundle_bytes, ArchiveError};
pub use assemble::{assemble, render, AssembleError, Directives};
pub use bundle::{CertBundle, DecodedBundle};
pub use credentials::{decode_cert_store, CredentialError};
pub use member::{split_extension, MemberKind};
