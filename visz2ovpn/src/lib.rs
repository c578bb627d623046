//! Conversion of OPNsense Viscosity exports into inline OpenVPN client configs.
//!
//! OPNsense's client export can produce a Viscosity bundle (`.visz`): a tar archive with
//! the OpenVPN config, a `tls-crypt` key and a PKCS#12 store. Most OpenVPN clients want a
//! single `.ovpn` file with the key material inline instead. The heavy lifting lives in
//! `visz-bundle`; this crate adds the command-line surface around it.
//!
//! - [`naming`] — input validation and `.ovpn` output path derivation
//! - [`directives`] — the line markers driving the rewrite, read from the bundled TOML
//! - [`exit_status`] — mapping of pipeline errors to process exit codes
//!
//! # Examples
//!
//! ```ignore
//! use std::path::Path;
//! use visz2ovpn::directives::builtin_directives;
//! use visz_bundle::{assemble, read_bundle, render};
//!
//! let bundle = read_bundle(Path::new("vpn-client.visz"))?;
//! let lines = assemble(&bundle, &builtin_directives()?)?;
//! std::fs::write("vpn-client.ovpn", render(&lines))?;
//! ```

pub mod directives;
pub mod exit_status;
pub mod naming;
