use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "visz2ovpn")]
#[command(about = "Convert an OPNsense Viscosity export (.visz) into a single-file OpenVPN config")]
pub struct Cli {
    /// Viscosity export bundle to convert (must end in .visz).
    #[arg(long)]
    pub input: PathBuf,
    /// Output file path. Defaults to the input path with .visz replaced by .ovpn.
    #[arg(long)]
    pub output: Option<PathBuf>,
}
