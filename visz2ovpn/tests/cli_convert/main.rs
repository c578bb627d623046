use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tar::{Builder, Header};
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

fn visz2ovpn() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("visz2ovpn"))
}

/// Write a gzip-compressed `.visz` with the given members under `dir`.
fn write_visz(dir: &Path, file_name: &str, members: &[(&str, &[u8])]) -> PathBuf {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data) in members {
        let mut header = Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, path, *data)
            .expect("append member");
    }
    let mut encoder = builder.into_inner().expect("finish tar");
    encoder.flush().expect("flush gzip");
    let bytes = encoder.finish().expect("finish gzip");

    let path = dir.join(file_name);
    fs::write(&path, bytes).expect("write visz");
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("output should be readable")
        .lines()
        .map(str::to_string)
        .collect()
}

mod basics;
