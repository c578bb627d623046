use super::*;
use pretty_assertions::assert_eq;

const PROVENANCE: &str = "#-- Converted from OPNsense Viscosity export by visz2ovpn --#";

#[test]
fn converts_fixture_next_to_input_by_default() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("vpn-client.visz");
    fs::copy(fixture("fixtures/vpn-client.visz"), &input).expect("copy fixture");
    let expected_output = dir.path().join("vpn-client.ovpn");

    visz2ovpn()
        .arg("--input")
        .arg(path_as_str(&input))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "New config written:  {}",
            expected_output.display()
        )));

    let lines = read_lines(&expected_output);
    assert_eq!(lines[0], PROVENANCE);
    assert!(!lines.iter().any(|line| line.contains("Config Auto Generated for Viscosity")));
    assert!(!lines.iter().any(|line| line.starts_with("pkcs12 ")));
    assert!(!lines.iter().any(|line| line.starts_with("tls-crypt ")));

    let tags: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|line| line.starts_with('<'))
        .collect();
    assert_eq!(
        tags,
        vec![
            "<key>",
            "</key>",
            "<cert>",
            "</cert>",
            "<ca>",
            "</ca>",
            "<tls-crypt>",
            "</tls-crypt>",
        ]
    );

    let ca_start = lines.iter().position(|line| line == "<ca>").expect("ca block");
    let ca_end = lines.iter().position(|line| line == "</ca>").expect("ca end");
    assert_eq!(
        lines[ca_start + 1..ca_end].to_vec(),
        read_lines(&fixture("fixtures/ca.crt"))
    );

    let key_start = lines.iter().position(|line| line == "<tls-crypt>").expect("tls-crypt");
    let key_end = lines.iter().position(|line| line == "</tls-crypt>").expect("tls-crypt end");
    assert_eq!(
        lines[key_start + 1..key_end].to_vec(),
        read_lines(&fixture("fixtures/bundle/vpn-client/ta.key"))
    );

    let tail: Vec<&str> = lines[key_end + 1..].iter().map(String::as_str).collect();
    assert_eq!(tail, vec!["remote-cert-tls server", "explicit-exit-notify"]);
}

#[test]
fn tls_crypt_scenario_keeps_order() {
    let dir = tempdir().expect("tempdir");
    let input = write_visz(
        dir.path(),
        "bar.visz",
        &[
            ("export/client.conf", &b"tls-crypt ta.key\ndev tun\nnobind\n"[..]),
            ("export/ta.key", &b"ABCDEF\n"[..]),
        ],
    );

    visz2ovpn()
        .arg("--input")
        .arg(path_as_str(&input))
        .assert()
        .success();

    assert_eq!(
        read_lines(&dir.path().join("bar.ovpn")),
        vec![PROVENANCE, "<tls-crypt>", "ABCDEF", "</tls-crypt>", "dev tun", "nobind"]
    );
}

#[test]
fn explicit_output_overwrites_existing_file() {
    let dir = tempdir().expect("tempdir");
    let input = write_visz(
        dir.path(),
        "site.visz",
        &[("export/client.conf", &b"client\n"[..])],
    );
    let output = dir.path().join("custom").join("office.ovpn");
    fs::create_dir_all(output.parent().expect("parent")).expect("mkdir");
    fs::write(&output, "stale contents\n").expect("seed output");

    visz2ovpn()
        .arg("--input")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stdout(predicate::str::contains("office.ovpn"));

    assert_eq!(
        fs::read_to_string(&output).expect("output"),
        format!("{PROVENANCE}\nclient\n")
    );
    assert!(!dir.path().join("site.ovpn").exists());
}

#[test]
fn uncompressed_archive_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let mut builder = Builder::new(Vec::new());
    let config = b"dev tun\n";
    let mut header = Header::new_gnu();
    header.set_size(config.len() as u64);
    header.set_mode(0o644);
    builder
        .append_data(&mut header, "export/client.conf", &config[..])
        .expect("append");
    let input = dir.path().join("plain.visz");
    fs::write(&input, builder.into_inner().expect("tar")).expect("write");

    visz2ovpn()
        .arg("--input")
        .arg(path_as_str(&input))
        .assert()
        .success();

    assert_eq!(
        read_lines(&dir.path().join("plain.ovpn")),
        vec![PROVENANCE, "dev tun"]
    );
}

#[test]
fn every_extra_certificate_lands_in_ca_block() {
    let dir = tempdir().expect("tempdir");
    let store = fs::read(fixture("fixtures/client-chain.p12")).expect("read store");
    let input = write_visz(
        dir.path(),
        "chain.visz",
        &[
            ("chain/client.conf", &b"client\npkcs12 client.p12\n"[..]),
            ("chain/client.p12", &store[..]),
        ],
    );

    visz2ovpn()
        .arg("--input")
        .arg(path_as_str(&input))
        .assert()
        .success();

    let lines = read_lines(&dir.path().join("chain.ovpn"));
    let ca_start = lines.iter().position(|line| line == "<ca>").expect("ca block");
    let ca_end = lines.iter().position(|line| line == "</ca>").expect("ca end");
    let mut expected = read_lines(&fixture("fixtures/chain-intermediate.crt"));
    expected.extend(read_lines(&fixture("fixtures/chain-root.crt")));
    assert_eq!(lines[ca_start + 1..ca_end].to_vec(), expected);
}
