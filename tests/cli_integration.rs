use std::process::Command;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_polyline").to_string()
}

#[test]
fn cli_encode_decode_roundtrip() {
    let dir = tempdir().unwrap();
    let coords = dir.path().join("track.txt");
    let encoded = dir.path().join("track.polyline");
    let decoded = dir.path().join("decoded.txt");

    std::fs::write(&coords, "# worked example\n38.5,-120.2\n40.7,-120.95\n43.252,-126.453\n")
        .unwrap();

    let st = Command::new(bin())
        .arg("--force")
        .arg("encode")
        .arg(&coords)
        .arg(&encoded)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read_to_string(&encoded).unwrap(),
        "_p~iF~ps|U_ulLnnqC_mqNvxq`@\n"
    );

    let st = Command::new(bin())
        .arg("--force")
        .args(["decode", "--strict"])
        .arg(&encoded)
        .arg(&decoded)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read_to_string(&decoded).unwrap(),
        "38.5,-120.2\n40.7,-120.95\n43.252,-126.453\n"
    );
}

#[test]
fn cli_decode_json_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.polyline");
    std::fs::write(&input, "??\n_p~iF~ps|U\n").unwrap();

    let out = Command::new(bin())
        .args(["decode", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "[[[0.0,0.0]],[[38.5,-120.2]]]\n"
    );
}

#[test]
fn cli_strict_decode_fails_on_truncation() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.polyline");
    std::fs::write(&input, "_p~iF~ps|U_ulL\n").unwrap();

    let st = Command::new(bin())
        .args(["decode", "--strict", "--check-only"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(!st.success());

    let st = Command::new(bin())
        .args(["decode", "--check-only"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(st.success());
}

#[test]
fn cli_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.polyline");
    std::fs::write(&input, "0,0\n").unwrap();
    std::fs::write(&output, "keep").unwrap();

    let st = Command::new(bin())
        .arg("encode")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep");
}

#[test]
fn cli_empty_decode_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.polyline");
    std::fs::write(&input, "\n").unwrap();

    let st = Command::new(bin())
        .args(["decode", "--check-only"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(!st.success());
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
}

#[test]
fn cli_decode_error_names_physical_line() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("gaps.polyline");
    std::fs::write(&input, "??\n\n_p~iF~ps|U_ulL\n").unwrap();

    let out = Command::new(bin())
        .args(["decode", "--strict", "--check-only"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("line 3:"), "stderr: {stderr}");
}

#[test]
fn cli_config_json() {
    let out = Command::new(bin())
        .args(["--json", "config"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(v["char_min"], 63);
    assert_eq!(v["char_max"], 126);
    assert_eq!(v["max_varint_len"], 13);
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}
