use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_handoff_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_handoff"))
}

fn run(args: &[&str]) -> Output {
    Command::new(get_handoff_binary())
        .args(args)
        .env_remove("HANDOFF_ITERATIONS")
        .env_remove("HANDOFF_CONVENTIONS")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_selftest_passes_with_defaults() {
    let output = run(&["selftest", "--iterations", "5"]);
    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scalar sum: 1235924 ok"));
    assert!(stdout.contains("convention A"));
    assert!(stdout.contains("convention B"));
    assert!(stdout.contains("convention C"));
}

#[test]
fn test_selftest_json_report() {
    let output = run(&["selftest", "-i", "1", "-c", "b", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["iterations"], 1);
    assert_eq!(report["conventions"].as_array().unwrap().len(), 1);
    assert_eq!(report["conventions"][0]["convention"], "raw-parts");
}

#[test]
fn test_selftest_fails_on_mismatch() {
    let mut cases = tempfile::NamedTempFile::new().unwrap();
    write!(
        cases,
        r#"{{"cases":[{{"input":"Datafuse Lab","expected":"Datafuse"}}]}}"#
    )
    .unwrap();

    let output = run(&[
        "selftest",
        "-i",
        "1",
        "--cases",
        cases.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("convention A"), "{stderr}");
    assert!(stderr.contains("Datafuse Lab"), "{stderr}");
}

#[test]
fn test_sum() {
    let output = run(&["sum", "123", "1234", "1234567"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1235924");
}

#[test]
fn test_transform_each_convention() {
    for kind in ["a", "a-owned", "a-borrowed", "b", "c"] {
        let output = run(&["transform", "-c", kind, "极客幼稚园是一个不错的微信公众号"]);
        assert!(
            output.status.success(),
            "{kind}: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "极客幼稚园");
    }
}
