use std::process::{Command, Output};

use serde_json::Value;

fn lakebench(args: &[&str]) -> anyhow::Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_lakebench"))
        .args(args)
        .env_remove("LAKEBENCH_CONFIG")
        .env_remove("LAKEBENCH_DATA__PATH")
        .env("RUST_LOG", "info")
        .output()?;
    Ok(output)
}

#[test]
fn test_run_json_stdout_is_a_single_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().to_string_lossy().into_owned();

    let output = lakebench(&[
        "run",
        "--path",
        &root,
        "--queries",
        "6",
        "--no-log-time",
        "--format",
        "json",
    ])?;

    // No table directories under the root, so Q6 fails to load.
    assert_eq!(output.status.code(), Some(8));

    let stdout = String::from_utf8(output.stdout)?;
    let report: Value = serde_json::from_str(&stdout)?;
    assert_eq!(report["failed"], serde_json::json!([6]));
    assert_eq!(report["records"][0]["outcome"]["status"], "failed");
    assert_eq!(report["records"][0]["outcome"]["kind"], "load");

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Preparing benchmark"), "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "escape codes on a pipe: {stderr}");
    Ok(())
}

#[test]
fn test_list_json_stdout_parses() -> anyhow::Result<()> {
    let output = lakebench(&["list", "--format", "json"])?;

    assert_eq!(output.status.code(), Some(0));
    let listing: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(listing.as_array().map(Vec::len), Some(22));
    Ok(())
}

#[test]
fn test_config_error_in_json_mode_prints_error_body() -> anyhow::Result<()> {
    let output = lakebench(&["run", "--format", "json"])?;

    // No data root configured anywhere.
    assert_eq!(output.status.code(), Some(3));
    let body: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["status"], "error");
    assert_eq!(body["exit_code"], 3);
    Ok(())
}
