//! Integration test: the binary replays traces and prints JSON lines.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Scratch directory holding a config that keeps logs out of the user's state dir.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vlist_cli_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    let log = dir.join("vlist.log");
    fs::write(
        dir.join("config.toml"),
        format!("log_file_path = {:?}\n", log.display().to_string()),
    )
    .expect("write config");
    dir
}

fn vlist(dir: &PathBuf) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vlist"));
    cmd.env("VLIST_CONFIG", dir.join("config.toml"))
        .env_remove("VLIST_OVERSCAN")
        .env_remove("VLIST_SETTLE_DELAY_MS");
    cmd
}

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_vlist"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn replay_prints_one_json_line_per_output() {
    let dir = scratch("replay");
    let trace = dir.join("trace.jsonl");
    fs::write(
        &trace,
        concat!(
            "{\"at_ms\":0,\"event\":\"create\",\"item_count\":1000,\"heights\":{\"uniform\":50}}\n",
            "{\"at_ms\":1,\"event\":\"resize\",\"extent\":500}\n",
            "{\"at_ms\":2,\"event\":\"scroll\",\"offset\":2000}\n",
            "{\"at_ms\":16,\"event\":\"frame\"}\n",
            "not json\n",
            "{\"at_ms\":20,\"event\":\"navigate\",\"command\":\"end\"}\n",
        ),
    )
    .expect("write trace");

    let output = vlist(&dir)
        .args(["replay", "--overscan", "2"])
        .arg(&trace)
        .output()
        .expect("Failed to execute binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3]["output"], "range");
    assert_eq!(lines[3]["start"], 38);
    assert_eq!(lines[3]["end"], 52);
    assert_eq!(lines[4]["output"], "navigate");
    assert_eq!(lines[4]["target"], 49_500.0);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 5"), "malformed line should be reported: {stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn replay_of_missing_trace_fails() {
    let dir = scratch("missing");
    let output = vlist(&dir)
        .args(["replay", "/nonexistent/vlist/trace.jsonl"])
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
    let _ = fs::remove_dir_all(&dir);
}
