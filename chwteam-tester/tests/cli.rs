use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "chwteam-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_chwteam-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    assert!(content.contains("greedy"));
}

#[test]
fn cli_sweep_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_chwteam-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--strategies",
            "greedy,random",
            "--gadgets",
            "g1",
            "--seeds",
            "1,2",
            "--iterations",
            "2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CHW Team Draft Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["runs"], 8);
    assert_eq!(report["failures"], 0);
    assert_eq!(report["aggregates"].as_array().map(Vec::len), Some(2));
}

#[test]
fn cli_rejects_unknown_gadget() {
    let exe = env!("CARGO_BIN_EXE_chwteam-tester");
    let output = Command::new(exe)
        .args(["--gadgets", "g7", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown gadget: g7"));
}

#[test]
fn cli_reports_bad_config_path() {
    let exe = env!("CARGO_BIN_EXE_chwteam-tester");
    let output = Command::new(exe)
        .args(["--config", "/nonexistent/chwteam-config.json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}
