//! CLI tests for the devkit binary.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run devkit with optional stdin and capture output.
fn run_devkit(args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_devkit"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("DEVKIT_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute devkit");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for devkit");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

// ============================================================================
// Curl Tests
// ============================================================================

#[test]
fn curl_rewrite_from_argument() {
    let (stdout, _stderr, code) = run_devkit(
        &[
            "curl",
            "rewrite",
            r#"curl "https://example.com/api/data" -H "User-Agent: X" -d "a=1""#,
            "--to",
            "http://127.0.0.1:6000",
            "--disable-header",
            "User-Agent",
        ],
        None,
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "curl \"http://127.0.0.1:6000\" \\\n  -d \"a=1\"\n");
}

#[test]
fn curl_rewrite_from_stdin_minimize() {
    let (stdout, _stderr, code) = run_devkit(
        &["curl", "rewrite", "--minimize"],
        Some("curl 'https://x.test' \\\n  -H 'accept: */*' \\\n  --compressed\n"),
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "curl 'https://x.test'\n");
}

#[test]
fn curl_inspect_prints_request() {
    let (stdout, _stderr, code) = run_devkit(
        &["curl", "inspect", "curl -X PATCH https://x.test -H 'A: b'"],
        None,
    );

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["method"], "PATCH");
    assert_eq!(value["url"], "https://x.test");
    assert_eq!(value["headers"][0][0], "A");
    assert_eq!(value["headers"][0][1], "b");
}

#[test]
fn curl_inspect_rejects_non_curl() {
    let (_stdout, stderr, code) = run_devkit(&["curl", "inspect", "wget https://x.test"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a curl command"));
}

// ============================================================================
// JSON Tests
// ============================================================================

#[test]
fn json_format_with_flags() {
    let (stdout, _stderr, code) = run_devkit(
        &["json", "format", "--indent", "2", "--sort-keys"],
        Some(r#"{"b": 1, "a": [true]}"#),
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "{\n  \"a\": [\n    true\n  ],\n  \"b\": 1\n}\n");
}

#[test]
fn json_format_invalid_input() {
    let (_stdout, stderr, code) = run_devkit(&["json", "format"], Some("{oops"));
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid JSON"));
}

#[test]
fn json_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"rows": [{"n": "b", "v": 2}, {"n": "a", "v": "x"}, {"n": "c", "v": 4}]}"#,
    )
    .unwrap();

    let (stdout, _stderr, code) = run_devkit(
        &[
            "json",
            "extract",
            path.to_str().unwrap(),
            "--path",
            "$.rows",
            "--order-by",
            "n",
            "--direction",
            "desc",
            "--sum",
            "v",
        ],
        None,
    );

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["kind"], "array_of_records");
    assert_eq!(value["available_keys"], serde_json::json!(["n", "v"]));
    assert_eq!(value["view"][0]["n"], "c");
    assert_eq!(value["view"][2]["n"], "a");
    assert_eq!(value["aggregate"]["v"]["count"], 2);
    assert_eq!(value["aggregate"]["v"]["sum"], 6.0);
}

#[test]
fn json_extract_unknown_sort_key() {
    let (_stdout, stderr, code) = run_devkit(
        &["json", "extract", "--order-by", "zzz"],
        Some(r#"[{"a": 1}]"#),
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("not in available keys"));
}

// ============================================================================
// Prompt and Config Tests
// ============================================================================

#[test]
fn prompt_renders_fields() {
    let (stdout, _stderr, code) = run_devkit(
        &["prompt", "--route", "/api/v1/items", "--request-struct", "ItemsReq"],
        None,
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("- Route: /api/v1/items"));
    assert!(stdout.contains("- Request struct: ItemsReq"));
}

#[test]
fn example_config_is_valid() {
    let (stdout, _stderr, code) = run_devkit(&["--example-config"], None);
    assert_eq!(code, 0);

    let config = devkit_transform::DevkitConfig::from_yaml(&stdout).unwrap();
    assert_eq!(config.curl.url_to, "http://127.0.0.1:6000");
    assert!(config.curl.is_header_disabled("User-Agent"));
}

#[test]
fn config_file_applies_to_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devkit.yaml");
    std::fs::write(&path, "curl:\n  new_token: \"abc\"\n").unwrap();

    let (stdout, _stderr, code) = run_devkit(
        &[
            "--config",
            path.to_str().unwrap(),
            "curl",
            "rewrite",
            "curl https://x.test",
        ],
        None,
    );
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "curl https://x.test \\\n  -H \"Authorization: Bearer abc\"\n"
    );
}
