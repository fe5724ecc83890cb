use serde_json::Value;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_curlbot"))
        .args(args)
        .env("RUST_LOG", "curlbot=info")
        .env_remove("LOG_FILE")
        .output()
        .expect("failed to run curlbot binary")
}

#[test]
fn parse_prints_request_as_json() {
    let output = run_cli(&[
        "parse",
        "--json",
        r#"/请求 -H "Content-Type: application/json" -X post -d '{"key": "value"}' https://example.com"#,
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(parsed["url"], "https://example.com");
    assert_eq!(parsed["method"], "POST");
    assert_eq!(parsed["headers"][0]["name"], "Content-Type");
    assert_eq!(parsed["headers"][0]["value"], "application/json");
    assert_eq!(parsed["body"], r#"{"key": "value"}"#);
    assert!(parsed["cookies"].is_null());
}

#[test]
fn parse_prints_a_single_part() {
    let output = run_cli(&[
        "parse",
        "--part",
        "cookie",
        r#"/get https://www.example.com -b "session=abc123; user=john""#,
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "session=abc123; user=john"
    );
}

#[test]
fn parse_errors_fail_the_command() {
    let output = run_cli(&["parse", r#"/get https://example.com -H "X-Foo""#]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("malformed header 'X-Foo'"),
        "unexpected stderr:\n{stderr}"
    );
}
