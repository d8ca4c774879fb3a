// linktally/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[test]
fn test_help_lists_options() {
    let mut cmd = Command::cargo_bin("linktally").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--threads"));
}

#[test]
fn test_missing_input_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.txt");

    let mut cmd = Command::cargo_bin("linktally").unwrap();
    cmd.arg("-q")
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(&output);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read input file"));
    assert!(!output.exists());
}

#[test]
fn test_zero_threads_exits_non_zero() {
    let mut cmd = Command::cargo_bin("linktally").unwrap();
    cmd.args(["-q", "-t", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--threads must be at least 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_end_to_end_run_writes_results() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(format!(
                    r#"<a href="{uri}/a">a</a><a href="{uri}/b">b</a><a href="https://other.org/">c</a>"#
                )),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("urls.txt");
    let output = dir.path().join("results.txt");
    fs::write(&input, format!("{uri}/\nnot a url\n")).unwrap();

    let mut cmd = Command::cargo_bin("linktally").unwrap();
    cmd.arg("-q").arg("-i").arg(&input).arg("-o").arg(&output);
    cmd.assert().success();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{uri}/ --> 2 internal links"));
    assert!(lines[1].starts_with("not a url --> ERROR: "));
}
