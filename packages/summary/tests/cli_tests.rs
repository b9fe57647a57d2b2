//! End-to-end tests of the `github-summary` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summary_cmd() -> Command {
    Command::cargo_bin("github-summary").unwrap_or_else(|e| panic!("binary not built: {e}"))
}

fn write_config(dir: &Path, config: &serde_json::Value) -> String {
    let path = dir.join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path.display().to_string()
}

#[test]
fn test_help_lists_options() {
    summary_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--intervall"))
        .stdout(predicate::str::contains("--endtime"))
        .stdout(predicate::str::contains("--example"));
}

#[test]
fn test_missing_user_is_usage_error() {
    summary_cmd().assert().failure();
}

#[test]
fn test_example_writes_tex_next_to_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json").display().to_string();

    summary_cmd()
        .args(["--example", "--tex", "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated.tex"));

    let tex = fs::read_to_string(dir.path().join("generated.tex")).unwrap();
    assert!(tex.contains(r"\title{Project overview of test 2020-01-09 - 2021-06-08}"));
    assert!(tex.contains(r"\section{test-project}"));
    assert!(tex.contains(r"\caption{Language distribution}"));
}

#[test]
fn test_config_path_prefix() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), &json!({"debug": true, "path": "reports/"}));

    summary_cmd()
        .args(["--example", "--tex", "-c", &config])
        .assert()
        .success();

    assert!(dir.path().join("reports/generated.tex").exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    summary_cmd()
        .args(["--example", "--tex", "--config", &path.display().to_string()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_invalid_username_fails_before_network() {
    let dir = tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &json!({"api_url": "http://127.0.0.1:9/", "timeout_secs": 1}),
    );

    summary_cmd()
        .args(["octo_cat", "--tex", "--config", &config])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid GitHub username"));

    assert!(!dir.path().join("generated.tex").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_renders_report_from_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "html_url": "https://github.com/octocat",
            "name": null,
            "followers": 20,
            "following": 0,
            "created_at": "2011-01-25T18:44:36Z",
            "public_repos": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "spoon_knife",
            "html_url": "https://github.com/octocat/spoon_knife",
            "description": "This repo is for demonstration purposes only.",
            "fork": false,
            "languages_url": format!("{}/repos/octocat/spoon_knife/languages", server.uri()),
            "size": 2,
            "license": null,
            "forks_count": 1200,
            "stargazers_count": 12000,
            "watchers_count": 12000,
            "created_at": "2020-01-27T19:44:10Z",
            "updated_at": "2020-06-10T08:00:00Z"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/spoon_knife/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"HTML": 1000, "CSS": 200})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/gists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), &json!({"api_url": format!("{}/", server.uri())}));

    // 2020-06-15T00:00:00Z, a yearly window of 2020 - 2021
    let output = tokio::task::spawn_blocking(move || {
        summary_cmd()
            .args(["octocat", "--endtime", "1592179200", "--tex", "--config", &config])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tex = fs::read_to_string(dir.path().join("generated.tex")).unwrap();
    assert!(tex.contains(r"\title{Project overview of octocat 2020 - 2021}"));
    assert!(tex.contains("octocat created or contributed to 2 projects between 2020 and 2021."));
    assert!(tex.contains(r"\section{spoon\_knife}"));
    assert!(tex.contains(r"\faStar~12.00k"));
    assert!(tex.contains(r"\textbf{HTML}"));
    assert!(tex.contains(r"\item HTML \hfill 1000.00B"));
    assert!(!tex.contains(r"\section{Gists}"));
}
