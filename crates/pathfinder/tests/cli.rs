use assert_cmd::prelude::*;

use mockito::{Matcher, Server};
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::io::Write;
use std::process::Command;

/// Helper to create a Command for the `pathfinder` binary pointed at a mock service
fn pathfinder_cmd(api_url: &str, config_home: &tempfile::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("pathfinder").expect("binary exists");
  cmd.env("PATHFINDER_API_URL", api_url);
  cmd.env("XDG_CONFIG_HOME", config_home.path());
  cmd.env_remove("PATHFINDER_TIMEOUT_SECS");
  cmd.env_remove("RUST_LOG");
  cmd.arg("--no-color");
  cmd
}

const TWO_RESULTS: &str = r#"{
  "recommendations": [
    {"title": "Data Intern", "org": "Acme", "location": "Delhi", "skills": "python",
     "score": 0.873, "apply_url": "https://acme.example/apply",
     "match_details": {"exact_skill_matches": 2, "education_match": true, "location_match": true}},
    {"title": "Ops Intern", "org": "Globex", "location": "Mumbai", "skills": "excel",
     "score": 0.52,
     "match_details": {"exact_skill_matches": 0, "partial_skill_matches": 1, "location_match": false}}
  ],
  "metadata": {"algorithm_version": "2.0"}
}"#;

#[test]
#[serial]
fn test_search_renders_classified_results() {
  let mut server = Server::new();
  let mock = server
    .mock("POST", "/api/recommend")
    .match_body(Matcher::PartialJson(serde_json::json!({"location": "Delhi", "top_k": 4})))
    .with_status(200)
    .with_body(TWO_RESULTS)
    .create();
  let home = tempfile::TempDir::new().unwrap();

  pathfinder_cmd(&server.url(), &home)
    .args(["search", "--skills", "python, sql", "--location", "Delhi"])
    .assert()
    .success()
    .stdout(
      contains("Found 1 internship in or near Delhi")
        .and(contains("Perfect Match"))
        .and(contains("Match: 87%"))
        .and(contains("1 related skill"))
        .and(contains("Showing 2 recommendations")),
    );

  mock.assert();
}

#[test]
#[serial]
fn test_search_json_output() {
  let mut server = Server::new();
  let _mock = server.mock("POST", "/api/recommend").with_status(200).with_body(TWO_RESULTS).create();
  let home = tempfile::TempDir::new().unwrap();

  let output = pathfinder_cmd(&server.url(), &home)
    .args(["--format", "json", "search", "--skills", "python", "--location", "Delhi"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(body["classification"]["location_matches"], 1);
  assert_eq!(body["classification"]["banner"]["kind"], "mixed");
  assert_eq!(body["metadata"]["algorithm_version"], "2.0");
}

#[test]
#[serial]
fn test_search_with_no_results_shows_hint() {
  let mut server = Server::new();
  let _mock =
    server.mock("POST", "/api/recommend").with_status(200).with_body(r#"{"recommendations": []}"#).create();
  let home = tempfile::TempDir::new().unwrap();

  pathfinder_cmd(&server.url(), &home)
    .args(["search", "--skills", "python"])
    .assert()
    .success()
    .stdout(contains("No recommendations yet"));
}

#[test]
#[serial]
fn test_service_unavailable_fails_with_hint() {
  let mut server = Server::new();
  let _mock = server.mock("POST", "/api/recommend").with_status(503).create();
  let home = tempfile::TempDir::new().unwrap();

  pathfinder_cmd(&server.url(), &home)
    .args(["search", "--skills", "python"])
    .assert()
    .failure()
    .stderr(contains("temporarily unavailable"));
}

#[test]
#[serial]
fn test_unreachable_service_suggests_starting_backend() {
  let home = tempfile::TempDir::new().unwrap();

  pathfinder_cmd("http://127.0.0.1:1", &home)
    .args(["--timeout", "2", "search", "--skills", "python"])
    .assert()
    .failure()
    .stderr(contains("Unable to connect").and(contains("backend server is running")));
}

#[test]
#[serial]
fn test_interactive_search_reads_answers() {
  let mut server = Server::new();
  let mock = server
    .mock("POST", "/api/recommend")
    .match_body(Matcher::Json(serde_json::json!({
      "education": "PG", "skills": "rust", "location": "remote", "top_k": 4
    })))
    .with_status(200)
    .with_body(r#"{"recommendations": []}"#)
    .create();
  let home = tempfile::TempDir::new().unwrap();

  assert_cmd::Command::cargo_bin("pathfinder")
    .expect("binary exists")
    .env("PATHFINDER_API_URL", server.url())
    .env("XDG_CONFIG_HOME", home.path())
    .args(["--no-color", "search", "--interactive"])
    .write_stdin("pg\nrust\n\n")
    .assert()
    .success();

  mock.assert();
}

#[test]
#[serial]
fn test_config_file_supplies_url() {
  let mut server = Server::new();
  let _mock = server
    .mock("GET", "/")
    .with_status(200)
    .with_body(r#"{"message": "running", "internships_loaded": 5, "status": "healthy"}"#)
    .create();
  let home = tempfile::TempDir::new().unwrap();
  let mut config = tempfile::NamedTempFile::new().unwrap();
  writeln!(config, "api_url: {}\ntimeout_secs: 3", server.url()).unwrap();

  let mut cmd = Command::cargo_bin("pathfinder").expect("binary exists");
  cmd
    .env_remove("PATHFINDER_API_URL")
    .env("XDG_CONFIG_HOME", home.path())
    .args(["--no-color", "--config"])
    .arg(config.path())
    .arg("health")
    .assert()
    .success()
    .stdout(contains("Internships loaded: 5"));
}

#[test]
#[serial]
fn test_invalid_url_is_rejected() {
  let home = tempfile::TempDir::new().unwrap();

  pathfinder_cmd("not a url", &home)
    .args(["health"])
    .assert()
    .failure()
    .stderr(contains("Invalid service URL"));
}
