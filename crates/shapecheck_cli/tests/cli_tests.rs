use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the shapecheck binary
#[allow(deprecated)]
fn shapecheck() -> Command {
    Command::cargo_bin("shapecheck").expect("Failed to find shapecheck binary")
}

fn stdout_json(assert: assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_schema() {
    shapecheck()
        .arg("check")
        .arg(fixture_path("signup.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema definition is valid"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("1.2.0"))
        .stdout(predicate::str::contains("number: 2"));
}

#[test]
fn test_check_toml_schema() {
    shapecheck()
        .arg("check")
        .arg(fixture_path("signup.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("signup_toml"));
}

#[test]
fn test_check_json_schema_open_mode() {
    let value = stdout_json(
        shapecheck()
            .arg("check")
            .arg("--format")
            .arg("json")
            .arg(fixture_path("signup.json"))
            .assert()
            .success(),
    );

    assert_eq!(value["name"], "signup_json");
    assert_eq!(value["valid"], true);
    assert_eq!(value["summary"]["allow_schema_keys_only"], false);
    assert_eq!(value["summary"]["field_count"], 2);
}

#[test]
fn test_check_reports_every_definition_error() {
    shapecheck()
        .arg("check")
        .arg(fixture_path("invalid_schema.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("numRange of field 'age'"))
        .stdout(predicate::str::contains("Invalid date format '%Y-%'"))
        .stdout(predicate::str::contains("Object schema of field 'address'"))
        .stderr(predicate::str::contains("3 definition error(s)"));
}

#[test]
fn test_check_unknown_type() {
    shapecheck()
        .arg("check")
        .arg(fixture_path("malformed.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_missing_file() {
    shapecheck()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schema file"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_passing_document() {
    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.yml"))
        .arg(fixture_path("valid_user.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_failing_document_lists_everything() {
    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.yml"))
        .arg(fixture_path("invalid_user.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("The property email is an invalid email, got bad"))
        .stdout(predicate::str::contains("Array element 1 of tags is invalid"))
        .stdout(predicate::str::contains("The property address requires property city"))
        .stdout(predicate::str::contains(
            "The key street is not a part of the address schema",
        ))
        .stdout(predicate::str::contains(
            "The property nickname is not a part of the object schema",
        ))
        .stdout(predicate::str::contains("minimum number").not())
        .stdout(predicate::str::contains("Validation FAILED"));
}

#[test]
fn test_validate_json_output() {
    let value = stdout_json(
        shapecheck()
            .arg("validate")
            .arg("--format")
            .arg("json")
            .arg(fixture_path("signup.yml"))
            .arg(fixture_path("invalid_user.json"))
            .assert()
            .failure(),
    );

    assert_eq!(value["schema"], "signup");
    assert_eq!(value["passed"], false);
    assert_eq!(value["summary"]["violation_count"], 5);

    let violations = value["documents"][0]["violations"]
        .as_array()
        .expect("violations array");
    let kinds: Vec<&str> = violations
        .iter()
        .map(|v| v["kind"].as_str().expect("kind"))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "invalid_email",
            "invalid_array_element",
            "required_property",
            "key_not_in_schema",
            "unexpected_key",
        ]
    );
    assert_eq!(violations[1]["index"], 1);
    assert_eq!(violations[1]["violations"][0]["kind"], "type_mismatch");
}

#[test]
fn test_validate_multiple_documents_keep_argument_order() {
    let value = stdout_json(
        shapecheck()
            .arg("validate")
            .arg("-f")
            .arg("json")
            .arg(fixture_path("signup.yml"))
            .arg(fixture_path("invalid_user.json"))
            .arg(fixture_path("valid_user.yml"))
            .arg(fixture_path("valid_user.json"))
            .assert()
            .failure(),
    );

    let documents = value["documents"].as_array().expect("documents array");
    let paths: Vec<&str> = documents
        .iter()
        .map(|d| d["path"].as_str().expect("path"))
        .collect();
    assert_eq!(
        paths,
        vec![
            "tests/fixtures/invalid_user.json",
            "tests/fixtures/valid_user.yml",
            "tests/fixtures/valid_user.json",
        ]
    );
    assert_eq!(documents[0]["passed"], false);
    assert_eq!(documents[1]["passed"], true);
    assert_eq!(documents[2]["passed"], true);
    assert_eq!(value["summary"]["failed_count"], 1);
}

#[test]
fn test_validate_open_flag_accepts_extra_keys() {
    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.toml"))
        .arg(fixture_path("extra_keys.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("nickname"));

    shapecheck()
        .arg("validate")
        .arg("--open")
        .arg(fixture_path("signup.toml"))
        .arg(fixture_path("extra_keys.json"))
        .assert()
        .success();
}

#[test]
fn test_validate_open_schema_document() {
    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.json"))
        .arg(fixture_path("extra_keys.json"))
        .assert()
        .success();
}

#[test]
fn test_validate_unreadable_document_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{\"id\": ").unwrap();

    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.yml"))
        .arg(broken.to_str().unwrap())
        .arg(fixture_path("valid_user.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to parse data file"))
        .stdout(predicate::str::contains("PASSED"));
}

#[test]
fn test_validate_missing_schema() {
    shapecheck()
        .arg("validate")
        .arg("nonexistent.yml")
        .arg(fixture_path("valid_user.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_requires_data() {
    shapecheck()
        .arg("validate")
        .arg(fixture_path("signup.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_validate_with_invalid_format() {
    shapecheck()
        .arg("validate")
        .arg("--format")
        .arg("invalid_format")
        .arg(fixture_path("signup.yml"))
        .arg(fixture_path("valid_user.json"))
        .assert()
        .failure();
}

#[test]
fn test_validate_empty_schema_file() {
    let temp_dir = TempDir::new().unwrap();
    let empty_file = temp_dir.path().join("empty.yml");
    fs::write(&empty_file, "").unwrap();

    shapecheck()
        .arg("validate")
        .arg(empty_file.to_str().unwrap())
        .arg(fixture_path("valid_user.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// init command tests
// ============================================================================

#[test]
fn test_init_to_stdout() {
    shapecheck()
        .arg("init")
        .arg(fixture_path("valid_user.json"))
        .arg("--name")
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: users"))
        .stdout(predicate::str::contains("isEmail: true"))
        .stdout(predicate::str::contains("objectSchema"));
}

#[test]
fn test_init_output_validates_its_sample() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("inferred.yml");

    shapecheck()
        .arg("init")
        .arg(fixture_path("valid_user.json"))
        .arg("--output")
        .arg(output_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema written to"));

    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("name: valid_user"));

    shapecheck()
        .arg("validate")
        .arg(output_path.to_str().unwrap())
        .arg(fixture_path("valid_user.json"))
        .assert()
        .success();

    shapecheck()
        .arg("validate")
        .arg(output_path.to_str().unwrap())
        .arg(fixture_path("extra_keys.json"))
        .assert()
        .failure();
}

#[test]
fn test_init_rejects_non_object_sample() {
    let temp_dir = TempDir::new().unwrap();
    let sample = temp_dir.path().join("list.json");
    fs::write(&sample, "[1, 2, 3]").unwrap();

    shapecheck()
        .arg("init")
        .arg(sample.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an object"));
}

// ============================================================================
// General CLI tests
// ============================================================================

#[test]
fn test_cli_help() {
    shapecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_cli_version() {
    shapecheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_help() {
    shapecheck()
        .arg("validate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("format"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let value = stdout_json(
        shapecheck()
            .arg("--verbose")
            .arg("check")
            .arg("--format")
            .arg("json")
            .arg(fixture_path("signup.yml"))
            .assert()
            .success()
            .stderr(predicate::str::contains("Checking schema")),
    );

    assert_eq!(value["valid"], true);
}
