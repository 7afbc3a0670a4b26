// integration tests for the transform command

use crate::common::*;

const INPUT: &str = "@media (width >= 600px) {\n  a { color: red; }\n}\n";
const EXPECTED: &str = "@media (min-width: 600px) {\n  a { color: red; }\n}\n";
const PLAIN: &str = "@media (min-width: 600px) {}\n";

// ============================================================================
// stdin / stdout
// ============================================================================

#[test]
fn test_transform_stdin_to_stdout() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["transform"], INPUT);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), EXPECTED);
}

#[test]
fn test_transform_dash_reads_stdin() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["transform", "-"], INPUT);

    assert!(output.status.success());
    assert_eq!(stdout(&output), EXPECTED);
}

#[test]
fn test_transform_verbose_reports_location() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["transform", "-v"], INPUT);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("-:1: @media (width >= 600px) -> (min-width: 600px)"));
    assert_eq!(err.matches("(min-width: 600px)").count(), 1);
}

#[test]
fn test_transform_stdin_json_includes_css() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["transform", "--json"], INPUT);

    assert!(output.status.success());
    let json = json_output(&output);
    let file = &json["result"]["files"][0];

    assert_eq!(json["result"]["action"], "transform");
    assert_eq!(json["result"]["changed"], true);
    assert_eq!(file["path"], "-");
    assert_eq!(file["css"], EXPECTED);
    assert_eq!(file["changes"][0]["line"], 1);
    assert_eq!(file["changes"][0]["after"], "(min-width: 600px)");
}

// ============================================================================
// files
// ============================================================================

#[test]
fn test_transform_file_to_stdout_leaves_file() {
    let env = TestEnv::new();
    let path = env.write("a.css", INPUT);

    let output = env.run(&["transform", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), EXPECTED);
    assert_eq!(read(&path), INPUT);
}

#[test]
fn test_transform_output_file() {
    let env = TestEnv::new();
    let input = env.write("a.css", INPUT);
    let target = env.path("out.css");

    let output = env.run(&[
        "transform",
        input.to_str().unwrap(),
        "-o",
        target.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(read(&target), EXPECTED);
    assert_eq!(read(&input), INPUT);
    assert!(stdout(&output).contains("1 rule(s) rewritten"));
}

#[test]
fn test_transform_output_rejects_multiple_inputs() {
    let env = TestEnv::new();
    let a = env.write("a.css", INPUT);
    let b = env.write("b.css", INPUT);

    let output = env.run(&[
        "transform",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        "out.css",
    ]);

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_transform_in_place() {
    let env = TestEnv::new();
    let a = env.write("a.css", INPUT);
    let b = env.write("b.css", PLAIN);

    let output = env.run(&[
        "transform",
        "--in-place",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(read(&a), EXPECTED);
    assert_eq!(read(&b), PLAIN);

    let out = stdout(&output);
    assert!(out.contains("a.css: 1 rule(s) rewritten"));
    assert!(out.contains("b.css: no range syntax"));
}

#[test]
fn test_transform_in_place_json_reports_written_files() {
    let env = TestEnv::new();
    let a = env.write("a.css", INPUT);
    let b = env.write("b.css", PLAIN);

    let output = env.run(&[
        "transform",
        "--in-place",
        "--json",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ]);

    let json = json_output(&output);
    let files = json["result"]["files"].as_array().unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["written_to"], a.to_str().unwrap());
    assert!(files[1].get("written_to").is_none());
    assert!(files[1].get("css").is_none());
}

#[test]
fn test_transform_in_place_rejects_stdin() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(&["transform", "--in-place"], INPUT);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("stdin"));
}

#[test]
fn test_transform_missing_file_is_io_error() {
    let env = TestEnv::new();
    let missing = env.path("missing.css");

    let output = env.run(&["transform", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("failed to read"));
}

// ============================================================================
// check mode
// ============================================================================

#[test]
fn test_transform_check_fails_on_range_syntax() {
    let env = TestEnv::new();
    let path = env.write("a.css", INPUT);

    let output = env.run(&["transform", "--check", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("1 rule(s) would be rewritten"));
    assert_eq!(read(&path), INPUT);
}

#[test]
fn test_transform_check_passes_without_range_syntax() {
    let env = TestEnv::new();
    let path = env.write("a.css", PLAIN);

    let output = env.run(&["transform", "--check", "--quiet", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_transform_check_json() {
    let env = TestEnv::new();
    let path = env.write("a.css", INPUT);

    let output = env.run(&["transform", "--check", "--json", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));

    // a single error response carrying the report
    let json = json_output(&output);
    assert!(json.get("result").is_none());
    assert_eq!(json["error"]["code"], -32002);

    let report = &json["error"]["data"];
    assert_eq!(report["check"], true);
    assert_eq!(report["changed"], true);
    assert_eq!(report["files"][0]["changes"][0]["after"], "(min-width: 600px)");
    assert!(report["files"][0].get("css").is_none());
    assert_eq!(read(&path), INPUT);
}

#[test]
fn test_transform_check_json_passing_is_single_result() {
    let env = TestEnv::new();
    let path = env.write("a.css", PLAIN);

    let output = env.run(&["transform", "--check", "--json", path.to_str().unwrap()]);

    assert!(output.status.success());
    let json = json_output(&output);
    assert!(json.get("error").is_none());
    assert_eq!(json["result"]["changed"], false);
}

// ============================================================================
// options
// ============================================================================

#[test]
fn test_transform_custom_value_from_config() {
    let env = TestEnv::with_config(&serde_json::json!({
        "customValueRegExp": r"/var\(--[a-z]+\)/",
        "useCalc": true,
    }));

    let output = env.run_with_stdin(&["transform"], "@media (width < var(--md)) {}\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "@media (max-width: calc(var(--md) - 0.001px)) {}\n"
    );
}

#[test]
fn test_transform_config_flag_overrides_env() {
    let env = TestEnv::without_config();
    let other = env.write("other.json", r#"{ useCalc: true, customValueRegExp: "/\\$[a-z]+/" }"#);

    let output = env.run_with_stdin(
        &["--config", other.to_str().unwrap(), "transform"],
        "@media (width > $bp) {}\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "@media (min-width: calc($bp + 0.001px)) {}\n");
}
