// integration tests for the query command

use crate::common::*;

#[test]
fn test_query_prints_rewritten_params() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(500px < width <= 1200px)"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "(min-width: 501px) and (max-width: 1200px)\n"
    );
}

#[test]
fn test_query_without_range_echoes_input() {
    let env = TestEnv::new();
    let output = env.run(&["query", "screen and (min-width: 300px)"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "screen and (min-width: 300px)\n");
}

#[test]
fn test_query_json_output() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(width > 300px)", "--json"]);

    assert!(output.status.success());
    let json = json_output(&output);

    assert_eq!(json["jsonrpc"], "2.0");
    assert!(json["id"].is_null());
    assert_eq!(json["result"]["action"], "query");
    assert_eq!(json["result"]["result"], "(min-width: 301px)");
    assert_eq!(json["result"]["skipped"], false);
    assert_eq!(json["result"]["rewrites"][0]["original"], "(width > 300px)");
}

#[test]
fn test_query_json_reports_skipped() {
    let env = TestEnv::new();
    let output = env.run(&["query", "print", "--json"]);

    let json = json_output(&output);
    assert_eq!(json["result"]["skipped"], true);
    assert_eq!(json["result"]["result"], "print");
}

#[test]
fn test_query_quiet_prints_nothing() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(width > 1px)", "--quiet"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_query_verbose_lists_rewrites_on_stderr() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(width > 1px)", "-v"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("(width > 1px) -> (min-width: 2px)"));
    // listed once, not repeated by the log
    assert_eq!(err.matches("(min-width: 2px)").count(), 1);
    assert_eq!(stdout(&output), "(min-width: 2px)\n");
}

#[test]
fn test_query_verbose_logs_resolved_options() {
    let env = TestEnv::new();
    let output = env.run(&[
        "query",
        "(width > $bp)",
        "--custom-value",
        r"/\$[a-z]+/",
        "--use-calc",
        "-v",
    ]);

    assert!(output.status.success());
    assert!(stderr(&output).contains(r"custom values: \$[a-z]+, calc: true"));
}

#[test]
fn test_query_custom_value_flag() {
    let env = TestEnv::new();
    let output = env.run(&[
        "query",
        "(width < var(--bp))",
        "--custom-value",
        r"/var\(--[a-z]+\)/",
        "--use-calc",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "(max-width: calc(var(--bp) - 0.001px))\n"
    );
}

#[test]
fn test_query_uses_config_file() {
    let env = TestEnv::with_config(&serde_json::json!({
        "customValueRegExp": r"/\$[a-z]+/",
    }));
    let output = env.run(&["query", "($small <= width < $large)"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "(min-width: $small) and (max-width: $large - 0.001)\n"
    );
}

#[test]
fn test_query_no_calc_overrides_config() {
    let env = TestEnv::with_config(&serde_json::json!({
        "customValueRegExp": r"/\$[a-z]+/",
        "useCalc": true,
    }));
    let output = env.run(&["query", "(width > $bp)", "--no-calc"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "(min-width: $bp + 0.001)\n");
}

#[test]
fn test_query_invalid_custom_value_is_invalid_args() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(width > 1px)", "--custom-value", "/var(/"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn test_query_invalid_config_pattern_is_config_error() {
    let env = TestEnv::with_config(&serde_json::json!({
        "customValueRegExp": "/x/q",
    }));
    let output = env.run(&["query", "(width > 1px)"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("unsupported flag 'q'"));
}

#[test]
fn test_query_error_as_json() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(width > 1px)", "--custom-value", "//", "--json"]);

    assert_eq!(output.status.code(), Some(3));
    let json = json_output(&output);
    assert_eq!(json["error"]["code"], -32003);
    assert!(json["error"]["message"].as_str().unwrap().contains("empty"));
}

#[test]
fn test_query_missing_explicit_config_fails() {
    let env = TestEnv::without_config();
    let output = env.run(&["query", "(width > 1px)"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("not found"));
}

#[test]
fn test_unknown_feature_warns_with_suggestion() {
    let env = TestEnv::new();
    let output = env.run(&["query", "(widht > 1px)"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "(widht > 1px)\n");
    assert!(stderr(&output).contains("did you mean 'width'?"));
}
