// tests/integration/cli_test.rs

//! End-to-end tests for the command-line operations over document files.

use super::test_helpers::TestContext;
use spineljson::cli::{self, CliCommand};
use spineljson::config::Config;
use spineljson::core::{JsonContainer, SpinelJsonError};
use std::fs;

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn dir_entries(ctx: &TestContext) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(ctx.dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn run(ctx: &TestContext, parts: &[&str]) -> anyhow::Result<String> {
    let cmd = CliCommand::parse(&args(parts))?;
    cli::execute(&cmd, &ctx.config)
}

// ===== Parsing =====

#[test]
fn test_cli_parse_commands() {
    let cmd = CliCommand::parse(&args(&["get", "doc.json", "a.b"])).unwrap();
    assert_eq!(
        cmd,
        CliCommand::Get {
            file: "doc.json".into(),
            path: "a.b".into()
        }
    );

    let cmd = CliCommand::parse(&args(&["SET-CREATE", "doc.json", "a.b", "1"])).unwrap();
    assert!(matches!(cmd, CliCommand::SetCreate { .. }));
    assert_eq!(cmd.file(), "doc.json");
}

#[test]
fn test_cli_parse_errors() {
    let err = CliCommand::parse(&[]).unwrap_err();
    assert!(err.to_string().contains("missing command"));

    let err = CliCommand::parse(&args(&["get", "doc.json"])).unwrap_err();
    assert!(err.to_string().contains("wrong number of arguments"));

    let err = CliCommand::parse(&args(&["frobnicate", "doc.json", "a"])).unwrap_err();
    assert!(err.to_string().contains("unknown command"));
}

// ===== Execution =====

#[test]
fn test_cli_get_and_type() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", r#"{"user":{"tags":["a","b"],"age":41}}"#);

    assert_eq!(run(&ctx, &["get", &file, "user.tags"]).unwrap(), r#"["a","b"]"#);
    assert_eq!(run(&ctx, &["type", &file, "user.tags"]).unwrap(), "array/string");
    assert_eq!(run(&ctx, &["type", &file, "user.age"]).unwrap(), "int");
}

#[test]
fn test_cli_set_writes_file() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", r#"{"arr":[1,2,3]}"#);

    assert_eq!(run(&ctx, &["set", &file, "arr.[]", "4"]).unwrap(), "OK");
    assert_eq!(ctx.read_doc("doc.json"), r#"{"arr":[1,2,3,4]}"#);
    assert_eq!(dir_entries(&ctx), vec!["doc.json".to_string()]);
}

#[test]
fn test_cli_failed_store_leaves_no_temp_file() {
    let ctx = TestContext::new();
    fs::create_dir(ctx.path_of("target")).unwrap();
    let target = ctx.path_of("target");
    let doc = JsonContainer::from_text(r#"{"a":1}"#).unwrap();

    let err = cli::store_document(target.to_str().unwrap(), &doc).unwrap_err();
    assert!(err.to_string().contains("Failed to replace"));
    assert_eq!(dir_entries(&ctx), vec!["target".to_string()]);
}

#[test]
fn test_cli_repeated_stores_use_fresh_temp_files() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", "{}");
    let doc = JsonContainer::from_text(r#"{"a":1}"#).unwrap();

    for _ in 0..3 {
        cli::store_document(&file, &doc).unwrap();
    }
    assert_eq!(ctx.read_doc("doc.json"), r#"{"a":1}"#);
    assert_eq!(dir_entries(&ctx), vec!["doc.json".to_string()]);
}

#[test]
fn test_cli_set_missing_parent_fails_and_leaves_file() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", r#"{"a":{}}"#);

    let err = run(&ctx, &["set", &file, "a.b.c", "1"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SpinelJsonError>(),
        Some(SpinelJsonError::KeyNotFound { .. })
    ));
    assert_eq!(ctx.read_doc("doc.json"), r#"{"a":{}}"#);

    assert_eq!(run(&ctx, &["set-create", &file, "a.b.c", "1"]).unwrap(), "OK");
    assert_eq!(ctx.read_doc("doc.json"), r#"{"a":{"b":{"c":1}}}"#);
}

#[test]
fn test_cli_del() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", r#"[{"id":1},{"id":2}]"#);

    assert_eq!(run(&ctx, &["del", &file, "[0]"]).unwrap(), r#"{"id":1}"#);
    assert_eq!(ctx.read_doc("doc.json"), r#"[{"id":2}]"#);
}

#[test]
fn test_cli_invalid_value() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", "{}");
    let err = run(&ctx, &["set", &file, "a", "{not json"]).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON value"));
}

#[test]
fn test_cli_pretty_output() {
    let mut config = Config::default();
    config.output.pretty = true;
    let ctx = TestContext::with_config(config);
    let file = ctx.write_doc("doc.json", r#"{"a":{"b":1}}"#);
    assert_eq!(run(&ctx, &["get", &file, "a"]).unwrap(), "{\n  \"b\": 1\n}");
}

#[test]
fn test_cli_safety_limits() {
    let mut config = Config::default();
    config.safety.max_path_segments = 2;
    config.safety.max_document_bytes = 16;
    let ctx = TestContext::with_config(config);

    let small = ctx.write_doc("small.json", r#"{"a":{"b":{}}}"#);
    let err = run(&ctx, &["get", &small, "a.b.c"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SpinelJsonError>(),
        Some(SpinelJsonError::PathTooDeep { max: 2, .. })
    ));

    let big = ctx.write_doc("big.json", r#"{"a":"0123456789abcdef"}"#);
    let err = run(&ctx, &["get", &big, "a"]).unwrap_err();
    assert!(err.to_string().contains("max_document_bytes"));
}

#[test]
fn test_cli_null_document_file() {
    let ctx = TestContext::new();
    let file = ctx.write_doc("doc.json", "null");

    let err = run(&ctx, &["get", &file, "a"]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SpinelJsonError>(),
        Some(&SpinelJsonError::NullDocument)
    );

    run(&ctx, &["set-create", &file, "a", "true"]).unwrap();
    assert_eq!(ctx.read_doc("doc.json"), r#"{"a":true}"#);
}

#[test]
fn test_cli_missing_file() {
    let ctx = TestContext::new();
    let missing = ctx.path_of("missing.json");
    let err = run(&ctx, &["get", missing.to_str().unwrap(), "a"]).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
