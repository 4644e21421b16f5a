#![allow(missing_docs)]

use std::process::Command;

use serde_json::Value;

#[test]
fn coerce_int_map_prints_coerced_values() {
	let json = run_json(&["coerce", r#"{"foo":1,"bar":"2.1","baz":3.4,"zoing":true}"#, "--to", "int-map"]);
	assert_eq!(json, serde_json::json!({"bar": 2, "baz": 3, "foo": 1, "zoing": 1}));
}

#[test]
fn coerce_text_map_of_null_prints_null() {
	let json = run_json(&["coerce", "null", "--to", "text-map"]);
	assert!(json.is_null(), "expected null, got {json}");
}

#[test]
fn coerce_bools_wraps_scalars() {
	let json = run_json(&["coerce", r#""TRUE""#, "--to", "bools"]);
	assert_eq!(json, serde_json::json!([true]));
}

#[test]
fn get_resolves_nested_path_and_coerces() {
	let json = run_json(&["get", r#"{"outer":{"items":[{"n":"1"},{"n":"42"}]}}"#, "outer.items[1].n", "--to", "int"]);
	assert_eq!(json["path"], "outer.items[1].n");
	assert_eq!(json["found"], true);
	assert_eq!(json["kind"], "signed integer");
	assert_eq!(json["value"], 42);
}

#[test]
fn get_reports_missing_path() {
	let json = run_json(&["get", r#"{"a":1}"#, "b"]);
	assert_eq!(json["found"], false);
	assert!(json["value"].is_null());
}

#[test]
fn merge_prefers_later_documents() {
	let json = run_json(&["merge", r#"{"a":1,"b":2}"#, r#"{"b":"two"}"#]);
	assert_eq!(json, serde_json::json!({"a": 1, "b": "two"}));
}

#[test]
fn merge_rejects_non_objects() {
	let output = run(&["merge", r#"{"a":1}"#, "[1]"]);
	assert!(!output.status.success(), "expected failure");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("merge input #1"), "unexpected stderr: {stderr}");
}

#[test]
fn case_prints_snake_case_lines() {
	let output = run(&["case", "fooBarBaz", "FF"]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout), "foo_bar_baz\nff\n");
}

#[test]
fn convert_round_trips_through_msgpack() {
	let hex = run_text(&["convert", r#"{"foo":1}"#, "--to", "msgpack"]);
	assert_eq!(hex, "81a3666f6f01");

	let json = run_json(&["convert", &hex, "--from", "msgpack"]);
	assert_eq!(json, serde_json::json!({"foo": 1}));
}

fn run(args: &[&str]) -> std::process::Output {
	Command::new(env!("CARGO_BIN_EXE_shapecast")).args(args).output().expect("command runs")
}

fn run_text(args: &[&str]) -> String {
	let output = run(args);
	assert!(output.status.success(), "command failed: {}", String::from_utf8_lossy(&output.stderr));
	String::from_utf8(output.stdout).expect("stdout is utf-8").trim().to_owned()
}

fn run_json(args: &[&str]) -> Value {
	serde_json::from_str(&run_text(args)).expect("stdout is valid json")
}
