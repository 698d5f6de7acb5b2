//! CLI integration tests for shkit
//!
//! These run the real binary with a fixed config file so results do not
//! depend on the user's own configuration.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Get a command instance for the shkit binary
fn shkit_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shkit"));
    cmd.env("SHKIT_CONFIG", fixture("default.toml"));
    cmd
}

const IS_NUMERIC: &str = r#"case "$1" in ''|*[!0-9]*) exit 1;; esac"#;

// =============================================================================
// Array Tests
// =============================================================================

#[test]
fn test_array_sort_and_rsort() {
    shkit_cmd()
        .args(["array", "sort", "b", "c", "a"])
        .assert()
        .success()
        .stdout("a\nb\nc\n");

    shkit_cmd()
        .args(["array", "rsort", "b", "c", "a"])
        .assert()
        .success()
        .stdout("c\nb\na\n");
}

#[test]
fn test_array_bsort_is_numeric() {
    shkit_cmd()
        .args(["array", "bsort", "4", "5", "1", "3", "-2"])
        .assert()
        .success()
        .stdout("-2\n1\n3\n4\n5\n");
}

#[test]
fn test_array_bsort_rejects_words() {
    shkit_cmd()
        .args(["array", "bsort", "1", "two"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("two"));
}

#[test]
fn test_array_contains_uses_exit_status() {
    shkit_cmd()
        .args(["array", "contains", "b", "a", "b", "c"])
        .assert()
        .success()
        .stdout("");

    shkit_cmd()
        .args(["array", "contains", "z", "a", "b"])
        .assert()
        .code(1)
        .stdout("")
        .stderr("");
}

#[test]
fn test_array_contains_json_reports_result() {
    shkit_cmd()
        .args(["array", "contains", "--format", "json", "z", "a"])
        .assert()
        .code(1)
        .stdout("{\"result\":false}\n");
}

#[test]
fn test_array_is_empty() {
    shkit_cmd().args(["array", "is-empty"]).assert().success();
    shkit_cmd().args(["array", "is-empty", "x"]).assert().code(1);
}

#[test]
fn test_array_dedupe() {
    shkit_cmd()
        .args(["array", "dedupe", "b", "a", "", "b", "c", "a"])
        .assert()
        .success()
        .stdout("b\na\nc\n");
}

#[test]
fn test_array_missing_arguments_is_usage_error() {
    shkit_cmd()
        .args(["array", "dedupe"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing arguments"));

    shkit_cmd().args(["array", "random"]).assert().code(2);
}

#[test]
fn test_array_join() {
    shkit_cmd()
        .args(["array", "join", ",", "a", "b", "c"])
        .assert()
        .success()
        .stdout("a,b,c\n");

    shkit_cmd()
        .args(["array", "join", ","])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_array_merge_keeps_duplicates() {
    shkit_cmd()
        .args(["array", "merge", "a", "c", "--", "d", "c"])
        .assert()
        .success()
        .stdout("a\nc\nd\nc\n");
}

#[test]
fn test_array_merge_accepts_hyphen_elements() {
    shkit_cmd()
        .args(["array", "merge", "-a", "--", "b"])
        .assert()
        .success()
        .stdout("-a\nb\n");

    shkit_cmd()
        .args(["array", "merge", "--", "x", "-y"])
        .assert()
        .success()
        .stdout("x\n-y\n");
}

#[test]
fn test_array_reverse_from_stdin() {
    shkit_cmd()
        .args(["array", "reverse", "--stdin"])
        .write_stdin("1\n2\n3\n")
        .assert()
        .success()
        .stdout("3\n2\n1\n");
}

#[test]
fn test_array_random_picks_member() {
    let output = shkit_cmd()
        .args(["array", "random", "x", "y", "z"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert!(["x\n", "y\n", "z\n"].contains(&stdout.as_str()));
}

#[test]
fn test_array_json_output() {
    let output = shkit_cmd()
        .args(["array", "sort", "--format", "json", "b", "a"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json, serde_json::json!(["a", "b"]));
}

#[test]
fn test_closed_stdout_exits_quietly() {
    use std::io::{BufRead, BufReader, Write};
    use std::process::{Command, Stdio};

    let mut child = Command::new(assert_cmd::cargo::cargo_bin!("shkit"))
        .env("SHKIT_CONFIG", fixture("default.toml"))
        .args(["array", "sort", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Far more output than a pipe buffer holds
    let input: String = (1..=100_000).map(|n| format!("{}\n", n)).collect();
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    // Like `| head -1`: read one line, then hang up
    let mut first = String::new();
    {
        let stdout = child.stdout.take().unwrap();
        BufReader::new(stdout).read_line(&mut first).unwrap();
    }
    assert_eq!(first, "1\n");

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "status {:?}, stderr: {}", output.status, stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

// =============================================================================
// Collection Tests
// =============================================================================

#[test]
fn test_collection_filter_and_reject() {
    shkit_cmd()
        .args(["collection", "filter", "--expr", IS_NUMERIC])
        .write_stdin("1\n2\n3\na\n")
        .assert()
        .success()
        .stdout("1\n2\n3\n");

    shkit_cmd()
        .args(["collection", "reject", "--expr", IS_NUMERIC])
        .write_stdin("1\n2\n3\na\n")
        .assert()
        .success()
        .stdout("a\n");
}

#[test]
fn test_collection_expression_sees_env_var() {
    shkit_cmd()
        .args(["collection", "filter", "-e", r#"[ "$it" != b ]"#])
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout("a\nc\n");
}

#[test]
fn test_collection_every_and_some() {
    shkit_cmd()
        .args(["collection", "every", "-e", IS_NUMERIC])
        .write_stdin("1\n2\n3\n4\n")
        .assert()
        .success();

    shkit_cmd()
        .args(["collection", "every", "-e", IS_NUMERIC])
        .write_stdin("1\nx\n3\n")
        .assert()
        .code(1)
        .stderr("");

    shkit_cmd()
        .args(["collection", "some", "-e", IS_NUMERIC])
        .write_stdin("a\nb\n3\nc\n")
        .assert()
        .success();

    shkit_cmd()
        .args(["collection", "some", "-e", IS_NUMERIC])
        .write_stdin("a\nb\n")
        .assert()
        .code(1);
}

#[test]
fn test_collection_read_error_prints_nothing() {
    // The second line is not UTF-8; the first already passed the predicate
    shkit_cmd()
        .args(["-f", "json", "collection", "every", "-e", r#"[ -n "$1" ]"#])
        .write_stdin(b"1\n\xff\nx\n".to_vec())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed to read input after 1 lines"));

    shkit_cmd()
        .args(["collection", "filter", "-e", IS_NUMERIC])
        .write_stdin(b"1\n\xff\n2\n".to_vec())
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn test_collection_find_with_command_convention() {
    // `test a = <element>`
    shkit_cmd()
        .args(["collection", "find", "--", "test", "a", "="])
        .write_stdin("1\n2\na\n3\n")
        .assert()
        .success()
        .stdout("a\n");

    shkit_cmd()
        .args(["collection", "find", "--", "test", "a", "="])
        .write_stdin("1\n2\n3\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_collection_map() {
    shkit_cmd()
        .args(["collection", "map", "-e", r#"printf '%s%s\n' "$1" "$1""#])
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("aa\nbb\n");
}

#[test]
fn test_collection_map_aborts_on_failure() {
    shkit_cmd()
        .args(["collection", "map", "-e", r#"[ "$1" != x ] && echo "$1""#])
        .write_stdin("a\nx\nb\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("element 1 ('x')"));
}

#[test]
fn test_collection_each_streams_output_and_stops() {
    shkit_cmd()
        .args(["collection", "each", "-e", r#"[ "$1" != stop ] && echo "item:$1""#])
        .write_stdin("a\nb\nstop\nc\n")
        .assert()
        .code(1)
        .stdout("item:a\nitem:b\n");
}

#[test]
fn test_collection_invoke_passes_all_lines() {
    shkit_cmd()
        .args(["collection", "invoke", "--", "echo"])
        .write_stdin("a\nb\nc\n")
        .assert()
        .success()
        .stdout("a b c\n");
}

#[test]
fn test_collection_reads_input_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lines.txt");
    fs::write(&path, "10\nx\n20\n").unwrap();

    shkit_cmd()
        .args(["collection", "filter", "-e", IS_NUMERIC, "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout("10\n20\n");
}

#[test]
fn test_collection_requires_a_callback() {
    shkit_cmd()
        .args(["collection", "filter"])
        .write_stdin("a\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing callback"));
}

// =============================================================================
// Date Tests
// =============================================================================

#[test]
fn test_date_format_defaults_to_utc() {
    shkit_cmd()
        .args(["date", "format", "1594147080"])
        .assert()
        .success()
        .stdout("2020-07-07 18:38:00\n");

    shkit_cmd()
        .args(["date", "format", "0", "--pattern", "%Y"])
        .assert()
        .success()
        .stdout("1970\n");
}

#[test]
fn test_date_epoch_joins_words() {
    shkit_cmd()
        .args(["date", "epoch", "2020-07-07", "18:38"])
        .assert()
        .success()
        .stdout("1594147080\n");
}

#[test]
fn test_date_epoch_rejects_garbage() {
    shkit_cmd()
        .args(["date", "epoch", "not-a-date"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized datetime"));
}

#[test]
fn test_date_add_and_sub() {
    shkit_cmd()
        .args(["date", "add", "days", "1", "--to", "1594147080"])
        .assert()
        .success()
        .stdout("1594233480\n");

    shkit_cmd()
        .args(["date", "add", "day", "-1", "--to", "100"])
        .assert()
        .success()
        .stdout("-86300\n");

    // 2020-03-31 minus one month clamps to 2020-02-29
    shkit_cmd()
        .args(["date", "sub", "months", "1", "--from", "1585612800"])
        .assert()
        .success()
        .stdout("1582934400\n");
}

#[test]
fn test_date_add_now_is_close_to_now() {
    let output = shkit_cmd()
        .args(["date", "add", "hours", "1"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let ts: i64 = stdout.trim().parse().unwrap();
    let expected = chrono::Utc::now().timestamp() + 3600;
    assert!((ts - expected).abs() < 60);
}

#[test]
fn test_date_unknown_unit_is_usage_error() {
    shkit_cmd()
        .args(["date", "add", "fortnights", "1"])
        .assert()
        .code(2);
}

#[test]
fn test_date_json_output() {
    shkit_cmd()
        .args(["--format", "json", "date", "epoch", "@42"])
        .assert()
        .success()
        .stdout("{\"result\":42}\n");
}

#[test]
fn test_date_local_uses_tz() {
    shkit_cmd()
        .env("TZ", "America/New_York")
        .args(["date", "format", "1594147080", "--local"])
        .assert()
        .success()
        .stdout("2020-07-07 14:38:00\n");

    shkit_cmd()
        .env("TZ", "America/New_York")
        .args(["date", "epoch", "--local", "2020-07-07 14:38"])
        .assert()
        .success()
        .stdout("1594147080\n");
}

#[test]
fn test_date_local_dst_gap_fails() {
    // Clocks jumped from 02:00 to 03:00 that night
    shkit_cmd()
        .env("TZ", "America/New_York")
        .args(["date", "epoch", "--local", "2021-03-14 02:30"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist in the local time zone"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_path_reports_source() {
    shkit_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default.toml"));
}

#[test]
fn test_config_show() {
    shkit_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# ").and(predicate::str::contains("default.toml")))
        .stdout(predicate::str::contains("[callback]"))
        .stdout(predicate::str::contains("format = \"%F %T\""));

    let output = shkit_cmd()
        .args(["--format", "json", "config", "show"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["source"].as_str().unwrap().ends_with("default.toml"));
    assert_eq!(json["config"]["default_format"], "text");
    assert_eq!(json["config"]["callback"]["var"], "it");
}

#[test]
fn test_local_config_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".shkit.toml"),
        "default_format = \"json\"\n\n[date]\nformat = \"%Y-%m-%d\"\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shkit"));
    cmd.env_remove("SHKIT_CONFIG")
        .current_dir(dir.path())
        .args(["date", "format", "1594147080"])
        .assert()
        .success()
        .stdout("{\"result\":\"2020-07-07\"}\n");
}

#[test]
fn test_config_init_local() {
    let dir = TempDir::new().unwrap();

    shkit_cmd()
        .current_dir(dir.path())
        .args(["config", "init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = fs::read_to_string(dir.path().join(".shkit.toml")).unwrap();
    assert!(written.contains("[callback]"));

    // Refuses to overwrite without --force
    shkit_cmd()
        .current_dir(dir.path())
        .args(["config", "init", "--local"])
        .assert()
        .failure();
}

#[test]
fn test_broken_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "default_format = [").unwrap();

    shkit_cmd()
        .env("SHKIT_CONFIG", &path)
        .args(["date", "now"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_config_init_replaces_broken_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".shkit.toml");
    fs::write(&path, "default_format = [").unwrap();

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shkit"));
    cmd.env_remove("SHKIT_CONFIG")
        .current_dir(dir.path())
        .args(["config", "init", "--local", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[callback]"));

    // A broken $SHKIT_CONFIG does not block init either
    let other = TempDir::new().unwrap();
    let broken = other.path().join("broken.toml");
    fs::write(&broken, "[date\n").unwrap();
    shkit_cmd()
        .env("SHKIT_CONFIG", &broken)
        .current_dir(other.path())
        .args(["config", "init", "--local"])
        .assert()
        .success();
}

#[test]
fn test_verbose_logs_to_stderr() {
    shkit_cmd()
        .args(["--verbose", "array", "merge", "a", "--", "b"])
        .assert()
        .success()
        .stdout("a\nb\n")
        .stderr(predicate::str::contains("[verbose:merge]"));
}

#[test]
fn test_verbose_counts_lines_read() {
    // `some` stops at the first match, so only two lines are read
    shkit_cmd()
        .args(["--verbose", "collection", "some", "-e", IS_NUMERIC])
        .write_stdin("a\n2\nb\nc\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:some] Read 2 lines"));
}
