use assert_cmd::Command;
use predicates::prelude::*;

// Helper function to initialize the command to test.
fn reqgather() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_reqgather"));
    cmd.env_remove("REQGATHER_CONFIG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_command() {
    reqgather()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Collects requirements.txt"));
}

#[test]
fn test_version_flag() {
    let version = env!("CARGO_PKG_VERSION");
    let expected = format!("reqgather {}", version);

    reqgather()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_command() {
    reqgather()
        .arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: reqgather"));
}

#[test]
fn test_parse_reports_names_and_kinds() {
    reqgather()
        .args([
            "parse",
            "Requests[socks]>=2.31",
            "git+https://github.com/org/tool.git@v1#egg=MyTool",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("requests"))
        .stdout(predicate::str::contains("mytool"))
        .stdout(predicate::str::contains("vcs"));
}

#[test]
fn test_parse_fails_on_rejected_line() {
    reqgather()
        .args(["parse", "numpy", "-r other.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unsupported option line"))
        .stderr(predicate::str::contains("1 line(s) rejected"));
}

#[test]
fn test_parse_json_envelope() {
    let output = reqgather()
        .args(["parse", "--format", "json", "Alpha==1.0", "# note"])
        .output()
        .expect("run parse");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["command"], "parse");
    assert_eq!(value["ok"], true);
    assert_eq!(value["data"][0]["name"], "alpha");
    assert_eq!(value["data"][1]["outcome"], "skipped");
}

#[test]
fn test_stdout_conflicts_with_check() {
    reqgather()
        .args(["gather", "--stdout", "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_timeout_must_be_positive() {
    reqgather()
        .args(["gather", "--timeout", "0"])
        .assert()
        .failure();
}

#[test]
fn test_completions_bash() {
    reqgather()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reqgather"));
}
