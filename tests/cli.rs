use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const PAGE: &str = "# tool 1 2026-01-01\n\n## NAME\n\ntool - does things\n";

#[test]
fn stdin_is_converted_to_stdout() {
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.write_stdin(PAGE);
    cmd.assert().success().stdout(
        predicate::str::contains(".do mso man.tmac")
            .and(predicate::str::contains(".TH TOOL 1 2026-01-01"))
            .and(predicate::str::contains(".SH NAME"))
            .and(predicate::str::contains("tool - does things")),
    );
}

#[test]
fn dash_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.args(["-T", "mm", "-"]).write_stdin("plain text\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with(".do mso m.tmac\nplain text\n"));
}

#[test]
fn file_input_writes_output_file() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("tool.md");
    let output = dir.path().join("tool.1");
    fs::write(&input, PAGE).expect("write input");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.arg("-o").arg(&output).arg(&input);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let roff = fs::read_to_string(&output).expect("read output");
    assert!(roff.starts_with(".\\# roff document\n"));
    assert!(roff.contains(".SH NAME\n"));
}

#[test]
fn untitled_file_is_named_after_its_stem() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("notes.md");
    fs::write(&input, "just text\n").expect("write input");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.args(["--date", "2026-03-04"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".TH notes 7 2026-03-04 document"));
}

#[test]
fn mdoc_dialect_is_selected() {
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.args(["-T", "mdoc", "--date", "2026-01-05"])
        .write_stdin("# tool 8\n\n## NAME\n");
    cmd.assert().success().stdout(
        predicate::str::contains(".Dd $Mdocdate: Jan 5 2026 $")
            .and(predicate::str::contains(".Dt TOOL 8"))
            .and(predicate::str::contains(".Sh NAME")),
    );
}

#[test]
fn several_inputs_are_concatenated() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("one.md");
    let second = dir.path().join("two.md");
    fs::write(&first, "first body\n").expect("write first");
    fs::write(&second, "second body\n").expect("write second");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.args(["-T", "mm"]).arg(&first).arg(&second);
    cmd.assert().success().stdout(
        predicate::str::contains("first body\n")
            .and(predicate::str::contains("second body\n"))
            .and(predicate::str::contains(".do mso m.tmac").count(2)),
    );
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("mdroff.yml");
    fs::write(&config, "dialect: ms\nofficial: true\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.arg("-c")
        .arg(&config)
        .write_stdin("## AUTHORS\n\nSomeone\n\n## USAGE\n\nA builtin command.\n");
    cmd.assert().success().stdout(
        predicate::str::contains(".do mso ms.tmac")
            .and(predicate::str::contains("Someone").not())
            .and(predicate::str::contains("A built-in command.")),
    );
}

#[test]
fn command_line_overrides_config() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("mdroff.yml");
    fs::write(&config, "dialect: ms\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.arg("-c")
        .arg(&config)
        .args(["-T", "mm"])
        .write_stdin("text\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".do mso m.tmac"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("mdroff.yml");
    fs::write(&config, "dialect: groff\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.arg("-c").arg(&config).write_stdin("text\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Schema("));
}

#[test]
fn unterminated_code_span_fails() {
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.write_stdin("fine\nthen `broken\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("UnterminatedCodeSpan { line: 2 }"));
}

#[test]
fn unknown_dialect_is_rejected() {
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.args(["-T", "html"]).write_stdin("text\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown dialect"));
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("mdroff");
    cmd.arg(dir.path().join("absent.md"));
    cmd.assert().failure();
}
