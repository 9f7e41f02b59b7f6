//! Integration tests for stdin->stdout rendering.

use std::io::Write;

use predicates::prelude::*;

use crate::timedline;

#[test]
fn empty_stdin_exits_zero() {
    timedline().arg("%s %i").write_stdin("").assert().success().stdout("");
}

#[test]
fn literal_template_repeats_per_line() {
    timedline()
        .arg("tick")
        .write_stdin("1\n2\n3\n")
        .assert()
        .success()
        .stdout("tick\ntick\ntick\n");
}

#[test]
fn input_echo_keeps_original_lines() {
    timedline()
        .arg("%i")
        .write_stdin("alpha\nbeta\n")
        .assert()
        .success()
        .stdout("alpha\nbeta\n");
}

#[test]
fn unterminated_last_line_gets_no_delimiter() {
    timedline()
        .arg("[%i]")
        .write_stdin("a\nb")
        .assert()
        .success()
        .stdout("[a]\n[b]");
}

#[test]
fn leading_percent_escape() {
    timedline()
        .arg("%%")
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout("%\n");
}

#[test]
fn fused_percent_escape() {
    timedline()
        .arg("100%% %i")
        .write_stdin("done\n")
        .assert()
        .success()
        .stdout("100% done\n");
}

#[test]
fn seconds_prefix() {
    timedline()
        .arg("%s: %i")
        .write_stdin("a\nbb\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{3}: a\n\d+\.\d{3}: bb\n$").unwrap());
}

#[test]
fn space_padded_seconds() {
    timedline()
        .arg("%5s|%i")
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^ {4}\d\.\d{3}\|a\n$").unwrap());
}

#[test]
fn zero_padded_milliseconds() {
    timedline()
        .arg("%08m|%i")
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d{8}\.\d{3}\|a\n$").unwrap());
}

#[test]
fn clock_face() {
    timedline()
        .arg("%t %i")
        .write_stdin("boot\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+:\d{2}:\d{2}\.\d{3} boot\n$").unwrap());
}

#[test]
fn microseconds_have_three_fraction_digits() {
    timedline()
        .arg("%u")
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{3}\n$").unwrap());
}

#[test]
fn non_utf8_input_passes_through() {
    let output = timedline()
        .arg("> %i")
        .write_stdin(b"\xff\xfe\n".to_vec())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"> \xff\xfe\n");
}

#[test]
fn large_input_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..10_000 {
        writeln!(file, "line {i}").unwrap();
    }
    file.flush().unwrap();

    let output = timedline()
        .arg("%u %i")
        .pipe_stdin(file.path())
        .unwrap()
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 10_000);
    assert!(lines[0].ends_with(" line 0"));
    assert!(lines[9_999].ends_with(" line 9999"));
}

#[test]
fn closed_downstream_pipe_exits_zero() {
    use std::process::{Command, Stdio};

    let mut child = Command::new(env!("CARGO_BIN_EXE_timedline"))
        .arg("%s %i")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("TIMEDLINE_LOG")
        .spawn()
        .unwrap();

    // Like `yes | timedline '%s %i' | head -0`: the reader is gone from the start.
    drop(child.stdout.take());
    let mut stdin = child.stdin.take().unwrap();
    for _ in 0..100_000 {
        if stdin.write_all(b"y\n").is_err() {
            break;
        }
    }
    drop(stdin);

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0));
}
