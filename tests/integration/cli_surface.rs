//! Integration tests for help, usage errors and argument handling.

use predicates::prelude::*;

use crate::timedline;

#[test]
fn short_help_prints_usage_to_stdout() {
    timedline()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: "))
        .stdout(predicate::str::contains(" format\n\n %%: an % character\n"))
        .stderr("");
}

#[test]
fn question_mark_help() {
    timedline()
        .arg("-?")
        .assert()
        .success()
        .stdout(predicate::str::contains(" %t: time in hh:mm:ss.ms format\n"));
}

#[test]
fn long_help_lists_every_escape() {
    let output = timedline().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for escape in ["%%:", "%i:", "%t:", "%s:", "%m:", "%u:", "%nF:"] {
        assert!(stdout.contains(escape), "usage should document {escape}");
    }
}

#[test]
fn no_arguments_prints_usage_to_stderr() {
    timedline()
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage: "));
}

#[test]
fn two_arguments_is_usage_error() {
    timedline()
        .args(["%s", "%i"])
        .write_stdin("a\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage: "));
}

#[test]
fn help_with_extra_argument_is_usage_error() {
    timedline()
        .args(["-h", "%i"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage: "));
}

#[test]
fn hyphen_template_is_a_format() {
    timedline()
        .arg("-%i-")
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout("-a-\n");
}

#[test]
fn double_dash_alone_is_a_literal_format() {
    timedline()
        .arg("--")
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("--\n--\n")
        .stderr("");
}

#[test]
fn double_dash_does_not_hide_an_argument() {
    timedline()
        .args(["--", "%i"])
        .write_stdin("a\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage: "));
}

#[test]
fn help_lookalikes_are_formats() {
    for format in ["-hh", "--help=x", "-h?", "--version"] {
        timedline()
            .arg(format)
            .write_stdin("a\n")
            .assert()
            .success()
            .stdout(format!("{format}\n"));
    }
}

#[cfg(unix)]
#[test]
fn non_utf8_format_is_used_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = timedline()
        .arg(OsStr::from_bytes(b"\xff %i"))
        .write_stdin("a\n")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"\xff a\n");
}

#[cfg(unix)]
#[test]
fn non_utf8_format_error_shows_raw_tail() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = timedline()
        .arg(OsStr::from_bytes(b"\xff%q\xfe"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(
        output
            .stderr
            .ends_with(b": Invalid format at position 1: %q\xfe\n")
    );
}

#[test]
fn logging_goes_to_stderr_only() {
    timedline()
        .env("TIMEDLINE_LOG", "debug")
        .arg("%i")
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("a\nb\n")
        .stderr(predicate::str::contains("records"));
}
