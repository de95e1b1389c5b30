use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const NOTICE: &str = "// Copyright (c) 2019-2021, Kai Wolf - SW Consulting\n";

/// Helper to get a Command for the srcguard binary.
#[allow(deprecated)]
fn srcguard_cmd() -> Command {
    Command::cargo_bin("srcguard").unwrap()
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

fn compliant_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "include/kwctoolkit/base/ArraySize.h",
        &format!(
            "{NOTICE}\n#ifndef KWCTOOLKIT_BASE_ARRAY_SIZE_H_\n#define KWCTOOLKIT_BASE_ARRAY_SIZE_H_\n\n#endif  // KWCTOOLKIT_BASE_ARRAY_SIZE_H_\n"
        ),
    );
    write(
        tmp.path(),
        "src/base/ArraySize.cc",
        &format!("{NOTICE}\n#include \"kwctoolkit/base/ArraySize.h\"\n"),
    );
    tmp
}

#[test]
fn help_works() {
    srcguard_cmd().arg("--help").assert().success();
    srcguard_cmd().args(["check", "--help"]).assert().success();
}

#[test]
fn compliant_tree_passes_silently() {
    let tmp = compliant_tree();
    let before = read(tmp.path(), "include/kwctoolkit/base/ArraySize.h");

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read(tmp.path(), "include/kwctoolkit/base/ArraySize.h"), before);
}

#[test]
fn missing_copyright_stops_with_one_line() {
    let tmp = compliant_tree();
    write(tmp.path(), "src/a/Broken.cc", "int broken;\n");
    let stale = format!("{NOTICE}#ifndef OLD_GUARD\n#define OLD_GUARD\n#endif\n");
    write(tmp.path(), "include/zzz/Late.h", &stale);

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout("Error: No copyright message found in src/a/Broken.cc\n");

    // The include root comes after src, so the stale header was never touched.
    assert_eq!(read(tmp.path(), "include/zzz/Late.h"), stale);
}

#[test]
fn stale_guard_is_rewritten_in_place() {
    let tmp = compliant_tree();
    write(
        tmp.path(),
        "include/foo/BarBaz.h",
        &format!("{NOTICE}#ifndef OLD_GUARD\r\n#define OLD_GUARD\r\n#endif  // OLD_GUARD\r\n"),
    );

    srcguard_cmd()
        .args(["check", "--root"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        read(tmp.path(), "include/foo/BarBaz.h"),
        format!("{NOTICE}#ifndef FOO_BAR_BAZ_H_\r\n#define FOO_BAR_BAZ_H_\r\n#endif  // OLD_GUARD\r\n")
    );
}

#[test]
fn check_only_reports_without_writing() {
    let tmp = compliant_tree();
    let stale = format!("{NOTICE}#ifndef OLD_GUARD\n#define OLD_GUARD\n#endif\n");
    write(tmp.path(), "include/foo/BarBaz.h", &stale);

    srcguard_cmd()
        .args(["check", "--check-only", "--root"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("'OLD_GUARD' does not match 'FOO_BAR_BAZ_H_'"));

    assert_eq!(read(tmp.path(), "include/foo/BarBaz.h"), stale);
}

#[test]
fn keep_going_reports_every_file() {
    let tmp = compliant_tree();
    write(tmp.path(), "src/a.cc", "int a;\n");
    write(tmp.path(), "include/b.h", "#pragma once\n");

    srcguard_cmd()
        .args(["check", "--keep-going", "--root"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout(
            "Error: No copyright message found in src/a.cc\n\
             Error: No copyright message found in include/b.h\n",
        );
}

#[test]
fn failing_file_is_named_even_when_findings_are_truncated() {
    let tmp = compliant_tree();
    write(tmp.path(), "src/a.cc", "int a;\n");

    srcguard_cmd()
        .args(["--max-findings", "0", "--root"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout("Error: No copyright message found in src/a.cc\n");
}

#[test]
fn check_only_fail_fast_prints_one_line_per_run() {
    let tmp = compliant_tree();
    // Stale guard and no notice in the same header.
    write(tmp.path(), "include/foo/BarBaz.h", "#ifndef OLD\n#define OLD\n#endif\n");

    let assert = srcguard_cmd()
        .args(["check", "--check-only", "--root"])
        .arg(tmp.path())
        .assert()
        .code(2);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("Error: include guard 'OLD'"));
}

#[test]
fn guard_prefix_from_config_keeps_project_guards() {
    let tmp = TempDir::new().unwrap();
    let header = format!(
        "{NOTICE}#ifndef KWCTOOLKIT_BASE_CHECK_H_\n#define KWCTOOLKIT_BASE_CHECK_H_\n#endif\n"
    );
    write(tmp.path(), "src/base/Check.h", &header);
    write(tmp.path(), "src/base/Check.cc", &format!("{NOTICE}#include \"base/Check.h\"\n"));
    write(tmp.path(), "srcguard.toml", "[guard]\nprefix = \"KWCTOOLKIT_\"\n");

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(read(tmp.path(), "src/base/Check.h"), header);
}

#[cfg(unix)]
#[test]
fn symlinked_source_is_checked() {
    let tmp = compliant_tree();
    write(tmp.path(), "shared/real.cc", "int shared;\n");
    std::os::unix::fs::symlink(
        tmp.path().join("shared/real.cc"),
        tmp.path().join("src/linked.cc"),
    )
    .unwrap();

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout("Error: No copyright message found in src/linked.cc\n");
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_candidate_is_a_runtime_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = compliant_tree();
    std::fs::write(
        tmp.path().join("src").join(OsStr::from_bytes(b"bad\xff.cc")),
        "int bad;\n",
    )
    .unwrap();

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-UTF-8 path"));
}

#[test]
fn config_file_selects_profile() {
    let tmp = compliant_tree();
    write(tmp.path(), "src/a.cc", "int a;\n");
    write(tmp.path(), "srcguard.toml", "profile = \"warn\"\n");

    // Warnings do not fail the run under the warn profile.
    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn bad_config_is_a_runtime_error() {
    let tmp = compliant_tree();
    write(tmp.path(), "srcguard.toml", "profile = \"lenient\"\n");

    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("srcguard error:"))
        .stderr(predicate::str::contains("unknown profile: lenient"));
}

#[test]
fn missing_base_directory_is_a_runtime_error() {
    let tmp = TempDir::new().unwrap();
    srcguard_cmd()
        .arg("--root")
        .arg(tmp.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("base directory does not exist"));
}

#[test]
fn report_artifacts_and_rerendering() {
    let tmp = compliant_tree();
    write(tmp.path(), "src/a.cc", "int a;\n");
    let report = tmp.path().join("out/report.json");
    let markdown = tmp.path().join("out/report.md");

    srcguard_cmd()
        .args(["check", "--root"])
        .arg(tmp.path())
        .arg("--report-out")
        .arg(&report)
        .arg("--markdown-out")
        .arg(&markdown)
        .assert()
        .code(2);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["schema"], "srcguard.report.v1");
    assert_eq!(json["verdict"], "fail");
    assert_eq!(json["data"]["stopped_at"], "src/a.cc");
    assert!(std::fs::read_to_string(&markdown).unwrap().contains("# srcguard report"));

    srcguard_cmd()
        .args(["md", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/a.cc"));

    srcguard_cmd()
        .args(["annotations", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=src/a.cc::[copyright.notice:missing_copyright]",
        ));
}

#[test]
fn explain_known_and_unknown() {
    srcguard_cmd()
        .args(["explain", "missing_copyright"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing Copyright Notice"));

    srcguard_cmd()
        .args(["explain", "guard.pragma_once"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code"));
}
