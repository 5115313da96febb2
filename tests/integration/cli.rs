use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    let project = TestProject::new().unwrap();

    project
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_command_is_required() {
    let project = TestProject::new().unwrap();

    project.cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_verbs_are_mutually_exclusive() {
    let project = TestProject::new().unwrap();

    project.cmd().args(["generate", "rewrite"]).assert().failure();
}

#[test]
fn test_invalid_ignore_pattern_is_reported() {
    let project = TestProject::new().unwrap();

    project
        .cmd()
        .args(["--ignore", "[unclosed", "generate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid ignore pattern '[unclosed'"));
}

#[test]
fn test_invalid_source_aborts_with_path() {
    let project = TestProject::new().unwrap();
    project.write("envs/broken.tf", "module \"x\" {\n  source = \n").unwrap();

    project
        .cmd()
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.tf"))
        .stderr(predicate::str::contains("Invalid Terraform source syntax"));
}

#[test]
fn test_ignore_from_environment() {
    let project = TestProject::new().unwrap();
    project
        .write(
            "legacy/main.tf",
            &crate::common::git_module("x", "https://example.com/org/old.git", None),
        )
        .unwrap();

    project.cmd().env("TERRAFILE_IFY_IGNORE", "legacy").arg("generate").assert().success();

    assert!(!project.path("legacy/Terrafile").exists());
}

#[test]
fn test_directory_option() {
    let project = TestProject::new().unwrap();
    project
        .write(
            "infra/main.tf",
            &crate::common::git_module("x", "https://example.com/org/repo.git", Some("v1")),
        )
        .unwrap();

    project.cmd().args(["-C", "infra", "generate"]).assert().success();

    assert!(project.path("infra/Terrafile").exists());
}
