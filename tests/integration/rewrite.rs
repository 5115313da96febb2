use crate::common::{TestProject, git_module};
use predicates::prelude::*;

const WITH_VERSION: &str = "\
# Shared network
module \"x\" {
  source  = \"git::https://example.com/org/repo.git?ref=v2\"
  version = \"v9\"
  cidr    = \"10.0.0.0/16\"
}

module \"registry\" {
  source  = \"hashicorp/consul/aws\"
  version = \"0.1.0\"
}

output \"id\" {
  value = module.x.id
}
";

#[test]
fn test_rewrite_points_source_at_vendored_path() {
    let project = TestProject::new().unwrap();
    project
        .write("d/main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    project.cmd().arg("rewrite").assert().success().stdout(predicate::str::contains("Rewrote"));

    assert_eq!(
        project.read("d/main.tf"),
        "module \"x\" {\n  source = \"./vendor/modules/repo\"\n}\n"
    );
}

#[test]
fn test_rewrite_removes_version_and_keeps_the_rest() {
    let project = TestProject::new().unwrap();
    project.write("main.tf", WITH_VERSION).unwrap();

    project.cmd().arg("rewrite").assert().success();

    assert_eq!(project.read("main.tf"), WITH_VERSION.replace(
        "  source  = \"git::https://example.com/org/repo.git?ref=v2\"\n  version = \"v9\"\n",
        "  source  = \"./vendor/modules/repo\"\n",
    ));
}

#[test]
fn test_rewrite_twice_is_a_no_op() {
    let project = TestProject::new().unwrap();
    project.write("main.tf", WITH_VERSION).unwrap();

    project.cmd().arg("rewrite").assert().success();
    let first = project.read("main.tf");

    project
        .cmd()
        .arg("rewrite")
        .assert()
        .success()
        .stdout(predicate::str::contains("All module sources are up to date"));
    assert_eq!(project.read("main.tf"), first);
}

#[test]
fn test_rewrite_leaves_non_git_files_untouched() {
    let project = TestProject::new().unwrap();
    let content = "module \"local\" {\n    source =   \"./modules/local\"   # odd spacing\n}\n";
    project.write("main.tf", content).unwrap();

    project.cmd().arg("rewrite").assert().success();

    assert_eq!(project.read("main.tf"), content);
}

#[test]
fn test_rewrite_check_reports_pending_files() {
    let project = TestProject::new().unwrap();
    let content = git_module("x", "https://example.com/org/repo.git", None);
    project.write("envs/prod/main.tf", &content).unwrap();

    project
        .cmd()
        .args(["rewrite", "--check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("main.tf"))
        .stderr(predicate::str::contains("1 file(s) would be rewritten"));

    assert_eq!(project.read("envs/prod/main.tf"), content);
}

#[test]
fn test_rewrite_quiet_prints_nothing() {
    let project = TestProject::new().unwrap();
    project
        .write("main.tf", &git_module("x", "https://example.com/org/repo.git", None))
        .unwrap();

    project.cmd().args(["--quiet", "rewrite"]).assert().success().stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_rewrite_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new().unwrap();
    let path = project
        .write("main.tf", &git_module("x", "https://example.com/org/repo.git", None))
        .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

    project.cmd().arg("rewrite").assert().success();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[test]
fn test_rewrite_keeps_crlf_line_endings() {
    let project = TestProject::new().unwrap();
    project
        .write(
            "main.tf",
            "module \"x\" {\r\n  source = \"git::https://example.com/org/repo.git?ref=v2\"\r\n  version = \"v9\"\r\n}\r\n",
        )
        .unwrap();

    project.cmd().arg("rewrite").assert().success();

    assert_eq!(
        project.read("main.tf"),
        "module \"x\" {\r\n  source = \"./vendor/modules/repo\"\r\n}\r\n"
    );
}

#[test]
fn test_rewrite_handles_scheme_less_git_source() {
    let project = TestProject::new().unwrap();
    project
        .write("main.tf", "module \"x\" {\n  source = \"git::github.com/org/repo.git?ref=v1\"\n}\n")
        .unwrap();

    project.cmd().arg("rewrite").assert().success();

    assert_eq!(
        project.read("main.tf"),
        "module \"x\" {\n  source = \"./vendor/modules/repo\"\n}\n"
    );
}

#[test]
fn test_rewrite_verbose_lists_vendored_targets() {
    let project = TestProject::new().unwrap();
    project
        .write("main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    project
        .cmd()
        .args(["--verbose", "rewrite"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "https://example.com/org/repo.git:v2 -> ./vendor/modules/repo",
        ));
}

#[test]
fn test_rewrite_warns_on_name_collision_with_origin_file() {
    let project = TestProject::new().unwrap();
    project
        .write("a/main.tf", &git_module("net", "https://example.com/a/network.git", None))
        .unwrap();
    project
        .write("b/main.tf", &git_module("net", "https://example.com/b/network.git", None))
        .unwrap();

    project
        .cmd()
        .arg("rewrite")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "which is also used by https://example.com/a/network.git:master (in ",
        ))
        .stderr(predicate::str::contains("main.tf)"));
}
