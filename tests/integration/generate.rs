use crate::common::{TestProject, git_module};
use predicates::prelude::*;

#[test]
fn test_generate_writes_terrafile_per_directory() {
    let project = TestProject::new().unwrap();
    project
        .write("d/main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();
    project
        .write("e/main.tf", &git_module("y", "https://example.com/org/other.git", None))
        .unwrap();

    project.cmd().arg("generate").assert().success().stdout(predicate::str::contains("Wrote"));

    assert_eq!(
        project.read("d/Terrafile"),
        "repo:\n  source: https://example.com/org/repo.git\n  version: v2\n"
    );
    assert_eq!(
        project.read("e/Terrafile"),
        "other:\n  source: https://example.com/org/other.git\n  version: master\n"
    );
}

#[test]
fn test_generate_skips_non_git_sources() {
    let project = TestProject::new().unwrap();
    project
        .write(
            "main.tf",
            "module \"consul\" {\n  source  = \"hashicorp/consul/aws\"\n  version = \"0.1.0\"\n}\n\
             module \"local\" {\n  source = \"./modules/local\"\n}\n",
        )
        .unwrap();

    project
        .cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No git module sources found"));

    assert!(!project.path("Terrafile").exists());
}

#[test]
fn test_generate_never_overwrites_existing_entries() {
    let project = TestProject::new().unwrap();
    project.write("Terrafile", "foo:\n  source: A\n  version: v1\n").unwrap();
    project
        .write(
            "main.tf",
            &format!(
                "{}{}",
                git_module("a", "https://example.com/b/foo.git", Some("v9")),
                git_module("b", "https://example.com/org/bar.git", Some("v3"))
            ),
        )
        .unwrap();

    project.cmd().arg("generate").assert().success();

    assert_eq!(
        project.read("Terrafile"),
        "bar:\n  source: https://example.com/org/bar.git\n  version: v3\n\
         foo:\n  source: A\n  version: v1\n"
    );
}

#[test]
fn test_generate_is_stable_across_runs() {
    let project = TestProject::new().unwrap();
    project
        .write("main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    project.cmd().arg("generate").assert().success();
    let first = project.read("Terrafile");
    project.cmd().arg("generate").assert().success();

    assert_eq!(project.read("Terrafile"), first);
}

#[test]
fn test_generate_rejects_malformed_terrafile() {
    let project = TestProject::new().unwrap();
    project.write("Terrafile", "- not\n- a mapping\n").unwrap();
    project
        .write("main.tf", &git_module("x", "https://example.com/org/repo.git", None))
        .unwrap();

    project
        .cmd()
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid Terrafile syntax"));

    assert_eq!(project.read("Terrafile"), "- not\n- a mapping\n");
}

#[test]
fn test_generate_ignores_terraform_directories() {
    let project = TestProject::new().unwrap();
    project
        .write(
            ".terraform/modules/x/main.tf",
            &git_module("x", "https://example.com/org/cached.git", None),
        )
        .unwrap();

    project.cmd().arg("generate").assert().success();

    assert!(!project.path(".terraform/modules/x/Terrafile").exists());
}

#[test]
fn test_generate_dry_run_yaml() {
    let project = TestProject::new().unwrap();
    project
        .write("d/main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    project
        .cmd()
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Terrafile"))
        .stdout(predicate::str::contains("source: https://example.com/org/repo.git"))
        .stdout(predicate::str::contains("version: v2"));

    assert!(!project.path("d/Terrafile").exists());
}

#[test]
fn test_generate_dry_run_json() {
    let project = TestProject::new().unwrap();
    project
        .write("d/main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    let output = project.cmd().args(["generate", "--dry-run", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let manifests = value.as_object().unwrap();
    assert_eq!(manifests.len(), 1);
    let (path, modules) = manifests.iter().next().unwrap();
    assert!(path.ends_with("Terrafile"));
    assert_eq!(modules["repo"]["source"], "https://example.com/org/repo.git");
    assert_eq!(modules["repo"]["version"], "v2");
}
