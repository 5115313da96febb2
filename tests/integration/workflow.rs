use crate::common::{TestProject, git_module};

#[test]
fn test_generate_then_rewrite_end_to_end() {
    let project = TestProject::new().unwrap();
    project
        .write("d/main.tf", &git_module("x", "https://example.com/org/repo.git", Some("v2")))
        .unwrap();

    project.cmd().arg("generate").assert().success();
    project.cmd().arg("rewrite").assert().success();

    assert_eq!(
        project.read("d/Terrafile"),
        "repo:\n  source: https://example.com/org/repo.git\n  version: v2\n"
    );
    let source = project.read("d/main.tf");
    assert!(source.contains("source = \"./vendor/modules/repo\""));
    assert!(!source.contains("ref="));

    // A later generate sees no git sources and leaves the Terrafile alone.
    project.cmd().arg("generate").assert().success();
    assert_eq!(
        project.read("d/Terrafile"),
        "repo:\n  source: https://example.com/org/repo.git\n  version: v2\n"
    );
}

#[test]
fn test_same_module_in_two_directories() {
    let project = TestProject::new().unwrap();
    let module = git_module("net", "https://example.com/org/network.git", Some("v1.0.0"));
    project.write("envs/prod/main.tf", &module).unwrap();
    project.write("envs/stage/main.tf", &module).unwrap();

    project.cmd().arg("generate").assert().success();
    project.cmd().arg("rewrite").assert().success();

    for env in ["prod", "stage"] {
        assert!(project.read(&format!("envs/{env}/Terrafile")).contains("network:"));
        assert!(
            project
                .read(&format!("envs/{env}/main.tf"))
                .contains("\"./vendor/modules/network\"")
        );
    }
}
