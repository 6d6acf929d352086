use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT: &str = r#"
provider:
  devMode:
    defaults:
      exclude: ["*.log"]
modules:
  - name: api
    containerName: api
    devMode:
      command: ["npm", "run", "dev"]
      sync:
        - source: src
          target: /code/src
          mode: one-way-safe
          exclude: ["dist/**"]
        - source: build
          target: /code/build
          mode: one-way-reverse
"#;

const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
spec:
  template:
    spec:
      containers:
        - name: api
          image: registry.local/api:latest
"#;

fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let project = dir.path().join("devsync.yaml");
    fs::write(&project, PROJECT).expect("write project");
    let manifest = dir.path().join("deploy.yaml");
    fs::write(&manifest, DEPLOYMENT).expect("write manifest");
    (project, manifest)
}

fn devsync() -> Command {
    Command::cargo_bin("devsync").expect("binary")
}

#[test]
fn plan_shows_builtin_excludes_first() {
    let dir = TempDir::new().expect("tempdir");
    let (project, _) = write_fixtures(&dir);

    devsync()
        .args(["plan", "--module", "api", "--module-root", "/app"])
        .arg("--project")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ignore: /**/*.git, **/*.devsync, *.log, dist/**",
        ))
        .stdout(predicate::str::contains("one-way-safe"))
        .stdout(predicate::str::contains("/app/src"));
}

#[test]
fn plan_json_emits_resolved_configs() {
    let dir = TempDir::new().expect("tempdir");
    let (project, _) = write_fixtures(&dir);

    let output = devsync()
        .args(["plan", "--module", "api", "--module-root", "/app", "--json"])
        .arg("--project")
        .arg(&project)
        .output()
        .expect("run");
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON");
    let rules = parsed.as_array().expect("array");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["alpha"], "/app/src");
    // Reverse rule: remote on the alpha side.
    assert_eq!(rules[1]["beta"], "/app/build");
}

#[test]
fn patch_injects_agent_and_annotation() {
    let dir = TempDir::new().expect("tempdir");
    let (project, manifest) = write_fixtures(&dir);

    devsync()
        .args(["patch", "--module", "api"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("devsync.io/dev-mode"))
        .stdout(predicate::str::contains("devsync-init"))
        .stdout(predicate::str::contains("devsync-agent"))
        .stdout(predicate::str::contains("npm"));
}

#[test]
fn unknown_module_fails_with_its_name() {
    let dir = TempDir::new().expect("tempdir");
    let (project, _) = write_fixtures(&dir);

    devsync()
        .args(["plan", "--module", "ghost"])
        .arg("--project")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn start_dry_run_after_patch_prints_session_keys() {
    let dir = TempDir::new().expect("tempdir");
    let (project, manifest) = write_fixtures(&dir);
    let patched = dir.path().join("patched.yaml");

    devsync()
        .args(["patch", "--module", "api"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&manifest)
        .arg("-o")
        .arg(&patched)
        .assert()
        .success();

    devsync()
        .args(["start", "--module", "api", "--dry-run"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&patched)
        .arg("--module-root")
        .arg(dir.path().join("api"))
        .assert()
        .success()
        .stdout(predicate::str::contains("deployment--default--api-0"))
        .stdout(predicate::str::contains("deployment--default--api-1"));
}

#[test]
fn start_on_unpatched_manifest_names_the_resource() {
    let dir = TempDir::new().expect("tempdir");
    let (project, manifest) = write_fixtures(&dir);

    devsync()
        .args(["start", "--module", "api", "--dry-run"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&manifest)
        .arg("--module-root")
        .arg(dir.path().join("api"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deployment/api"))
        .stderr(predicate::str::contains("dev mode"));
}

#[test]
fn start_without_dry_run_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let (project, manifest) = write_fixtures(&dir);

    devsync()
        .args(["start", "--module", "api"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dry-run"));
}

#[test]
fn patch_output_file_round_trips_as_yaml() {
    let dir = TempDir::new().expect("tempdir");
    let (project, manifest) = write_fixtures(&dir);
    let patched = dir.path().join("patched.yaml");

    devsync()
        .args(["patch", "--module", "api"])
        .arg("--project")
        .arg(&project)
        .arg("--manifest")
        .arg(&manifest)
        .arg("-o")
        .arg(&patched)
        .assert()
        .success();

    let contents = fs::read_to_string(&patched).expect("patched file");
    let value: serde_yaml::Value = serde_yaml::from_str(&contents).expect("valid YAML");
    assert_eq!(value["kind"], serde_yaml::Value::from("Deployment"));
    let inits = &value["spec"]["template"]["spec"]["initContainers"];
    assert_eq!(inits.as_sequence().map(|s| s.len()), Some(1));
}
