//! List command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_without_store_is_empty() {
  let env = TestEnv::new();

  env
    .ocauto()
    .arg("--list")
    .assert()
    .success()
    .stdout(predicate::str::contains("No clusters recorded"));
}

#[test]
fn list_shows_every_platform() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-1a2b3", "aws"), ("demo-azure-4c5d6", "azure")]);

  env
    .ocauto()
    .arg("--list")
    .assert()
    .success()
    .stdout(predicate::str::contains("demo-aws-1a2b3"))
    .stdout(predicate::str::contains("demo-azure-4c5d6"));
}

#[test]
fn list_filters_by_platform_as_json() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-1a2b3", "aws"), ("demo-azure-4c5d6", "azure")]);

  let output = env
    .ocauto()
    .args(["--list", "--platform", "azure", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let records = records.as_array().unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0]["name"], "demo-azure-4c5d6");
}

#[test]
fn list_does_not_need_installer() {
  let env = TestEnv::without_installer();

  env.ocauto().arg("--list").assert().success();
}

#[test]
fn list_needs_only_store_path() {
  let env = TestEnv::without_installer();
  env.seed_clusters(&[("demo-aws-1a2b3", "aws")]);

  env
    .bare_ocauto()
    .env("APP_OCSTOREPATH", env.store_root())
    .arg("--list")
    .assert()
    .success()
    .stdout(predicate::str::contains("demo-aws-1a2b3"));
}

#[test]
fn list_without_store_path_fails() {
  let env = TestEnv::without_installer();

  env
    .bare_ocauto()
    .arg("--list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("APP_OCSTOREPATH"));
}
