//! Destroy command integration tests.

use predicates::prelude::*;

use super::common::{FAILING_INSTALLER, TestEnv};

#[test]
fn destroy_removes_recorded_cluster() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-abc12", "aws")]);

  env
    .ocauto()
    .args(["--destroy", "demo-aws-abc12", "--platform", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Destroyed cluster demo-aws-abc12"));

  assert_eq!(
    env.invocations(),
    [format!(
      "-s {} -a delete -n demo-aws-abc12 -p aws",
      env.store_dir().display()
    )]
  );
  assert_eq!(env.read_store()["clusters"]["aws"], serde_json::json!([]));
}

#[test]
fn destroy_uses_recorded_directory() {
  let env = TestEnv::new();
  env.seed_store(&serde_json::json!({
    "clusters": {
      "azure": [{ "name": "demo-azure-z9y8x", "dir": "/elsewhere/clusters", "platform": "azure" }]
    }
  }));

  env
    .ocauto()
    .args(["--destroy", "demo-azure-z9y8x", "--platform", "azure"])
    .assert()
    .success();

  assert_eq!(
    env.invocations(),
    ["-s /elsewhere/clusters -a delete -n demo-azure-z9y8x -p azure"]
  );
}

#[test]
fn destroy_unknown_cluster_uses_default_directory() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-keep1", "aws")]);
  let before = env.read_store();

  env
    .ocauto()
    .args(["--destroy", "demo-aws-ghost", "--platform", "aws"])
    .assert()
    .success()
    .stderr(predicate::str::contains("is not recorded"));

  assert_eq!(
    env.invocations(),
    [format!(
      "-s {} -a delete -n demo-aws-ghost -p aws",
      env.store_dir().display()
    )]
  );
  assert_eq!(env.read_store(), before);
}

#[test]
fn destroy_without_store_fails() {
  let env = TestEnv::new();

  env
    .ocauto()
    .args(["--destroy", "demo-aws-abc12", "--platform", "aws"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("does not exist"));

  assert!(env.invocations().is_empty());
}

#[test]
fn failed_destroy_keeps_record() {
  let env = TestEnv::with_installer(FAILING_INSTALLER);
  env.seed_clusters(&[("demo-aws-abc12", "aws")]);

  env
    .ocauto()
    .args(["--destroy", "demo-aws-abc12", "--platform", "aws"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to destroy cluster demo-aws-abc12"));

  assert_eq!(env.read_store()["clusters"]["aws"][0]["name"], "demo-aws-abc12");
}

#[test]
fn dry_run_destroy_runs_nothing() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-abc12", "aws")]);
  let before = std::fs::read(env.store_file()).unwrap();

  env
    .ocauto()
    .args(["--destroy", "demo-aws-abc12", "--platform", "aws", "--dryrun"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains("-a delete -n demo-aws-abc12 -p aws"));

  assert!(env.invocations().is_empty());
  assert_eq!(std::fs::read(env.store_file()).unwrap(), before);
}

#[test]
fn create_and_destroy_in_one_run() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-old01", "aws")]);

  env
    .ocauto()
    .args(["--create", "--destroy", "demo-aws-old01", "--platform", "aws"])
    .assert()
    .success();

  let invocations = env.invocations();
  assert_eq!(invocations.len(), 2);
  assert!(invocations[0].contains("-a create -n demo-aws-"));
  assert!(invocations[1].ends_with("-a delete -n demo-aws-old01 -p aws"));

  let aws = env.read_store()["clusters"]["aws"].as_array().unwrap().clone();
  assert_eq!(aws.len(), 1);
  assert_ne!(aws[0]["name"], "demo-aws-old01");
}
