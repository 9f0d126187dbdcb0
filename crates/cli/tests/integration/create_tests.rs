//! Create command integration tests.

use predicates::prelude::*;

use super::common::{FAILING_INSTALLER, TestEnv};

#[test]
fn create_records_cluster_in_store() {
  let env = TestEnv::new();

  env
    .ocauto()
    .args(["--create", "--platform", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created cluster demo-aws-"));

  let store = env.read_store();
  let aws = store["clusters"]["aws"].as_array().unwrap();
  assert_eq!(aws.len(), 1);

  let name = aws[0]["name"].as_str().unwrap();
  assert!(name.starts_with("demo-aws-"), "unexpected name {name}");
  assert_eq!(aws[0]["dir"], env.store_dir().to_str().unwrap());
  assert_eq!(aws[0]["platform"], "aws");

  assert_eq!(
    env.invocations(),
    [format!("-s {} -a create -n {} -p aws", env.store_dir().display(), name)]
  );
}

#[test]
fn create_streams_installer_output_to_log() {
  let env = TestEnv::new();

  env
    .ocauto()
    .args(["--create", "--platform", "azure"])
    .assert()
    .success()
    .stderr(predicate::str::contains("installer progress for demo-azure-"))
    .stderr(predicate::str::contains("installer warning for demo-azure-"));
}

#[test]
fn create_appends_to_existing_store() {
  let env = TestEnv::new();
  env.seed_clusters(&[("demo-aws-old01", "aws"), ("demo-azure-old02", "azure")]);

  env.ocauto().args(["--create", "--platform", "aws"]).assert().success();

  let store = env.read_store();
  let aws = store["clusters"]["aws"].as_array().unwrap();
  assert_eq!(aws.len(), 2);
  assert_eq!(aws[0]["name"], "demo-aws-old01");
  assert_eq!(store["clusters"]["azure"].as_array().unwrap().len(), 1);
}

#[test]
fn create_creates_store_directory() {
  let env = TestEnv::new();
  assert!(!env.store_dir().exists());

  env.ocauto().args(["--create", "--platform", "aws"]).assert().success();

  assert!(env.store_dir().is_dir());
}

#[test]
fn failed_create_does_not_record_cluster() {
  let env = TestEnv::with_installer(FAILING_INSTALLER);

  env
    .ocauto()
    .args(["--create", "--platform", "aws"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to create cluster"))
    .stderr(predicate::str::contains("terraform apply failed"));

  assert_eq!(env.invocations().len(), 1);
  assert!(!env.store_file().exists());
}

#[test]
fn dry_run_create_runs_nothing() {
  let env = TestEnv::new();

  env
    .ocauto()
    .args(["--create", "--platform", "aws", "--dryrun"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains("-a create -n demo-aws-"));

  assert!(env.invocations().is_empty());
  assert!(!env.store_file().exists());
}

#[test]
fn dry_run_alias_is_accepted() {
  let env = TestEnv::new();

  env
    .ocauto()
    .args(["--create", "--platform", "aws", "--dry-run"])
    .assert()
    .success();

  assert!(env.invocations().is_empty());
}

#[test]
fn create_json_output_describes_cluster() {
  let env = TestEnv::new();

  let output = env
    .ocauto()
    .args(["--create", "--platform", "azure", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(outcome["dry_run"], false);
  assert_eq!(outcome["cluster"]["platform"], "azure");
  assert_eq!(outcome["cluster"], env.read_store()["clusters"]["azure"][0]);
}

#[test]
fn create_without_installer_fails() {
  let env = TestEnv::without_installer();

  env
    .ocauto()
    .args(["--create", "--platform", "aws"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("scripts/run-openshift-install.sh"));
}

#[test]
fn create_reads_dotenv_file() {
  let env = TestEnv::new();
  let dotenv = format!(
    "APP_CLUSTERNAMEPREFIX=fromfile\nAPP_OCSTOREPATH={}\nAPP_CLUSTERPULLSECRET=secret\nAPP_SSHKEY=key\nAPP_PLATFORM=aws\n",
    env.store_root().display()
  );
  std::fs::write(env.temp.path().join(".env"), dotenv).unwrap();

  env
    .bare_ocauto()
    .args(["--create", "--platform", "aws"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created cluster fromfile-aws-"));
}
