//! `tfe-pool` commands that talk to a (fake) TFE API.

mod common;

use common::{read_state, state_workspaces, tfe_pool_against};
use predicates::prelude::*;
use tempfile::TempDir;
use tfe_testing::spawn_fake_tfe;

#[test]
fn test_apply_records_state_and_updates_remote() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-b", "-w", "ws-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied"));

    let state = read_state(&dir);
    assert_eq!(state["resource"]["type"], "tfe_agent_pool_allowed_workspaces");
    assert_eq!(state["resource"]["id"], "apool-1");
    assert_eq!(state_workspaces(&dir).unwrap(), ["ws-a", "ws-b"]);
    assert_eq!(fake.pool("apool-1").unwrap().allowed, ["ws-a", "ws-b"]);

    // A second apply with the same input changes nothing remotely.
    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-a", "-w", "ws-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));
    let patches = fake
        .requests()
        .iter()
        .filter(|r| r.method == "PATCH")
        .count();
    assert_eq!(patches, 1);
}

#[test]
fn test_plan_does_not_write() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &["ws-old"]);

    tfe_pool_against(&dir, &config)
        .args(["plan", "--agent-pool-id", "apool-1", "-w", "ws-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));

    assert_eq!(fake.pool("apool-1").unwrap().allowed, ["ws-old"]);
    assert!(fake.requests().iter().all(|r| r.method == "GET"));
}

#[test]
fn test_apply_on_org_scoped_pool_fails() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-org", "acme", true, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-org", "-w", "ws-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "workspaces already scoped for access to organization: acme",
        ));

    assert!(state_workspaces(&dir).is_none());
}

#[test]
fn test_failed_replace_drops_cleared_state() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &[]);
    fake.add_pool("apool-org", "acme", true, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-a"])
        .assert()
        .success();

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-org", "-w", "ws-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already scoped"));

    assert!(fake.pool("apool-1").unwrap().allowed.is_empty());
    assert!(state_workspaces(&dir).is_none());
}

#[test]
fn test_failed_update_keeps_state() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-a"])
        .assert()
        .success();

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", tfe_testing::INVALID_WORKSPACE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error updating agent pool apool-1"));

    assert_eq!(state_workspaces(&dir).unwrap(), ["ws-a"]);
}

#[test]
fn test_refresh_drops_vanished_pool() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-a"])
        .assert()
        .success();

    fake.remove_pool("apool-1");
    tfe_pool_against(&dir, &config)
        .arg("refresh")
        .assert()
        .success()
        .stderr(predicate::str::contains("no longer exists"));

    assert!(state_workspaces(&dir).is_none());
}

#[test]
fn test_destroy_detaches_workspaces_and_clears_state() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &[]);

    tfe_pool_against(&dir, &config)
        .args(["apply", "--agent-pool-id", "apool-1", "-w", "ws-a"])
        .assert()
        .success();
    tfe_pool_against(&dir, &config)
        .arg("destroy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Destroyed"));

    assert!(fake.pool("apool-1").unwrap().allowed.is_empty());
    assert!(state_workspaces(&dir).is_none());
}

#[test]
fn test_import_then_import_again_fails() {
    let dir = TempDir::new().unwrap();
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &["ws-b", "ws-a"]);

    tfe_pool_against(&dir, &config)
        .args(["import", "apool-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));
    assert_eq!(state_workspaces(&dir).unwrap(), ["ws-a", "ws-b"]);

    tfe_pool_against(&dir, &config)
        .args(["import", "apool-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("state already manages"));
}

#[test]
fn test_import_of_missing_pool_fails() {
    let dir = TempDir::new().unwrap();
    let (_fake, config) = spawn_fake_tfe().unwrap();

    tfe_pool_against(&dir, &config)
        .args(["import", "apool-gone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot import non-existent remote object"));

    assert!(state_workspaces(&dir).is_none());
}
