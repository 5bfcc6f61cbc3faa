//! The resource driven through the real HTTP client against a fake API.

use serde_json::json;
use tfe_provider::allowed_workspaces::ALLOWED_WORKSPACE_IDS;
use tfe_provider::lifecycle;
use tfe_provider::{AllowedWorkspacesResource, ConfiguredClient, Resource, ResourceData};
use tfe_testing::spawn_fake_tfe;

fn workspace_ids(data: &ResourceData) -> Vec<String> {
    data.get_string_set(ALLOWED_WORKSPACE_IDS)
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_apply_import_and_destroy_over_http() {
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-1", "acme", false, &["ws-old"]);
    let meta = ConfiguredClient::from_config(&config).unwrap();
    let resource = AllowedWorkspacesResource::new();

    let imported = lifecycle::import(&resource, "apool-1", &meta).unwrap();
    assert_eq!(workspace_ids(&imported), ["ws-old"]);

    let desired = ResourceData::from_config(
        resource.schema(),
        &json!({"agent_pool_id": "apool-1", "allowed_workspace_ids": ["ws-b", "ws-a"]}),
    )
    .unwrap();
    let state = lifecycle::apply(&resource, Some(&imported), &desired, &meta)
        .unwrap()
        .unwrap();
    assert_eq!(workspace_ids(&state), ["ws-a", "ws-b"]);
    assert_eq!(fake.pool("apool-1").unwrap().allowed, ["ws-a", "ws-b"]);

    lifecycle::destroy(&resource, &state, &meta).unwrap();
    assert!(fake.pool("apool-1").unwrap().allowed.is_empty());
}

#[test]
fn test_org_scoped_pool_rejected_over_http() {
    let (fake, config) = spawn_fake_tfe().unwrap();
    fake.add_pool("apool-org", "acme", true, &[]);
    let meta = ConfiguredClient::from_config(&config).unwrap();
    let resource = AllowedWorkspacesResource::new();

    let mut data = ResourceData::from_config(
        resource.schema(),
        &json!({"agent_pool_id": "apool-org", "allowed_workspace_ids": ["ws-a"]}),
    )
    .unwrap();
    let err = resource.create(&mut data, &meta).unwrap_err();

    assert!(err.is_precondition_failed());
    assert!(fake.requests().iter().all(|r| r.method == "GET"));
}

#[test]
fn test_missing_pool_over_http_clears_id() {
    let (_fake, config) = spawn_fake_tfe().unwrap();
    let meta = ConfiguredClient::from_config(&config).unwrap();
    let resource = AllowedWorkspacesResource::new();

    let mut data = ResourceData::with_id("apool-gone");
    resource.read(&mut data, &meta).unwrap();
    assert!(!data.has_id());
}
