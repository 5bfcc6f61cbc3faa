use anyhow::Result;
use serde_json::json;
use tfe_core::tfe_println;
use tfe_provider::registry;

/// Print every resource type with its attribute schema.
pub fn handle_schema() -> Result<()> {
    let resources: Vec<_> = registry::resources()
        .iter()
        .map(|resource| {
            json!({
                "type": resource.type_name(),
                "attributes": resource.schema(),
            })
        })
        .collect();
    tfe_println!("{}", serde_json::to_string_pretty(&resources)?);
    Ok(())
}
