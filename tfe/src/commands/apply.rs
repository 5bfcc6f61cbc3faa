use super::Session;
use crate::cli::ResourceArgs;
use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Map, Value};
use tfe_core::{tfe_println, tfe_warning};
use tfe_provider::allowed_workspaces::{AGENT_POOL_ID, ALLOWED_WORKSPACE_IDS};
use tfe_provider::lifecycle::{self, Plan};
use tfe_provider::ResourceData;

fn desired_data(session: &Session, args: &ResourceArgs) -> Result<ResourceData> {
    let mut config = Map::new();
    config.insert(AGENT_POOL_ID.to_string(), json!(args.agent_pool_id));
    config.insert(ALLOWED_WORKSPACE_IDS.to_string(), json!(args.workspaces));
    Ok(ResourceData::from_config(
        session.resource.schema(),
        &Value::Object(config),
    )?)
}

/// Stored state re-read from the API, as Terraform does before planning.
fn refreshed_prior(session: &Session) -> Result<Option<ResourceData>> {
    match &session.state.resource {
        Some(stored) => Ok(lifecycle::refresh(
            session.resource.as_ref(),
            &stored.data,
            &session.meta,
        )?),
        None => Ok(None),
    }
}

fn print_plan(plan: &Plan, args: &ResourceArgs) {
    let line = match plan {
        Plan::NoOp => "No changes.".green().to_string(),
        Plan::Create => format!("{} {}", "+".green(), plan),
        Plan::Update { .. } => format!("{} {}", "~".yellow(), plan),
        Plan::Replace { .. } => format!("{} {}", "-/+".red(), plan),
    };
    tfe_println!("{line}");
    if *plan != Plan::NoOp {
        tfe_println!("  agent_pool_id:         {}", args.agent_pool_id);
        tfe_println!("  allowed_workspace_ids: [{}]", args.workspaces.join(", "));
    }
}

pub fn handle_plan(session: &Session, args: &ResourceArgs) -> Result<()> {
    let desired = desired_data(session, args)?;
    let prior = refreshed_prior(session)?;
    let plan = lifecycle::plan(session.resource.schema(), prior.as_ref(), &desired);
    print_plan(&plan, args);
    Ok(())
}

pub fn handle_apply(session: &mut Session, args: &ResourceArgs) -> Result<()> {
    let desired = desired_data(session, args)?;
    let prior = refreshed_prior(session)?;
    let plan = lifecycle::plan(session.resource.schema(), prior.as_ref(), &desired);
    print_plan(&plan, args);

    let new_state = match lifecycle::apply(
        session.resource.as_ref(),
        prior.as_ref(),
        &desired,
        &session.meta,
    ) {
        Ok(state) => state,
        Err(failure) => {
            // Record what the remote looks like now, not what was planned.
            let resource_type = session.resource.type_name();
            session.state.set(resource_type, failure.state);
            session.save()?;
            return Err(failure.error.into());
        }
    };

    let resource_type = session.resource.type_name();
    match &new_state {
        Some(state) => tfe_println!("{} {} {}", "Applied".green(), resource_type, state.id()),
        None => tfe_warning!(
            "agent pool {} does not exist; nothing is managed",
            args.agent_pool_id
        ),
    }
    session.state.set(resource_type, new_state);
    session.save()
}
