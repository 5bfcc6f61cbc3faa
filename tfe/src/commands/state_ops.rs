use super::{load_state, Session};
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;
use tfe_core::{tfe_println, tfe_warning};
use tfe_provider::lifecycle;

pub fn handle_show(state_path: &Path) -> Result<()> {
    let state = load_state(state_path)?;
    match state.resource {
        Some(resource) => tfe_println!("{}", serde_json::to_string_pretty(&resource)?),
        None => tfe_println!("No resource in state."),
    }
    Ok(())
}

pub fn handle_refresh(session: &mut Session) -> Result<()> {
    let Some(stored) = session.state.resource.clone() else {
        bail!("no resource in state to refresh");
    };

    let refreshed = lifecycle::refresh(session.resource.as_ref(), &stored.data, &session.meta)?;
    match &refreshed {
        Some(data) => tfe_println!("{} {}", "Refreshed".green(), data.id()),
        None => tfe_warning!("{} no longer exists; removed from state", stored.data.id()),
    }
    let resource_type = session.resource.type_name();
    session.state.set(resource_type, refreshed);
    session.save()
}

pub fn handle_destroy(session: &mut Session) -> Result<()> {
    let Some(stored) = session.state.resource.clone() else {
        bail!("no resource in state to destroy");
    };

    lifecycle::destroy(session.resource.as_ref(), &stored.data, &session.meta)?;
    tfe_println!("{} {}", "Destroyed".green(), stored.data.id());

    let resource_type = session.resource.type_name();
    session.state.set(resource_type, None);
    session.save()
}

pub fn handle_import(session: &mut Session, agent_pool_id: &str) -> Result<()> {
    if let Some(existing) = &session.state.resource {
        bail!(
            "state already manages {} {}; destroy it or use another state file",
            existing.resource_type,
            existing.data.id()
        );
    }

    let data = lifecycle::import(session.resource.as_ref(), agent_pool_id, &session.meta)?;
    tfe_println!("{} {}", "Imported".green(), data.id());

    let resource_type = session.resource.type_name();
    session.state.set(resource_type, Some(data));
    session.save()
}
