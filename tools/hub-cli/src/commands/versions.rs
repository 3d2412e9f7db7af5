//! Versions command - list every version of a policy.

use anyhow::{bail, Result};
use hub_catalog::constants::messages;
use hub_catalog::policy::validate_policy_name;
use hub_core::PolicyVersions;

use crate::commands::VersionsArgs;
use crate::context::Context;
use crate::output::latest_badge;

pub async fn run(args: VersionsArgs, ctx: &Context) -> Result<()> {
    validate_policy_name(&args.name)?;

    let versions = PolicyVersions::new(&ctx.session, &args.name);
    let pb = ctx.output.spinner("Loading versions...");
    let state = versions.settled().await;
    pb.finish_and_clear();

    if let Some(error) = &state.error {
        bail!("{}: {}", messages::ERROR_LOADING_VERSIONS, error.user_message());
    }

    let list = versions.versions();
    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    if list.is_empty() {
        ctx.output.warn(messages::POLICY_NOT_FOUND);
        return Ok(());
    }

    ctx.output.header(&format!("Versions of {}", args.name));
    ctx.output.table_row(&["VERSION", "RELEASED", "PATH", ""], &[10, 14, 40, 6]);
    ctx.output.table_row(&["───────", "────────", "────", ""], &[10, 14, 40, 6]);
    for policy in &list {
        let released = policy.release_date_display().unwrap_or_default();
        ctx.output.table_row(
            &[
                &policy.version,
                &released,
                &versions.version_path(&policy.version),
                &latest_badge(versions.is_latest(&policy.version)),
            ],
            &[10, 14, 40, 6],
        );
    }

    Ok(())
}
