//! Show command - details of one policy version.

use anyhow::{bail, Context as _, Result};
use hub_catalog::constants::messages;
use hub_catalog::policy::validate_version;
use hub_core::PolicyVersions;

use crate::commands::ShowArgs;
use crate::context::Context;

pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let api = ctx.session.api();

    let pb = ctx.output.spinner(messages::LOADING);
    let found = match &args.version {
        Some(version) => {
            validate_version(version)?;
            api.get_policy_version(&args.name, version).await
        }
        None => api.get_latest_version(&args.name).await,
    };
    pb.finish_and_clear();

    let found = found
        .map_err(|e| anyhow::anyhow!("{}: {}", messages::ERROR_LOADING_POLICY, e.user_message()))
        .with_context(|| format!("while loading {}", args.name))?;

    let Some(policy) = found else {
        match &args.version {
            Some(_) => bail!(messages::VERSION_NOT_FOUND),
            None => bail!(messages::POLICY_NOT_FOUND),
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&policy);
        return Ok(());
    }

    ctx.output.header(policy.title());
    ctx.output.kv("Name", &policy.name);
    ctx.output.kv("Version", &policy.version);
    ctx.output.kv("Provider", &policy.provider);
    if let Some(description) = &policy.description {
        ctx.output.kv("Description", description);
    }
    if !policy.categories.is_empty() {
        ctx.output.kv("Categories", &policy.categories.join(", "));
    }
    if !policy.supported_platforms.is_empty() {
        ctx.output.kv("Platforms", &policy.supported_platforms.join(", "));
    }
    if !policy.tags.is_empty() {
        ctx.output.kv("Tags", &policy.tags.join(", "));
    }
    if let Some(date) = policy.release_date_display() {
        ctx.output.kv("Released", &date);
    }
    if let Some(url) = &policy.download_url {
        ctx.output.kv("Download", url);
    }
    if let Some(checksum) = &policy.checksum {
        ctx.output.kv("Checksum", &format!("{}:{}", checksum.algorithm, checksum.value));
    }

    let versions = PolicyVersions::new(&ctx.session, &policy.name);
    let state = versions.settled().await;
    if state.error.is_none() {
        if let Some(notice) = versions.older_version_notice(&policy.version) {
            println!();
            ctx.output.warn(&notice);
        }
    }

    Ok(())
}
