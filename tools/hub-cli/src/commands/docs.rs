//! Docs command - print a documentation page as raw markdown.

use anyhow::{anyhow, bail, Result};
use hub_catalog::constants::messages;
use hub_core::{DocPanel, DocsView, PolicyVersions};

use crate::commands::DocsArgs;
use crate::context::Context;

/// Resolve the requested version, falling back to the latest one.
async fn resolve_version(args: &DocsArgs, ctx: &Context) -> Result<String> {
    if let Some(version) = &args.version {
        return Ok(version.clone());
    }

    let versions = PolicyVersions::new(&ctx.session, &args.name);
    let state = versions.settled().await;
    if let Some(error) = &state.error {
        bail!("{}: {}", messages::ERROR_LOADING_VERSIONS, error.user_message());
    }
    versions
        .latest_version()
        .ok_or_else(|| anyhow!(messages::POLICY_NOT_FOUND))
}

pub async fn run(args: DocsArgs, ctx: &Context) -> Result<()> {
    let pb = ctx.output.spinner(messages::LOADING);
    let version = resolve_version(&args, ctx).await;
    let version = match version {
        Ok(version) => version,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    if args.single {
        let doc = ctx
            .session
            .api()
            .get_single_doc(&args.name, &version, args.page)
            .await;
        pb.finish_and_clear();
        let doc = doc.map_err(|e| anyhow!("{}: {}", messages::ERROR_LOADING_DOCS, e.user_message()))?;
        return match doc {
            Some(doc) if ctx.output.is_json() => {
                ctx.output.json(&doc);
                Ok(())
            }
            Some(doc) => {
                ctx.output.raw(&doc.content);
                Ok(())
            }
            None => bail!(
                "{}: the {} page does not exist for {}@{}",
                messages::DOCS_NOT_AVAILABLE,
                args.page,
                args.name,
                version
            ),
        };
    }

    let mut view = DocsView::new(&ctx.session, &args.name, &version).with_initial_page(args.page);
    view.settled().await;
    pb.finish_and_clear();

    if !view.select(args.page) {
        ctx.output.debug(&format!("{} tab is disabled", args.page));
    }

    if ctx.output.is_json() {
        ctx.output.json(&view.state().data.unwrap_or_default());
        return Ok(());
    }

    let tabs = view
        .tabs()
        .iter()
        .map(|tab| {
            if tab.page == view.active() {
                format!("[{}]", tab.label)
            } else if tab.disabled {
                format!("({})", tab.label)
            } else {
                tab.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    ctx.output.header(&format!("{}@{}", args.name, version));
    ctx.output.kv("Tabs", &tabs);
    println!();

    match view.panel() {
        DocPanel::Content(doc) => ctx.output.raw(&doc.content),
        DocPanel::NotAvailable { title, message } => {
            ctx.output.warn(title);
            ctx.output.info(&message);
        }
        DocPanel::Error { title, message } => bail!("{}: {}", title, message),
        DocPanel::Loading => ctx.output.info(messages::LOADING),
    }

    Ok(())
}
