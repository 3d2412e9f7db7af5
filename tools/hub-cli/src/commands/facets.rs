//! Facets and stats commands - catalog-wide app data.

use anyhow::{anyhow, Result};
use hub_catalog::search::{FilterKind, FilterState};
use hub_core::filter_panel::FilterPanel;

use crate::commands::FacetsArgs;
use crate::context::Context;

pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let pb = ctx.output.spinner("Loading filters...");
    let loaded = ctx.session.ensure_loaded().await;
    pb.finish_and_clear();
    let app_data = loaded.map_err(|e| anyhow!("{}", e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(app_data);
        return Ok(());
    }

    let mut panel = FilterPanel::new(app_data, &FilterState::default(), &ctx.config.ui);
    for kind in FilterKind::ALL {
        let Some(section) = panel.section_mut(kind) else {
            continue;
        };
        if args.all && section.hidden_count() > 0 {
            section.toggle_show_all();
        }

        ctx.output.header(kind.title());
        for value in section.visible() {
            ctx.output.list_item(value);
        }
        if let Some(more) = section.toggle_label() {
            ctx.output.debug(&more);
        }
    }

    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<()> {
    let pb = ctx.output.spinner("Loading catalog...");
    let stats = ctx.session.stats().await;
    pb.finish_and_clear();
    let stats = stats.map_err(|e| anyhow!("{}", e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Policy Hub");
    ctx.output.kv("Policies", &stats.total_policies.to_string());
    ctx.output.kv("Categories", &stats.total_categories.to_string());
    ctx.output.kv("Providers", &stats.total_providers.to_string());
    ctx.output.kv("Platforms", &stats.total_platforms.to_string());
    Ok(())
}
