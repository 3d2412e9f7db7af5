//! List command - search and filter the catalog.

use anyhow::{bail, Result};
use hub_catalog::routes;
use hub_catalog::search::{FilterState, FilterUpdate};
use hub_core::{CatalogNotice, CatalogView, Location, MemoryLocation};

use crate::commands::ListArgs;
use crate::context::Context;
use crate::output::{latest_badge, truncate};

/// Build the starting location from the raw query and the flags.
fn initial_location(args: &ListArgs) -> MemoryLocation {
    let base = FilterState::from_query_string(args.query.as_deref().unwrap_or_default());

    let mut update = FilterUpdate::new();
    if let Some(search) = &args.search {
        update = update.search(search.clone());
    }
    if !args.categories.is_empty() {
        update = update.categories(args.categories.iter().cloned());
    }
    if !args.providers.is_empty() {
        update = update.providers(args.providers.iter().cloned());
    }
    if !args.platforms.is_empty() {
        update = update.platforms(args.platforms.iter().cloned());
    }
    if let Some(page) = args.page {
        update = update.page(page);
    }
    if let Some(page_size) = args.page_size {
        update = update.page_size(page_size);
    }

    let state = base.with_update(update);
    MemoryLocation::new(&format!("{}?{}", routes::POLICIES, state.to_query_string()))
}

pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let location = initial_location(&args);
    ctx.output.debug(&format!("Location: {}", location.href()));

    if args.filters {
        let pb = ctx.output.spinner("Loading filters...");
        let loaded = ctx.session.ensure_loaded().await;
        pb.finish_and_clear();
        if let Err(e) = loaded {
            ctx.output.warn(&format!("Filters unavailable: {}", e.user_message()));
        }
    }

    let view = CatalogView::new(&ctx.session, location);
    let pb = ctx.output.spinner("Loading policies...");
    let state = view.settled().await;
    pb.finish_and_clear();

    if let Some(CatalogNotice::Error { title, message }) = view.notice() {
        if let Some(error) = &state.error {
            ctx.output.debug(&format!("{}", error));
        }
        bail!("{}: {}", title, message);
    }

    if ctx.output.is_json() {
        ctx.output.json(&state.data);
        return Ok(());
    }

    let filters = view.filters();
    ctx.output.header("Policies");
    if filters.is_filtered() {
        ctx.output.kv("Query", view.location().query().as_str());
    }

    if let Some(panel) = view.filter_panel() {
        for section in panel.sections() {
            let title = match section.selected_label() {
                Some(selected) => format!("{} ({})", section.kind.title(), selected),
                None => section.kind.title().to_string(),
            };
            ctx.output.kv("Filter", &title);
            for value in section.visible() {
                let mark = if section.is_checked(value) { "[x]" } else { "[ ]" };
                ctx.output.list_item(&format!("{} {}", mark, value));
            }
            if let Some(more) = section.toggle_label() {
                ctx.output.list_item(&more);
            }
        }
    }

    if let Some(CatalogNotice::Empty { title, hint }) = view.notice() {
        ctx.output.warn(title);
        ctx.output.info(hint);
        return Ok(());
    }

    println!();
    ctx.output.table_row(&["NAME", "VERSION", "PROVIDER", "DESCRIPTION", ""], &[24, 10, 12, 40, 6]);
    ctx.output.table_row(&["────", "───────", "────────", "───────────", ""], &[24, 10, 12, 40, 6]);
    for policy in view.policies() {
        let description = truncate(policy.description.as_deref().unwrap_or_default(), 40);
        ctx.output.table_row(
            &[
                &policy.name,
                &policy.version,
                &policy.provider,
                &description,
                &latest_badge(policy.is_latest),
            ],
            &[24, 10, 12, 40, 6],
        );
    }

    if let Some(pagination) = view.pagination() {
        let pages = view
            .page_numbers()
            .iter()
            .map(|p| {
                if *p == pagination.page {
                    format!("[{}]", p)
                } else {
                    p.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!();
        ctx.output.kv(
            "Showing",
            &format!(
                "{}-{} of {}",
                pagination.start_item(),
                pagination.end_item(),
                pagination.total_items
            ),
        );
        ctx.output.kv("Pages", &pages);
    }

    Ok(())
}
