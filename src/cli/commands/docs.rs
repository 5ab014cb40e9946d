//! Document link command handlers

use super::{fail, or_fail, AppContext};
use crate::args::DocsSubcommand;
use cgpa_tracker::core::api::DocumentStore;
use cgpa_tracker::core::models::document::validate_url;
use cgpa_tracker::core::models::{DocumentKind, DocumentLink};
use cgpa_tracker::info;

/// Dispatch docs subcommands
pub fn run(ctx: &AppContext, subcommand: DocsSubcommand) {
    match subcommand {
        DocsSubcommand::Add { kind, title, url } => {
            let kind = parse_kind(&kind);
            let link = DocumentLink::new(kind, &title, &url, ctx.registration_id())
                .unwrap_or_else(|e| fail(e));
            or_fail(ctx.client().add_document(&link), "add link");
            info!("Added {kind} link '{}'", link.title);
            println!("✓ Added {kind} '{}'", link.title);
        }
        DocsSubcommand::List { kind } => {
            let kinds = match kind {
                Some(k) => vec![parse_kind(&k)],
                None => vec![DocumentKind::Certificate, DocumentKind::Resume],
            };
            handle_list(ctx, &kinds);
        }
        DocsSubcommand::Edit {
            kind,
            id,
            title,
            url,
        } => handle_edit(ctx, parse_kind(&kind), &id, title.as_deref(), url.as_deref()),
        DocsSubcommand::Delete { kind, id } => {
            let kind = parse_kind(&kind);
            or_fail(ctx.client().delete_document(kind, &id), "delete link");
            println!("✓ Deleted {kind} {id}");
        }
    }
}

fn parse_kind(raw: &str) -> DocumentKind {
    raw.parse().unwrap_or_else(|e: String| fail(e))
}

fn handle_list(ctx: &AppContext, kinds: &[DocumentKind]) {
    let reg = ctx.registration_id();
    let client = ctx.client();
    for kind in kinds {
        let links = or_fail(client.list_documents(*kind, &reg), "fetch links");
        println!("{kind}s ({}):", links.len());
        for link in &links {
            println!(
                "  {:<26} {}  {}",
                link.id.as_deref().unwrap_or("-"),
                link.title,
                link.url
            );
        }
    }
}

/// Apply a new title and/or URL to `link`.
///
/// # Errors
/// Returns an error when nothing changes, the title is blank, or the URL is invalid.
pub fn apply_edit(
    link: &mut DocumentLink,
    title: Option<&str>,
    url: Option<&str>,
) -> Result<(), String> {
    if title.is_none() && url.is_none() {
        return Err("Nothing to change. Pass --title and/or --url".to_string());
    }
    if let Some(title) = title {
        let title = title.trim();
        if title.is_empty() {
            return Err(format!("A {} link needs a title", link.kind));
        }
        link.title = title.to_string();
    }
    if let Some(url) = url {
        link.url = validate_url(url)?;
    }
    Ok(())
}

fn handle_edit(
    ctx: &AppContext,
    kind: DocumentKind,
    id: &str,
    title: Option<&str>,
    url: Option<&str>,
) {
    let reg = ctx.registration_id();
    let client = ctx.client();
    let links = or_fail(client.list_documents(kind, &reg), "fetch links");
    let Some(mut link) = links.into_iter().find(|l| l.id.as_deref() == Some(id)) else {
        fail(format!("No {kind} with id '{id}' for {reg}"));
    };
    if let Err(e) = apply_edit(&mut link, title, url) {
        fail(e);
    }
    or_fail(client.edit_document(&link), "edit link");
    println!("✓ Updated {kind} {id}");
}
