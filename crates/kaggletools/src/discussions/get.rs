use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use kaggletools_core::discussions::page::extract_page_title;
use kaggletools_core::discussions::render::render_discussion;
use kaggletools_core::discussions::resolve::{
    discussion_url, find_by_id, not_found, resolution_plan, with_page_title,
};
use kaggletools_core::discussions::{Resolution, ResolutionRequest};
use serde::{Deserialize, Serialize};

use super::{extract_discussion_id, fetch_documents, non_blank, DiscussionBackend};

/// Options for showing one discussion
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "NOTES:
  Kaggle has no direct lookup by discussion ID, so the discussion is located by
  searching competition, dataset and notebook forums in turn. Pass --competition
  (or a competition discussion URL) to search that competition first. A miss
  prints a direct link; the discussion may still exist.")]
pub struct GetOptions {
    /// Discussion ID or URL (e.g. "481234" or "https://www.kaggle.com/competitions/titanic/discussion/481234")
    #[clap(env = "KAGGLE_DISCUSSION")]
    pub discussion: String,

    /// Competition slug used as a search hint
    #[arg(long)]
    pub competition: Option<String>,

    /// On a miss, fetch the discussion page and report its title
    #[arg(long)]
    pub scrape: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Locate a discussion by id with the ordered fallback searches
///
/// Best-effort: issues at most one search per plan entry and stops at the first
/// page containing the id. Remote failures count as a miss for that entry.
pub async fn resolve_discussion(
    backend: &dyn DiscussionBackend,
    request: &ResolutionRequest,
) -> Resolution {
    for query in resolution_plan(request) {
        log::debug!(
            "Looking for discussion {} in {:?} forums",
            request.target_id,
            query.source_type
        );
        let documents = fetch_documents(backend, &query).await;
        if let Some(record) = find_by_id(documents, request.target_id) {
            return Resolution::Found(record);
        }
    }
    not_found(request)
}

/// Public data function - used by both CLI and MCP
///
/// With `scrape_page` set, a miss is followed by one fetch of the public
/// discussion page; a meaningful page title is added to the hint.
pub async fn get_discussion_data(
    backend: &dyn DiscussionBackend,
    id: u64,
    context_hint: Option<String>,
    scrape_page: bool,
) -> Resolution {
    let request = ResolutionRequest::new(id, non_blank(context_hint));
    let resolution = resolve_discussion(backend, &request).await;

    if !scrape_page || matches!(resolution, Resolution::Found(_)) {
        return resolution;
    }

    let url = discussion_url(id, request.context_hint.as_deref());
    match backend.fetch_page(&url).await {
        Ok(html) => match extract_page_title(&html) {
            Some(title) => with_page_title(resolution, &title),
            None => resolution,
        },
        Err(e) => {
            log::warn!("Discussion page fallback failed for {id}: {e}");
            resolution
        }
    }
}

pub async fn run(
    options: GetOptions,
    backend: &dyn DiscussionBackend,
    global: crate::Global,
) -> Result<()> {
    let (id, url_competition) = extract_discussion_id(&options.discussion)?;
    let hint = non_blank(options.competition.clone()).or(url_competition);

    if global.verbose {
        eprintln!("Resolving discussion {id} (hint: {:?})", hint);
    }

    let resolution = get_discussion_data(backend, id, hint, options.scrape).await;

    if options.json {
        let json = serde_json::to_string_pretty(&resolution)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    match &resolution {
        Resolution::Found(record) => println!("{}", render_discussion(record)),
        Resolution::NotFoundWithHint { hint, .. } => println!("{}", hint.yellow()),
    }

    Ok(())
}
