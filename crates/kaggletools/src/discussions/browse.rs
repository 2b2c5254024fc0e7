use crate::prelude::{eprintln, *};
use kaggletools_core::discussions::types::transform_documents;
use kaggletools_core::discussions::{
    clamp_page_size, DiscussionError, DiscussionRecord, SearchQuery, SortBy, SourceType,
};
use serde::{Deserialize, Serialize};

use super::{fetch_documents, non_blank, output_records, DiscussionBackend};

/// Sort order applied when browsing without an explicit one
pub const DEFAULT_BROWSE_SORT: &str = "hotness";

/// Options for browsing discussions by source type
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Hottest competition write-ups:
  kaggletools discussions browse competition_solution

  # Newest model discussions mentioning a phrase:
  kaggletools discussions browse model --query gemma --sort-by created")]
pub struct BrowseOptions {
    /// Source type: competition, dataset, kernel, site_forum, competition_solution,
    /// model, write_up, learn_track, benchmark, benchmark_task
    #[arg(value_name = "SOURCE_TYPE")]
    pub source_type: String,

    /// Optional free-text query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort order: hotness, votes, comments, created, updated
    #[arg(long, default_value = DEFAULT_BROWSE_SORT)]
    pub sort_by: String,

    /// Maximum number of results (1-50)
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// The source type is required; an empty value is rejected like any other
/// unknown one.
pub async fn browse_by_source_data(
    backend: &dyn DiscussionBackend,
    source_type: &str,
    query: Option<String>,
    sort_by: Option<String>,
    page_size: u32,
) -> Result<Vec<DiscussionRecord>, DiscussionError> {
    let source_type: SourceType = source_type.parse()?;
    let sort_by: SortBy = non_blank(sort_by)
        .as_deref()
        .unwrap_or(DEFAULT_BROWSE_SORT)
        .parse()?;

    let search = SearchQuery::topics(non_blank(query))
        .with_source_type(Some(source_type))
        .with_order_by(Some(sort_by))
        .with_page_size(clamp_page_size(page_size));

    Ok(transform_documents(fetch_documents(backend, &search).await))
}

pub async fn run(
    options: BrowseOptions,
    backend: &dyn DiscussionBackend,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        eprintln!("Browsing discussions: {:?}", options);
    }

    let records = browse_by_source_data(
        backend,
        &options.source_type,
        options.query.clone(),
        Some(options.sort_by.clone()),
        options.limit,
    )
    .await?;

    output_records(
        &records,
        &format!(
            "{} DISCUSSIONS BY {}",
            options.source_type.to_uppercase(),
            options.sort_by.to_uppercase()
        ),
        options.json,
    )
}
