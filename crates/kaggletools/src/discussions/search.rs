use crate::prelude::{eprintln, *};
use kaggletools_core::discussions::types::transform_documents;
use kaggletools_core::discussions::vocab::parse_optional;
use kaggletools_core::discussions::{
    clamp_page_size, DiscussionError, DiscussionRecord, ListScope, SearchQuery, SortBy,
    SourceType, WriteUpType,
};
use serde::{Deserialize, Serialize};

use super::{fetch_documents, non_blank, output_records, DiscussionBackend};

/// Options for searching discussion topics
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Search all forums:
  kaggletools discussions search \"target leakage\"

  # Most voted competition discussions:
  kaggletools discussions search \"ensembling\" --source-type competition --sort-by votes

  # Competition solution write-ups:
  kaggletools discussions search \"1st place\" --write-up-type competition_solution

  # Only your own topics:
  kaggletools discussions search \"lightgbm\" --mine

NOTES:
  - sort-by: hotness, votes, comments, created, updated
  - source-type: competition, dataset, kernel, site_forum, competition_solution,
    model, write_up, learn_track, benchmark, benchmark_task
  - write-up-type (comma separated): knowledge, competition_solution, hackathon,
    personal_project, forum_topic, blog")]
pub struct SearchOptions {
    /// Free-text query
    #[clap(env = "KAGGLE_DISCUSSION_QUERY")]
    pub query: String,

    /// Sort order
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Restrict to discussions attached to one kind of source
    #[arg(long)]
    pub source_type: Option<String>,

    /// Restrict to write-ups of these types (comma separated)
    #[arg(long)]
    pub write_up_type: Option<String>,

    /// Only topics you authored
    #[arg(long)]
    pub mine: bool,

    /// Maximum number of results (1-50)
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parameters accepted by [`search_discussions_data`]
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: String,
    pub sort_by: Option<String>,
    pub source_type: Option<String>,
    pub write_up_types: Option<String>,
    pub mine_only: bool,
    pub page_size: u32,
}

impl From<&SearchOptions> for SearchParams {
    fn from(options: &SearchOptions) -> Self {
        Self {
            query: options.query.clone(),
            sort_by: options.sort_by.clone(),
            source_type: options.source_type.clone(),
            write_up_types: options.write_up_type.clone(),
            mine_only: options.mine,
            page_size: options.limit,
        }
    }
}

/// Parse a comma separated list of write-up types
pub fn parse_write_up_types(value: Option<&str>) -> Result<Vec<WriteUpType>, DiscussionError> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| key.parse::<WriteUpType>())
        .collect()
}

/// Validate every filter and build the typed query
///
/// Runs before any remote call so a bad value never reaches the network.
pub fn search_query(params: &SearchParams) -> Result<SearchQuery, DiscussionError> {
    let order_by = parse_optional::<SortBy>(params.sort_by.as_deref())?;
    let source_type = parse_optional::<SourceType>(params.source_type.as_deref())?;
    let write_up_types = parse_write_up_types(params.write_up_types.as_deref())?;

    let list_scope = if params.mine_only {
        ListScope::OwnedByCaller
    } else {
        ListScope::All
    };

    Ok(SearchQuery {
        write_up_types,
        list_scope,
        ..SearchQuery::topics(non_blank(Some(params.query.clone())))
            .with_source_type(source_type)
            .with_order_by(order_by)
            .with_page_size(clamp_page_size(params.page_size))
    })
}

/// Public data function - used by both CLI and MCP
pub async fn search_discussions_data(
    backend: &dyn DiscussionBackend,
    params: SearchParams,
) -> Result<Vec<DiscussionRecord>, DiscussionError> {
    let query = search_query(&params)?;
    let documents = fetch_documents(backend, &query).await;
    Ok(transform_documents(documents))
}

pub async fn run(
    options: SearchOptions,
    backend: &dyn DiscussionBackend,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        eprintln!("Searching discussions: {:?}", options);
    }

    let records = search_discussions_data(backend, SearchParams::from(&options)).await?;

    output_records(
        &records,
        &format!("DISCUSSIONS MATCHING \"{}\"", options.query),
        options.json,
    )
}
