use crate::prelude::{eprintln, println, *};
use kaggletools_core::discussions::query::MAX_PAGE_SIZE;
use kaggletools_core::discussions::render::render_comment_list;
use kaggletools_core::discussions::types::transform_comments;
use kaggletools_core::discussions::{
    clamp_page_size, CommentRecord, DiscussionError, Resolution, ResolutionRequest, SearchQuery,
};
use serde::{Deserialize, Serialize};

use super::get::resolve_discussion;
use super::{fetch_documents, non_blank, DiscussionBackend};

/// Options for searching comments
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Comments mentioning a phrase:
  kaggletools discussions comments --query \"loss function\"

  # Comments of one discussion:
  kaggletools discussions comments --discussion-id 481234

  # Comments of one discussion mentioning a phrase:
  kaggletools discussions comments --discussion-id 481234 --query cv")]
pub struct CommentsOptions {
    /// Free-text query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only comments of this discussion
    #[arg(short, long)]
    pub discussion_id: Option<u64>,

    /// Maximum number of results (1-50)
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// With a discussion id the topic is resolved first and comments are matched
/// by its title; an unresolvable topic yields no comments. The query, when
/// also given, narrows those comments by body text.
pub async fn search_comments_data(
    backend: &dyn DiscussionBackend,
    query: Option<String>,
    discussion_id: Option<u64>,
    page_size: u32,
) -> Result<Vec<CommentRecord>, DiscussionError> {
    let page_size = clamp_page_size(page_size);
    let query = non_blank(query);

    let Some(id) = discussion_id else {
        let text = query.ok_or_else(|| {
            DiscussionError::InvalidArgument("either query or discussion_id is required".into())
        })?;
        let search = SearchQuery::comments(Some(text)).with_page_size(page_size);
        return Ok(transform_comments(fetch_documents(backend, &search).await));
    };

    let topic = match resolve_discussion(backend, &ResolutionRequest::new(id, None)).await {
        Resolution::Found(topic) => topic,
        Resolution::NotFoundWithHint { hint, .. } => {
            log::warn!("Cannot list comments: {hint}");
            return Ok(Vec::new());
        }
    };

    let search = SearchQuery::comments(Some(topic.title.clone())).with_page_size(MAX_PAGE_SIZE);
    let needle = query.map(|q| q.to_lowercase());

    Ok(transform_comments(fetch_documents(backend, &search).await)
        .into_iter()
        .filter(|c| c.topic_title == topic.title)
        .filter(|c| match (&needle, &c.body) {
            (None, _) => true,
            (Some(needle), Some(body)) => body.to_lowercase().contains(needle),
            (Some(_), None) => false,
        })
        .take(page_size as usize)
        .collect())
}

pub async fn run(
    options: CommentsOptions,
    backend: &dyn DiscussionBackend,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        eprintln!("Searching comments: {:?}", options);
    }

    let comments = search_comments_data(
        backend,
        options.query.clone(),
        options.discussion_id,
        options.limit,
    )
    .await?;

    if options.json {
        let json = serde_json::to_string_pretty(&comments)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", render_comment_list(&comments));
    }

    Ok(())
}
