use crate::discussions::comments::search_comments_data;
use crate::discussions::get::get_discussion_data;
use crate::discussions::list::{list_discussions_data, ListParams};
use crate::discussions::search::{search_discussions_data, SearchParams};
use crate::discussions::{browse_by_source_data, extract_discussion_id};
use crate::prelude::eprintln;
use kaggletools_core::discussions::query::DEFAULT_PAGE_SIZE;
use kaggletools_core::discussions::render::{
    render_comment_list, render_discussion_list, render_resolution,
};
use kaggletools_core::discussions::DiscussionError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError, ToolContext};

fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::json!({}))).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

/// Bad caller input is an invalid-params error, anything else is internal
fn tool_error(error: DiscussionError) -> JsonRpcError {
    let code = match error {
        DiscussionError::UnknownVocabularyValue { .. } | DiscussionError::InvalidArgument(_) => {
            -32602
        }
        DiscussionError::RemoteCallFailed(_) => -32603,
    };
    JsonRpcError {
        code,
        message: format!("Tool execution error: {error}"),
        data: None,
    }
}

fn text_result(text: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_search(
    arguments: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SearchArgs {
        query: String,
        sort_by: Option<String>,
        source_type: Option<String>,
        write_up_type: Option<String>,
        mine_only: Option<bool>,
        page_size: Option<u32>,
    }

    let args: SearchArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling discussions_search: query={}, sort_by={:?}, source_type={:?}",
            args.query, args.sort_by, args.source_type
        );
    }

    let params = SearchParams {
        query: args.query,
        sort_by: args.sort_by,
        source_type: args.source_type,
        write_up_types: args.write_up_type,
        mine_only: args.mine_only.unwrap_or(false),
        page_size: args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let records = search_discussions_data(context.backend.as_ref(), params)
        .await
        .map_err(tool_error)?;

    text_result(render_discussion_list(&records))
}

pub async fn handle_list(
    arguments: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ListArgs {
        competition: Option<String>,
        dataset: Option<String>,
        page_size: Option<u32>,
        since_hours: Option<u32>,
        new_only: Option<bool>,
    }

    let args: ListArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling discussions_list: competition={:?}, dataset={:?}, since_hours={:?}",
            args.competition, args.dataset, args.since_hours
        );
    }

    let params = ListParams {
        competition: args.competition,
        dataset: args.dataset,
        page_size: args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        since_hours: args.since_hours.unwrap_or(0),
        new_only: args.new_only.unwrap_or(false),
    };

    let records = list_discussions_data(context.backend.as_ref(), params)
        .await
        .map_err(tool_error)?;

    text_result(render_discussion_list(&records))
}

pub async fn handle_detail(
    arguments: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    // Accepts both `42` and `"42"` or a discussion URL
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DiscussionRef {
        Number(u64),
        Text(String),
    }

    #[derive(Deserialize)]
    struct DetailArgs {
        id: DiscussionRef,
        context_hint: Option<String>,
        scrape_page: Option<bool>,
    }

    let args: DetailArgs = parse_arguments(arguments)?;

    let (id, url_competition) = match args.id {
        DiscussionRef::Number(id) => (id, None),
        DiscussionRef::Text(text) => extract_discussion_id(&text).map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        })?,
    };
    let context_hint = args.context_hint.or(url_competition);

    if context.global.verbose {
        eprintln!("Calling discussion_detail: id={id}, context_hint={context_hint:?}");
    }

    let resolution = get_discussion_data(
        context.backend.as_ref(),
        id,
        context_hint,
        args.scrape_page.unwrap_or(false),
    )
    .await;

    text_result(render_resolution(&resolution))
}

pub async fn handle_comments(
    arguments: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CommentsArgs {
        query: Option<String>,
        discussion_id: Option<u64>,
        page_size: Option<u32>,
    }

    let args: CommentsArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling discussion_comments: query={:?}, discussion_id={:?}",
            args.query, args.discussion_id
        );
    }

    let comments = search_comments_data(
        context.backend.as_ref(),
        args.query,
        args.discussion_id,
        args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await
    .map_err(tool_error)?;

    text_result(render_comment_list(&comments))
}

pub async fn handle_browse(
    arguments: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct BrowseArgs {
        source_type: String,
        query: Option<String>,
        sort_by: Option<String>,
        page_size: Option<u32>,
    }

    let args: BrowseArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling discussions_browse: source_type={}, query={:?}, sort_by={:?}",
            args.source_type, args.query, args.sort_by
        );
    }

    let records = browse_by_source_data(
        context.backend.as_ref(),
        &args.source_type,
        args.query,
        args.sort_by,
        args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await
    .map_err(tool_error)?;

    text_result(render_discussion_list(&records))
}
