mod discussions;

use kaggletools_core::discussions::{SortBy, SourceType, WriteUpType};
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool, ToolContext};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "kaggletools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let sort_by = SortBy::keys();
    let source_types = SourceType::keys();
    let write_up_types = WriteUpType::keys();

    let tools = vec![
        Tool {
            name: "discussions_search".to_string(),
            description: "Search Kaggle discussion topics by free text. Optional filters narrow the search to one source type (competition, dataset, notebook forums and more), to write-up types, or to topics you authored. Returns a numbered list with id, title, votes, author, dates and an excerpt. Requires KAGGLE_USERNAME and KAGGLE_KEY or a kaggle.json credentials file.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Free-text query"
                    },
                    "sort_by": {
                        "type": "string",
                        "description": "Sort order (default: relevance)",
                        "enum": sort_by
                    },
                    "source_type": {
                        "type": "string",
                        "description": "Restrict to discussions attached to one kind of source",
                        "enum": source_types
                    },
                    "write_up_type": {
                        "type": "string",
                        "description": format!("Comma separated write-up types: {}", write_up_types.join(", "))
                    },
                    "mine_only": {
                        "type": "boolean",
                        "description": "Only topics authored by the authenticated user (default: false)"
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Maximum number of results (default: 20, max: 50)"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "discussions_list".to_string(),
            description: "List discussions of a Kaggle competition or dataset. Scoping is best-effort: the slug is searched as free text within competition (or dataset) forums, so a topic from another forum that mentions the slug can appear. With since_hours, only topics updated (or, with new_only, created) within that many hours are returned; topics without a timestamp are left out.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "competition": {
                        "type": "string",
                        "description": "Competition slug (e.g., 'titanic'). Takes precedence over dataset."
                    },
                    "dataset": {
                        "type": "string",
                        "description": "Dataset reference (e.g., 'owner/dataset-slug')"
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Maximum number of results (default: 20, max: 50)"
                    },
                    "since_hours": {
                        "type": "number",
                        "description": "Only discussions active within the last N hours (default: 0, no window)"
                    },
                    "new_only": {
                        "type": "boolean",
                        "description": "Measure the window by creation time and list newest topics first (default: false)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "discussion_detail".to_string(),
            description: "Show one Kaggle discussion by ID or URL. Kaggle has no direct lookup by ID, so competition, dataset and notebook forums are searched in turn (at most 4 searches). When the discussion cannot be located the result explains why and gives a direct link to open.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Discussion ID (e.g., '481234') or discussion URL"
                    },
                    "context_hint": {
                        "type": "string",
                        "description": "Competition slug to search first (e.g., 'titanic')"
                    },
                    "scrape_page": {
                        "type": "boolean",
                        "description": "On a miss, fetch the public discussion page and report its title (default: false)"
                    }
                },
                "required": ["id"]
            }),
        },
        Tool {
            name: "discussion_comments".to_string(),
            description: "Search Kaggle discussion comments by free text, or list the comments of one discussion. Give a query, a discussion_id, or both to narrow a discussion's comments by text.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Free-text query"
                    },
                    "discussion_id": {
                        "type": "number",
                        "description": "Only comments of this discussion"
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Maximum number of results (default: 20, max: 50)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "discussions_browse".to_string(),
            description: "Browse Kaggle discussions attached to one kind of source, such as competition solution write-ups or model forums, ordered by hotness unless another sort order is given.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "source_type": {
                        "type": "string",
                        "description": "Kind of source the discussions belong to",
                        "enum": source_types
                    },
                    "query": {
                        "type": "string",
                        "description": "Optional free-text query"
                    },
                    "sort_by": {
                        "type": "string",
                        "description": "Sort order (default: hotness)",
                        "enum": sort_by
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Maximum number of results (default: 20, max: 50)"
                    }
                },
                "required": ["source_type"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    context: &ToolContext,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "discussions_search" => discussions::handle_search(params.arguments, context).await,
        "discussions_list" => discussions::handle_list(params.arguments, context).await,
        "discussion_detail" => discussions::handle_detail(params.arguments, context).await,
        "discussion_comments" => discussions::handle_comments(params.arguments, context).await,
        "discussions_browse" => discussions::handle_browse(params.arguments, context).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
