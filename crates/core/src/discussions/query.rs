//! Search query construction
//!
//! [`SearchQuery`] is the validated, typed form of a discussion search.
//! [`build`] turns it into the [`RemoteRequest`] body posted to the Kaggle
//! search service. Optional filters are omitted from the body entirely when
//! unset: the service treats an explicit empty value differently from an
//! absent one.

use serde::Serialize;

use super::vocab::{DocumentType, SortBy, SourceType, WriteUpType};

/// Page size used when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the public operations accept
pub const MAX_PAGE_SIZE: u32 = 50;

/// Which documents a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    All,
    OwnedByCaller,
}

/// Typed discussion search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub free_text: Option<String>,
    pub document_type: DocumentType,
    pub source_type: Option<SourceType>,
    pub write_up_types: Vec<WriteUpType>,
    pub list_scope: ListScope,
    pub page_size: u32,
    pub order_by: Option<SortBy>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            free_text: None,
            document_type: DocumentType::Topic,
            source_type: None,
            write_up_types: Vec::new(),
            list_scope: ListScope::All,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: None,
        }
    }
}

impl SearchQuery {
    /// Topic search for the given free text
    pub fn topics(free_text: Option<String>) -> Self {
        Self {
            free_text,
            ..Self::default()
        }
    }

    /// Comment search for the given free text
    pub fn comments(free_text: Option<String>) -> Self {
        Self {
            free_text,
            document_type: DocumentType::Comment,
            ..Self::default()
        }
    }

    pub fn with_source_type(mut self, source_type: Option<SourceType>) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_order_by(mut self, order_by: Option<SortBy>) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Request body for the `ListEntities` search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    pub filters: RemoteFilters,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_order_by: Option<SortBy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub document_types: Vec<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_filters: Option<DiscussionFilters>,
}

/// Discussion-specific sub-filter; only sent when at least one field is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub write_up_types: Vec<WriteUpType>,
}

/// Remote list type restricting results to the caller's own content
pub const LIST_TYPE_YOUR_WORK: &str = "LIST_TYPE_YOUR_WORK";

/// Build the remote request for a search query
///
/// Pure and deterministic. The page size is passed through unchanged; callers
/// that accept user input clamp it with [`clamp_page_size`] first.
pub fn build(query: &SearchQuery) -> RemoteRequest {
    let free_text = query
        .free_text
        .clone()
        .filter(|text| !text.trim().is_empty());

    let discussion_filters = if query.source_type.is_some() || !query.write_up_types.is_empty() {
        Some(DiscussionFilters {
            source_type: query.source_type,
            write_up_types: query.write_up_types.clone(),
        })
    } else {
        None
    };

    let list_type = match query.list_scope {
        ListScope::All => None,
        ListScope::OwnedByCaller => Some(LIST_TYPE_YOUR_WORK),
    };

    RemoteRequest {
        filters: RemoteFilters {
            query: free_text,
            document_types: vec![query.document_type],
            list_type,
            discussion_filters,
        },
        page_size: query.page_size,
        canonical_order_by: query.order_by,
    }
}

/// Clamp a caller-supplied page size into `1..=MAX_PAGE_SIZE`
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}
