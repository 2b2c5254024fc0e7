//! In-memory backend for exercising the discussion tools without the network

use std::collections::HashMap;
use std::sync::Mutex;

use kaggletools_core::discussions::types::RemoteDiscussionDocument;
use kaggletools_core::discussions::{
    DiscussionError, RemoteDocument, RemoteRequest, SourceType,
};

use super::DiscussionBackend;

type Responder =
    Box<dyn Fn(&RemoteRequest) -> Result<Vec<RemoteDocument>, DiscussionError> + Send + Sync>;

/// Backend double that answers with a closure and records every request
pub struct RecordingBackend {
    responder: Responder,
    pages: HashMap<String, String>,
    requests: Mutex<Vec<RemoteRequest>>,
    page_requests: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RemoteRequest) -> Result<Vec<RemoteDocument>, DiscussionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
        }
    }

    /// Every search returns the same documents
    pub fn returning(documents: Vec<RemoteDocument>) -> Self {
        Self::new(move |_| Ok(documents.clone()))
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    /// Every search fails at the transport level
    pub fn failing() -> Self {
        Self::new(|_| Err(DiscussionError::RemoteCallFailed("connection reset".to_string())))
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Number of search calls made so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn page_calls(&self) -> usize {
        self.page_requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DiscussionBackend for RecordingBackend {
    async fn search(&self, request: &RemoteRequest) -> Result<Vec<RemoteDocument>, DiscussionError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, DiscussionError> {
        self.page_requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DiscussionError::RemoteCallFailed(format!("HTTP 404 for {url}")))
    }
}

/// Source type a recorded request was scoped to
pub fn source_of(request: &RemoteRequest) -> Option<SourceType> {
    request
        .filters
        .discussion_filters
        .as_ref()
        .and_then(|f| f.source_type)
}

pub fn doc(id: u64, title: &str) -> RemoteDocument {
    RemoteDocument {
        id,
        title: title.to_string(),
        votes: 1,
        ..RemoteDocument::default()
    }
}

/// Topic document updated at the given RFC 3339 time
pub fn doc_updated(id: u64, update_time: Option<String>) -> RemoteDocument {
    RemoteDocument {
        update_time,
        ..doc(id, &format!("Topic {id}"))
    }
}

/// Comment document on the topic with the given title
pub fn comment(id: u64, topic_title: &str, body: &str) -> RemoteDocument {
    RemoteDocument {
        document_type: Some("COMMENT".to_string()),
        discussion_document: Some(RemoteDiscussionDocument {
            message_markdown: None,
            message_stripped: Some(body.to_string()),
            forum_name: None,
        }),
        ..doc(id, topic_title)
    }
}
