//! Remote search documents and the records derived from them

use serde::{Deserialize, Serialize};

/// Response body of the `ListEntities` search endpoint
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListEntitiesResponse {
    #[serde(default)]
    pub documents: Vec<RemoteDocument>,
    #[serde(default)]
    pub total_documents: Option<u64>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Single search hit as returned by the remote service
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub owner_user: Option<RemoteOwner>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub discussion_document: Option<RemoteDiscussionDocument>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOwner {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDiscussionDocument {
    #[serde(default)]
    pub message_markdown: Option<String>,
    #[serde(default)]
    pub message_stripped: Option<String>,
    #[serde(default)]
    pub forum_name: Option<String>,
}

/// Discussion topic as presented to callers
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DiscussionRecord {
    pub id: u64,
    pub title: String,
    pub vote_count: i64,
    pub author_display_name: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub source_forum_name: Option<String>,
    pub body_markdown: Option<String>,
}

/// Comment on a discussion topic
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: u64,
    /// Title of the topic the comment belongs to
    pub topic_title: String,
    pub vote_count: i64,
    pub author_display_name: Option<String>,
    pub created_at: Option<String>,
    pub body: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<RemoteDocument> for DiscussionRecord {
    fn from(doc: RemoteDocument) -> Self {
        let discussion = doc.discussion_document.unwrap_or_default();
        // Markdown is preferred; stripped text is what the index returns for older topics
        let body_markdown = non_empty(discussion.message_markdown)
            .or_else(|| non_empty(discussion.message_stripped));

        DiscussionRecord {
            id: doc.id,
            title: doc.title,
            vote_count: doc.votes,
            author_display_name: doc.owner_user.and_then(|o| non_empty(o.display_name)),
            created_at: non_empty(doc.create_time),
            updated_at: non_empty(doc.update_time),
            source_forum_name: non_empty(discussion.forum_name),
            body_markdown,
        }
    }
}

impl From<RemoteDocument> for CommentRecord {
    fn from(doc: RemoteDocument) -> Self {
        let discussion = doc.discussion_document.unwrap_or_default();
        let body =
            non_empty(discussion.message_stripped).or_else(|| non_empty(discussion.message_markdown));

        CommentRecord {
            id: doc.id,
            topic_title: doc.title,
            vote_count: doc.votes,
            author_display_name: doc.owner_user.and_then(|o| non_empty(o.display_name)),
            created_at: non_empty(doc.create_time),
            body,
        }
    }
}

/// Convert remote documents into discussion records, preserving order
pub fn transform_documents(documents: Vec<RemoteDocument>) -> Vec<DiscussionRecord> {
    documents.into_iter().map(DiscussionRecord::from).collect()
}

/// Convert remote documents into comment records, preserving order
pub fn transform_comments(documents: Vec<RemoteDocument>) -> Vec<CommentRecord> {
    documents.into_iter().map(CommentRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_RESPONSE: &str = r#"{
        "documents": [
            {
                "id": 481234,
                "title": "1st place solution",
                "votes": 312,
                "ownerUser": { "displayName": "Grandmaster" },
                "createTime": "2024-03-01T10:00:00Z",
                "updateTime": "2024-03-02T08:30:00.250Z",
                "documentType": "TOPIC",
                "discussionDocument": {
                    "messageMarkdown": "We used **stacking**.",
                    "messageStripped": "We used stacking.",
                    "forumName": "LLM Science Exam"
                }
            },
            { "id": 7 }
        ],
        "totalDocuments": 2
    }"#;

    #[test]
    fn test_parse_list_entities_response() {
        let response: ListEntitiesResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();

        assert_eq!(response.documents.len(), 2);
        assert_eq!(response.total_documents, Some(2));
        assert_eq!(response.next_page_token, None);
    }

    #[test]
    fn test_transform_documents_full() {
        let response: ListEntitiesResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();
        let records = transform_documents(response.documents);

        assert_eq!(
            records[0],
            DiscussionRecord {
                id: 481234,
                title: "1st place solution".to_string(),
                vote_count: 312,
                author_display_name: Some("Grandmaster".to_string()),
                created_at: Some("2024-03-01T10:00:00Z".to_string()),
                updated_at: Some("2024-03-02T08:30:00.250Z".to_string()),
                source_forum_name: Some("LLM Science Exam".to_string()),
                body_markdown: Some("We used **stacking**.".to_string()),
            }
        );
    }

    #[test]
    fn test_transform_documents_minimal() {
        let response: ListEntitiesResponse = serde_json::from_str(SEARCH_RESPONSE).unwrap();
        let records = transform_documents(response.documents);

        let minimal = &records[1];
        assert_eq!(minimal.id, 7);
        assert_eq!(minimal.title, "");
        assert_eq!(minimal.vote_count, 0);
        assert_eq!(minimal.author_display_name, None);
        assert_eq!(minimal.body_markdown, None);
    }

    #[test]
    fn test_body_falls_back_to_stripped_text() {
        let doc = RemoteDocument {
            id: 1,
            discussion_document: Some(RemoteDiscussionDocument {
                message_markdown: Some("".to_string()),
                message_stripped: Some("plain text".to_string()),
                forum_name: None,
            }),
            ..RemoteDocument::default()
        };

        let record = DiscussionRecord::from(doc);
        assert_eq!(record.body_markdown, Some("plain text".to_string()));
    }

    #[test]
    fn test_transform_comments() {
        let doc = RemoteDocument {
            id: 99,
            title: "Validation strategy".to_string(),
            votes: 4,
            owner_user: Some(RemoteOwner {
                display_name: Some("kaggler".to_string()),
            }),
            create_time: Some("2024-01-01T00:00:00Z".to_string()),
            document_type: Some("COMMENT".to_string()),
            discussion_document: Some(RemoteDiscussionDocument {
                message_markdown: Some("Use *GroupKFold*".to_string()),
                message_stripped: Some("Use GroupKFold".to_string()),
                forum_name: None,
            }),
            ..RemoteDocument::default()
        };

        let comments = transform_comments(vec![doc]);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].topic_title, "Validation strategy");
        assert_eq!(comments[0].author_display_name, Some("kaggler".to_string()));
        assert_eq!(comments[0].body, Some("Use GroupKFold".to_string()));
    }
}
