//! Best-effort resolution of a discussion by numeric id
//!
//! The search service has no reliable point lookup, so a discussion is located
//! by running a short, ordered list of searches and scanning each result page
//! for the id. [`resolution_plan`] produces that list; the caller evaluates it
//! left to right and stops at the first match. Failing to find an id does not
//! mean it does not exist, which is why a miss is reported as
//! [`Resolution::NotFoundWithHint`] rather than an empty result.

use serde::Serialize;

use super::query::{SearchQuery, MAX_PAGE_SIZE};
use super::types::{DiscussionRecord, RemoteDocument};
use super::vocab::SourceType;

/// Public site root used to build direct links
pub const KAGGLE_SITE: &str = "https://www.kaggle.com";

/// Source types scanned in order; `None` is an unscoped search
pub const RESOLUTION_ORDER: [Option<SourceType>; 4] = [
    Some(SourceType::Competition),
    Some(SourceType::Dataset),
    Some(SourceType::Kernel),
    None,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub target_id: u64,
    pub context_hint: Option<String>,
}

impl ResolutionRequest {
    pub fn new(target_id: u64, context_hint: Option<String>) -> Self {
        let context_hint = context_hint
            .map(|hint| hint.trim().to_string())
            .filter(|hint| !hint.is_empty());
        Self {
            target_id,
            context_hint,
        }
    }
}

/// Outcome of a resolution attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found(DiscussionRecord),
    NotFoundWithHint { id: u64, hint: String },
}

/// Ordered candidate searches for a resolution request
///
/// With a context hint the competition-scoped hint search runs first. Duplicate
/// candidates are skipped, so the plan never holds more than
/// `RESOLUTION_ORDER.len()` entries.
pub fn resolution_plan(request: &ResolutionRequest) -> Vec<SearchQuery> {
    let candidate = |source_type: Option<SourceType>| {
        SearchQuery::topics(request.context_hint.clone())
            .with_source_type(source_type)
            .with_page_size(MAX_PAGE_SIZE)
    };

    let mut plan = Vec::with_capacity(RESOLUTION_ORDER.len());
    if request.context_hint.is_some() {
        plan.push(candidate(Some(SourceType::Competition)));
    }
    for source_type in RESOLUTION_ORDER {
        let query = candidate(source_type);
        if !plan.contains(&query) {
            plan.push(query);
        }
    }
    plan
}

/// Find the document with the given id and convert it
pub fn find_by_id(documents: Vec<RemoteDocument>, target_id: u64) -> Option<DiscussionRecord> {
    documents
        .into_iter()
        .find(|doc| doc.id == target_id)
        .map(DiscussionRecord::from)
}

/// Direct link to a discussion, scoped to a competition when one is known
pub fn discussion_url(id: u64, context_hint: Option<&str>) -> String {
    match context_hint {
        Some(slug) => format!("{KAGGLE_SITE}/competitions/{slug}/discussion/{id}"),
        None => format!("{KAGGLE_SITE}/discussions/{id}"),
    }
}

/// Miss outcome carrying a direct link the caller can open instead
pub fn not_found(request: &ResolutionRequest) -> Resolution {
    let id = request.target_id;
    let url = discussion_url(id, request.context_hint.as_deref());
    Resolution::NotFoundWithHint {
        id,
        hint: format!(
            "Discussion {id} could not be located through search. It may still exist; open it directly: {url}"
        ),
    }
}

/// Append the title scraped from the discussion page to a miss
pub fn with_page_title(resolution: Resolution, title: &str) -> Resolution {
    match resolution {
        Resolution::NotFoundWithHint { id, hint } => Resolution::NotFoundWithHint {
            id,
            hint: format!("{hint}\nThe page exists with title: \"{title}\""),
        },
        found => found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u64, title: &str) -> RemoteDocument {
        RemoteDocument {
            id,
            title: title.to_string(),
            ..RemoteDocument::default()
        }
    }

    #[test]
    fn test_plan_without_hint_follows_fixed_order() {
        let plan = resolution_plan(&ResolutionRequest::new(42, None));
        let sources: Vec<_> = plan.iter().map(|q| q.source_type).collect();

        assert_eq!(sources, RESOLUTION_ORDER.to_vec());
        assert!(plan.iter().all(|q| q.free_text.is_none()));
        assert!(plan.iter().all(|q| q.page_size == MAX_PAGE_SIZE));
    }

    #[test]
    fn test_plan_with_hint_starts_with_competition_and_stays_bounded() {
        let request = ResolutionRequest::new(42, Some("titanic".to_string()));
        let plan = resolution_plan(&request);

        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0].source_type, Some(SourceType::Competition));
        assert!(plan
            .iter()
            .all(|q| q.free_text.as_deref() == Some("titanic")));
    }

    #[test]
    fn test_blank_hint_is_ignored() {
        let request = ResolutionRequest::new(5, Some("   ".to_string()));
        assert_eq!(request.context_hint, None);
    }

    #[test]
    fn test_find_by_id() {
        let docs = vec![doc(1, "a"), doc(42, "answer"), doc(3, "c")];

        let found = find_by_id(docs.clone(), 42).unwrap();
        assert_eq!(found.title, "answer");
        assert!(find_by_id(docs, 9).is_none());
    }

    #[test]
    fn test_not_found_hint_contains_id_and_url() {
        let resolution = not_found(&ResolutionRequest::new(99, None));

        match resolution {
            Resolution::NotFoundWithHint { id, hint } => {
                assert_eq!(id, 99);
                assert!(hint.contains("99"));
                assert!(hint.contains("https://www.kaggle.com/discussions/99"));
            }
            other => panic!("expected miss, got {other:?}"),
        }
    }

    #[test]
    fn test_discussion_url_with_competition() {
        assert_eq!(
            discussion_url(12, Some("titanic")),
            "https://www.kaggle.com/competitions/titanic/discussion/12"
        );
    }

    #[test]
    fn test_with_page_title_only_touches_misses() {
        let miss = with_page_title(not_found(&ResolutionRequest::new(7, None)), "Some topic");
        match miss {
            Resolution::NotFoundWithHint { hint, .. } => assert!(hint.contains("Some topic")),
            other => panic!("expected miss, got {other:?}"),
        }

        let found = Resolution::Found(DiscussionRecord::from(doc(7, "t")));
        assert_eq!(with_page_title(found.clone(), "ignored"), found);
    }

    #[test]
    fn test_resolution_serializes_with_status_tag() {
        let json = serde_json::to_value(not_found(&ResolutionRequest::new(3, None))).unwrap();
        assert_eq!(json["status"], "not_found_with_hint");
        assert_eq!(json["id"], 3);
    }
}
