use crate::prelude::{eprintln, *};
use chrono::{DateTime, Utc};
use kaggletools_core::discussions::types::transform_documents;
use kaggletools_core::discussions::window::{filter_by_age, WINDOW_FETCH_SIZE};
use kaggletools_core::discussions::{
    clamp_page_size, DiscussionError, DiscussionRecord, ReferenceField, SearchQuery, SortBy,
    SourceType, TimeWindowFilter,
};
use serde::{Deserialize, Serialize};

use super::{fetch_documents, non_blank, output_records, DiscussionBackend};

/// Options for listing discussions
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Discussions of a competition:
  kaggletools discussions list --competition titanic

  # Topics updated in the last 24 hours:
  kaggletools discussions list --competition titanic --since-hours 24

  # Topics created in the last 48 hours of a dataset:
  kaggletools discussions list --dataset uciml/iris --since-hours 48 --new-only

NOTES:
  Scoping is best-effort: the slug is searched as free text within competition
  (or dataset) forums, so a topic from another forum mentioning it can appear.")]
pub struct ListOptions {
    /// Competition slug (e.g. "titanic")
    #[arg(long)]
    pub competition: Option<String>,

    /// Dataset reference (e.g. "owner/dataset-slug"), ignored when --competition is set
    #[arg(long)]
    pub dataset: Option<String>,

    /// Maximum number of results (1-50)
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Only discussions active within the last N hours (0 disables the window)
    #[arg(long, default_value = "0")]
    pub since_hours: u32,

    /// Measure the window by creation time and list newest topics first
    #[arg(long)]
    pub new_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parameters accepted by [`list_discussions_data`]
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub competition: Option<String>,
    pub dataset: Option<String>,
    pub page_size: u32,
    pub since_hours: u32,
    pub new_only: bool,
}

impl From<&ListOptions> for ListParams {
    fn from(options: &ListOptions) -> Self {
        Self {
            competition: options.competition.clone(),
            dataset: options.dataset.clone(),
            page_size: options.limit,
            since_hours: options.since_hours,
            new_only: options.new_only,
        }
    }
}

/// Time window implied by the parameters, if any
pub fn time_window(params: &ListParams) -> Option<TimeWindowFilter> {
    if params.since_hours == 0 {
        return None;
    }
    let reference_field = if params.new_only {
        ReferenceField::CreatedAt
    } else {
        ReferenceField::UpdatedAt
    };
    Some(TimeWindowFilter::hours(reference_field, params.since_hours))
}

/// Build the typed query for a listing
///
/// A competition takes precedence over a dataset. The scope is the slug as free
/// text plus the matching source type, which the search service has no exact
/// filter for, so results are best-effort. With a time window the query
/// over-fetches so that filtering still leaves a full page.
pub fn list_query(params: &ListParams) -> SearchQuery {
    let (source_type, scope) = match (
        non_blank(params.competition.clone()),
        non_blank(params.dataset.clone()),
    ) {
        (Some(competition), _) => (Some(SourceType::Competition), Some(competition)),
        (None, Some(dataset)) => (Some(SourceType::Dataset), Some(dataset)),
        (None, None) => (None, None),
    };

    let order_by = if params.new_only {
        Some(SortBy::Created)
    } else if params.since_hours > 0 {
        Some(SortBy::Updated)
    } else {
        None
    };

    let page_size = if params.since_hours > 0 {
        WINDOW_FETCH_SIZE
    } else {
        clamp_page_size(params.page_size)
    };

    SearchQuery::topics(scope)
        .with_source_type(source_type)
        .with_order_by(order_by)
        .with_page_size(page_size)
}

/// Public data function - used by both CLI and MCP
pub async fn list_discussions_data(
    backend: &dyn DiscussionBackend,
    params: ListParams,
) -> Result<Vec<DiscussionRecord>, DiscussionError> {
    list_discussions_at(backend, params, Utc::now()).await
}

/// Same as [`list_discussions_data`] with an explicit current time
pub async fn list_discussions_at(
    backend: &dyn DiscussionBackend,
    params: ListParams,
    now: DateTime<Utc>,
) -> Result<Vec<DiscussionRecord>, DiscussionError> {
    let page_size = clamp_page_size(params.page_size) as usize;
    let query = list_query(&params);
    let records = transform_documents(fetch_documents(backend, &query).await);

    Ok(match time_window(&params) {
        Some(window) => filter_by_age(records, &window, now, page_size),
        None => records.into_iter().take(page_size).collect(),
    })
}

pub async fn run(
    options: ListOptions,
    backend: &dyn DiscussionBackend,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        eprintln!("Listing discussions: {:?}", options);
    }

    let heading = match (&options.competition, &options.dataset) {
        (Some(competition), _) => format!("DISCUSSIONS FOR COMPETITION {competition}"),
        (None, Some(dataset)) => format!("DISCUSSIONS FOR DATASET {dataset}"),
        (None, None) => "DISCUSSIONS".to_string(),
    };

    let records = list_discussions_data(backend, ListParams::from(&options)).await?;
    output_records(&records, &heading, options.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussions::testing::{doc, doc_updated, source_of, RecordingBackend};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn hours_ago(hours: i64) -> Option<String> {
        Some((now() - Duration::hours(hours)).to_rfc3339())
    }

    #[tokio::test]
    async fn test_since_hours_keeps_recent_topics() {
        let backend = RecordingBackend::returning(vec![
            doc_updated(1, hours_ago(1)),
            doc_updated(2, hours_ago(5)),
            doc_updated(3, hours_ago(25)),
            doc_updated(4, hours_ago(49)),
            doc_updated(5, None),
        ]);
        let params = ListParams {
            competition: Some("titanic".to_string()),
            page_size: 20,
            since_hours: 24,
            ..ListParams::default()
        };

        let records = list_discussions_at(&backend, params, now()).await.unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_since_hours_over_fetches_and_truncates() {
        let documents = (1..=30).map(|id| doc_updated(id, hours_ago(1))).collect();
        let backend = RecordingBackend::returning(documents);
        let params = ListParams {
            page_size: 10,
            since_hours: 24,
            ..ListParams::default()
        };

        let records = list_discussions_at(&backend, params, now()).await.unwrap();

        assert_eq!(records.len(), 10);
        assert_eq!(records[0].id, 1);
        let requests = backend.requests();
        let request = &requests[0];
        assert_eq!(request.page_size, WINDOW_FETCH_SIZE);
        assert_eq!(request.canonical_order_by, Some(SortBy::Updated));
    }

    #[tokio::test]
    async fn test_list_without_window_uses_page_size() {
        let backend = RecordingBackend::returning(vec![doc(1, "a"), doc(2, "b")]);
        let params = ListParams {
            dataset: Some("uciml/iris".to_string()),
            page_size: 20,
            ..ListParams::default()
        };

        let records = list_discussions_at(&backend, params, now()).await.unwrap();

        assert_eq!(records.len(), 2);
        let requests = backend.requests();
        let request = &requests[0];
        assert_eq!(request.page_size, 20);
        assert_eq!(source_of(request), Some(SourceType::Dataset));
        assert_eq!(request.filters.query.as_deref(), Some("uciml/iris"));
        assert_eq!(request.canonical_order_by, None);
    }

    #[tokio::test]
    async fn test_list_remote_failure_is_empty() {
        let backend = RecordingBackend::failing();
        let params = ListParams {
            competition: Some("titanic".to_string()),
            page_size: 20,
            since_hours: 24,
            ..ListParams::default()
        };

        let records = list_discussions_at(&backend, params, now()).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_list_query_competition_wins_over_dataset() {
        let query = list_query(&ListParams {
            competition: Some("titanic".to_string()),
            dataset: Some("uciml/iris".to_string()),
            page_size: 20,
            ..ListParams::default()
        });

        assert_eq!(query.source_type, Some(SourceType::Competition));
        assert_eq!(query.free_text.as_deref(), Some("titanic"));
    }

    #[test]
    fn test_list_query_unscoped() {
        let query = list_query(&ListParams {
            competition: Some(" ".to_string()),
            page_size: 20,
            ..ListParams::default()
        });

        assert_eq!(query.source_type, None);
        assert_eq!(query.free_text, None);
    }

    #[test]
    fn test_new_only_uses_creation_time() {
        let params = ListParams {
            since_hours: 48,
            new_only: true,
            page_size: 20,
            ..ListParams::default()
        };

        let window = time_window(&params).unwrap();
        assert_eq!(window.reference_field, ReferenceField::CreatedAt);
        assert_eq!(window.max_age, Duration::hours(48));
        assert_eq!(list_query(&params).order_by, Some(SortBy::Created));
    }

    #[test]
    fn test_zero_hours_disables_window() {
        let params = ListParams {
            page_size: 20,
            ..ListParams::default()
        };
        assert!(time_window(&params).is_none());
    }
}
