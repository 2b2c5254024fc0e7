pub mod browse;
pub mod comments;
pub mod get;
pub mod list;
pub mod search;

#[cfg(test)]
pub mod testing;

use colored::Colorize;
use kaggletools_core::discussions::{
    build, DiscussionError, DiscussionRecord, RemoteDocument, RemoteRequest, SearchQuery,
};
use regex::Regex;

use crate::kaggle::KaggleClient;
use crate::prelude::{println, *};

// Re-export public data functions
pub use browse::browse_by_source_data;
pub use comments::search_comments_data;
pub use get::get_discussion_data;
pub use list::list_discussions_data;
pub use search::search_discussions_data;

/// Remote collaborator the discussion tools search through
///
/// Implemented by [`KaggleClient`]; tests substitute an in-memory double.
#[async_trait::async_trait]
pub trait DiscussionBackend: Send + Sync {
    /// Run one search request against the discussion index
    async fn search(&self, request: &RemoteRequest) -> Result<Vec<RemoteDocument>, DiscussionError>;

    /// Fetch a public page as HTML
    async fn fetch_page(&self, url: &str) -> Result<String, DiscussionError>;
}

#[derive(Debug, clap::Parser)]
#[command(name = "discussions")]
#[command(about = "Kaggle discussion operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search discussion topics by free text and filters
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// List discussions of a competition or dataset
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show one discussion by ID or URL
    #[clap(name = "get")]
    Get(get::GetOptions),

    /// Search comments by text or by discussion
    #[clap(name = "comments")]
    Comments(comments::CommentsOptions),

    /// Browse discussions attached to one kind of source
    #[clap(name = "browse")]
    Browse(browse::BrowseOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let client = KaggleClient::from_env()?;

    match app.command {
        Commands::Search(options) => search::run(options, &client, global).await,
        Commands::List(options) => list::run(options, &client, global).await,
        Commands::Get(options) => get::run(options, &client, global).await,
        Commands::Comments(options) => comments::run(options, &client, global).await,
        Commands::Browse(options) => browse::run(options, &client, global).await,
    }
}

/// Run one search, absorbing remote failures into an empty page
pub async fn fetch_documents(
    backend: &dyn DiscussionBackend,
    query: &SearchQuery,
) -> Vec<RemoteDocument> {
    let request = build(query);
    match backend.search(&request).await {
        Ok(documents) => documents,
        Err(e) => {
            log::warn!("Discussion search failed, returning no results: {e}");
            Vec::new()
        }
    }
}

/// Treat blank strings as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a discussion ID from a number or a discussion URL
///
/// Returns the ID and, for competition URLs, the competition slug.
pub fn extract_discussion_id(input: &str) -> Result<(u64, Option<String>)> {
    let input = input.trim();
    if let Ok(id) = input.parse::<u64>() {
        return Ok((id, None));
    }

    let re = Regex::new(r"/discussions?/(?:[\w-]+/)?(\d+)").unwrap();
    let id = re
        .captures(input)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| eyre!("Invalid discussion ID or URL: {}", input))?
        .as_str()
        .parse::<u64>()
        .map_err(|_| eyre!("Failed to parse discussion ID from URL"))?;

    let competition_re = Regex::new(r"/competitions/([\w-]+)/").unwrap();
    let competition = competition_re
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    Ok((id, competition))
}

/// Print discussion records as JSON or as a table
pub fn output_records(records: &[DiscussionRecord], heading: &str, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("\n{}\n", heading.bright_cyan().bold());

    if records.is_empty() {
        println!("{}", "No discussions found.".yellow());
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Title".bold().cyan(),
        "Votes".bold().cyan(),
        "Author".bold().cyan(),
        "Updated".bold().cyan()
    ]);
    for record in records {
        table.add_row(prettytable::row![
            record.id.to_string().bright_white(),
            record.title,
            record.vote_count.to_string().bright_yellow(),
            record.author_display_name.as_deref().unwrap_or("unknown"),
            record
                .updated_at
                .as_deref()
                .or(record.created_at.as_deref())
                .unwrap_or("unknown")
                .bright_black()
        ]);
    }
    table.printstd();

    println!(
        "\n{}: {}",
        "To read a discussion".green(),
        "kaggletools discussions get <id>".cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingBackend;
    use super::*;

    #[test]
    fn test_extract_discussion_id_number() {
        assert_eq!(extract_discussion_id("481234").unwrap(), (481234, None));
    }

    #[test]
    fn test_extract_discussion_id_competition_url() {
        let (id, competition) =
            extract_discussion_id("https://www.kaggle.com/competitions/titanic/discussion/12345")
                .unwrap();
        assert_eq!(id, 12345);
        assert_eq!(competition, Some("titanic".to_string()));
    }

    #[test]
    fn test_extract_discussion_id_general_url() {
        let (id, competition) =
            extract_discussion_id("https://www.kaggle.com/discussions/general/98765").unwrap();
        assert_eq!(id, 98765);
        assert_eq!(competition, None);

        let (id, _) = extract_discussion_id("https://www.kaggle.com/discussions/555").unwrap();
        assert_eq!(id, 555);
    }

    #[test]
    fn test_extract_discussion_id_invalid() {
        let err = extract_discussion_id("not-a-discussion").unwrap_err();
        assert!(err.to_string().contains("Invalid discussion ID or URL"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[tokio::test]
    async fn test_fetch_documents_absorbs_failures() {
        let backend = RecordingBackend::failing();

        let documents = fetch_documents(&backend, &SearchQuery::default()).await;

        assert!(documents.is_empty());
        assert_eq!(backend.calls(), 1);
    }
}
