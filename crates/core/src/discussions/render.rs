//! Plain text projections of discussion results

use super::resolve::Resolution;
use super::types::{CommentRecord, DiscussionRecord};

/// Longest body excerpt shown in list output
const EXCERPT_LEN: usize = 200;

fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

fn title_or_default(title: &str) -> &str {
    if title.trim().is_empty() {
        "Untitled"
    } else {
        title
    }
}

/// Render a list of discussions, one entry per topic
pub fn render_discussion_list(records: &[DiscussionRecord]) -> String {
    if records.is_empty() {
        return "No discussions found.".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "- [{}] **{}** (votes: {})\n",
            record.id,
            title_or_default(&record.title),
            record.vote_count
        ));

        let mut meta = Vec::new();
        if let Some(author) = &record.author_display_name {
            meta.push(format!("by {author}"));
        }
        if let Some(forum) = &record.source_forum_name {
            meta.push(format!("in {forum}"));
        }
        match (&record.updated_at, &record.created_at) {
            (Some(updated), _) => meta.push(format!("updated {updated}")),
            (None, Some(created)) => meta.push(format!("created {created}")),
            (None, None) => {}
        }
        if !meta.is_empty() {
            out.push_str(&format!("  {}\n", meta.join(" | ")));
        }
        if let Some(body) = &record.body_markdown {
            out.push_str(&format!("  {}\n", excerpt(body, EXCERPT_LEN)));
        }
    }
    out.trim_end().to_string()
}

/// Render a single discussion with its full body
pub fn render_discussion(record: &DiscussionRecord) -> String {
    let mut out = format!("# {}\n", title_or_default(&record.title));
    out.push_str(&format!("ID: {}\n", record.id));
    out.push_str(&format!(
        "Author: {}\n",
        record.author_display_name.as_deref().unwrap_or("Unknown")
    ));
    if let Some(forum) = &record.source_forum_name {
        out.push_str(&format!("Forum: {forum}\n"));
    }
    out.push_str(&format!("Votes: {}\n", record.vote_count));
    if let Some(created) = &record.created_at {
        out.push_str(&format!("Created: {created}\n"));
    }
    if let Some(updated) = &record.updated_at {
        out.push_str(&format!("Updated: {updated}\n"));
    }
    out.push('\n');
    out.push_str(record.body_markdown.as_deref().unwrap_or("No content"));
    out
}

pub fn render_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Found(record) => render_discussion(record),
        Resolution::NotFoundWithHint { hint, .. } => hint.clone(),
    }
}

/// Render comments separated by horizontal rules
pub fn render_comment_list(comments: &[CommentRecord]) -> String {
    if comments.is_empty() {
        return "No comments found.".to_string();
    }

    comments
        .iter()
        .map(|c| {
            format!(
                "**{}** on \"{}\" (votes: {}, id: {}):\n{}\n",
                c.author_display_name.as_deref().unwrap_or("?"),
                title_or_default(&c.topic_title),
                c.vote_count,
                c.id,
                c.body.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}
