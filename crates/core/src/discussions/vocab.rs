//! Closed vocabularies accepted by the discussion tools
//!
//! Every vocabulary is an enum with a total mapping between the user-facing key
//! (what a caller types, e.g. `competition`) and the enumerant the Kaggle search
//! service expects (e.g. `SEARCH_DISCUSSIONS_SOURCE_TYPE_COMPETITION`). Parsing
//! an unknown key fails with [`DiscussionError::UnknownVocabularyValue`], which
//! lists every valid key.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::DiscussionError;

/// Declares a vocabulary enum together with its key and remote mappings.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $key:literal, $remote:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Name of the vocabulary, used in error messages
            pub const LABEL: &'static str = $label;

            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// User-facing key
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Identifier sent to the remote search service
            pub fn remote(self) -> &'static str {
                match self {
                    $($name::$variant => $remote,)+
                }
            }

            /// All user-facing keys, in declaration order
            pub fn keys() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.key()).collect()
            }
        }

        impl FromStr for $name {
            type Err = DiscussionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == wanted)
                    .ok_or_else(|| DiscussionError::UnknownVocabularyValue {
                        vocabulary: Self::LABEL,
                        value: s.to_string(),
                        valid: Self::keys(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.remote())
            }
        }
    };
}

vocabulary! {
    /// Ordering directive for discussion searches
    SortBy, "sort_by" {
        Hotness => "hotness", "LIST_SEARCH_CONTENT_ORDER_BY_HOTNESS";
        Votes => "votes", "LIST_SEARCH_CONTENT_ORDER_BY_VOTE_COUNT";
        Comments => "comments", "LIST_SEARCH_CONTENT_ORDER_BY_COMMENT_COUNT";
        Created => "created", "LIST_SEARCH_CONTENT_ORDER_BY_DATE_CREATED";
        Updated => "updated", "LIST_SEARCH_CONTENT_ORDER_BY_DATE_UPDATED";
    }
}

vocabulary! {
    /// Kind of entity a discussion is attached to
    SourceType, "source_type" {
        Competition => "competition", "SEARCH_DISCUSSIONS_SOURCE_TYPE_COMPETITION";
        Dataset => "dataset", "SEARCH_DISCUSSIONS_SOURCE_TYPE_DATASET";
        Kernel => "kernel", "SEARCH_DISCUSSIONS_SOURCE_TYPE_KERNEL";
        SiteForum => "site_forum", "SEARCH_DISCUSSIONS_SOURCE_TYPE_SITE_FORUM";
        CompetitionSolution => "competition_solution", "SEARCH_DISCUSSIONS_SOURCE_TYPE_COMPETITION_SOLUTION";
        Model => "model", "SEARCH_DISCUSSIONS_SOURCE_TYPE_MODEL";
        WriteUp => "write_up", "SEARCH_DISCUSSIONS_SOURCE_TYPE_WRITE_UP";
        LearnTrack => "learn_track", "SEARCH_DISCUSSIONS_SOURCE_TYPE_LEARN_TRACK";
        Benchmark => "benchmark", "SEARCH_DISCUSSIONS_SOURCE_TYPE_BENCHMARK";
        BenchmarkTask => "benchmark_task", "SEARCH_DISCUSSIONS_SOURCE_TYPE_BENCHMARK_TASK";
    }
}

vocabulary! {
    /// Category of a long-form write-up
    WriteUpType, "write_up_type" {
        Knowledge => "knowledge", "WRITE_UP_TYPE_KNOWLEDGE";
        CompetitionSolution => "competition_solution", "WRITE_UP_TYPE_COMPETITION_SOLUTION";
        Hackathon => "hackathon", "WRITE_UP_TYPE_HACKATHON_PROJECT";
        PersonalProject => "personal_project", "WRITE_UP_TYPE_PERSONAL_PROJECT";
        ForumTopic => "forum_topic", "WRITE_UP_TYPE_FORUM_TOPIC";
        Blog => "blog", "WRITE_UP_TYPE_BLOG";
    }
}

vocabulary! {
    /// Whether a search targets topics or individual comments
    #[derive(Default)]
    DocumentType, "document_type" {
        #[default]
        Topic => "topic", "TOPIC";
        Comment => "comment", "COMMENT";
    }
}

/// Parse an optional vocabulary value, treating an empty or blank string as absent
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, DiscussionError>
where
    T: FromStr<Err = DiscussionError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}
