//! Core library for kaggletools
//!
//! This crate implements the **Functional Core** of the kaggletools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`kaggletools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`kaggletools`**: HTTP calls, CLI and MCP server (the Imperative Shell)
//!
//! Every function here is deterministic: the same input produces the same
//! output, and tests use fixture data instead of a live Kaggle account. The
//! current time is always passed in by the caller.
//!
//! # Module Organization
//!
//! - [`discussions`]: Discussion search vocabularies, query construction,
//!   time-window filtering, id resolution planning and text rendering
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use kaggletools_core::discussions::{build, SearchQuery, SourceType};
//!
//! let query = SearchQuery::topics(Some("leakage".to_string()))
//!     .with_source_type(Some(SourceType::Competition));
//!
//! // No HTTP required to inspect the request body
//! let request = build(&query);
//! assert!(request.filters.discussion_filters.is_some());
//! ```

pub mod discussions;
