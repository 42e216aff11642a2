//! Shared GraphQL response types used across the board engine.

use serde::Deserialize;

/// A `nodes` list as returned by GitHub connections.
#[derive(Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Pagination info for cursor-based pagination.
#[derive(Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

/// `node(id: ...)` lookup; `None` when the id resolves to nothing.
#[derive(Deserialize)]
pub struct NodeResponse<T> {
    pub node: Option<T>,
}
