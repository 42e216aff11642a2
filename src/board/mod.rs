//! GitHub Projects (v2) synchronization engine.
//!
//! Every operation re-discovers the project schema; nothing is cached between
//! calls.

mod draft;
mod items;
pub mod resolve;
mod schema;

#[cfg(test)]
mod mock;

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::GraphQLTransport;
use crate::error::{Result, SignalError};
use crate::types::{DraftOutcome, FieldInfo, Issue};

/// The SIG Release CI signal board.
pub const DEFAULT_PROJECT_ID: &str = "PVT_kwDOAM_34M4AAThW";

/// Operations the dashboard, controller and CLI rely on.
#[async_trait]
pub trait ProjectManager: Send + Sync {
    async fn discover_fields(&self) -> Result<Vec<FieldInfo>>;

    /// Issues on the current release that are failing or flaky.
    async fn retrieve_filtered_issues(&self, page_size: u32) -> Result<Vec<Issue>>;

    /// `board_selector` is the `"board#tab"` key of the dashboard tab.
    async fn create_draft_item(
        &self,
        title: &str,
        body: &str,
        board_selector: &str,
    ) -> Result<DraftOutcome>;
}

pub struct ProjectBoard {
    transport: Option<Arc<dyn GraphQLTransport>>,
    project_id: String,
}

impl ProjectBoard {
    pub fn new(transport: Arc<dyn GraphQLTransport>, project_id: impl Into<String>) -> Self {
        Self {
            transport: Some(transport),
            project_id: project_id.into(),
        }
    }

    /// A board with no credentials; every operation fails with `ClientUnavailable`.
    pub fn unauthenticated(project_id: impl Into<String>) -> Self {
        Self {
            transport: None,
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn transport(&self) -> Result<&dyn GraphQLTransport> {
        self.transport
            .as_deref()
            .ok_or(SignalError::ClientUnavailable)
    }
}

#[async_trait]
impl ProjectManager for ProjectBoard {
    async fn discover_fields(&self) -> Result<Vec<FieldInfo>> {
        ProjectBoard::discover_fields(self).await
    }

    async fn retrieve_filtered_issues(&self, page_size: u32) -> Result<Vec<Issue>> {
        ProjectBoard::retrieve_filtered_issues(self, page_size).await
    }

    async fn create_draft_item(
        &self,
        title: &str,
        body: &str,
        board_selector: &str,
    ) -> Result<DraftOutcome> {
        ProjectBoard::create_draft_item(self, title, body, board_selector).await
    }
}
