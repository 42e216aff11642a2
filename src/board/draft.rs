use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::resolve::resolve_for_draft;
use super::ProjectBoard;
use crate::client::{self, GraphQLTransport};
use crate::error::{Result, SignalError, TransportError};
use crate::types::{DraftOutcome, FieldRole, FieldUpdate, UpdateOutcome};

const ADD_DRAFT_ISSUE_MUTATION: &str = r#"
mutation AddDraftIssue($input: AddProjectV2DraftIssueInput!) {
    addProjectV2DraftIssue(input: $input) {
        projectItem {
            id
        }
    }
}
"#;

const UPDATE_FIELD_VALUE_MUTATION: &str = r#"
mutation UpdateItemFieldValue($input: UpdateProjectV2ItemFieldValueInput!) {
    updateProjectV2ItemFieldValue(input: $input) {
        projectV2Item {
            id
        }
    }
}
"#;

#[derive(Deserialize)]
struct AddDraftIssueResponse {
    #[serde(rename = "addProjectV2DraftIssue")]
    add_draft_issue: Option<AddDraftIssuePayload>,
}

#[derive(Deserialize)]
struct AddDraftIssuePayload {
    #[serde(rename = "projectItem")]
    project_item: ProjectItemRef,
}

#[derive(Deserialize)]
struct ProjectItemRef {
    id: String,
}

impl ProjectBoard {
    /// Create a draft item, then set release, view, status and board on it.
    ///
    /// Field updates are independent: a failed one is logged and recorded in
    /// the outcome, and the rest still run.
    pub async fn create_draft_item(
        &self,
        title: &str,
        body: &str,
        board_selector: &str,
    ) -> Result<DraftOutcome> {
        let transport = self.transport()?;

        let fields = self.discover_fields().await?;
        let resolution = resolve_for_draft(&fields, board_selector);

        let item_id = self.add_draft_issue(transport, title, body).await?;
        info!(item = %item_id, "created draft item");

        let mut updates = Vec::with_capacity(4);
        for field in FieldRole::all() {
            let outcome = match resolution.slot(field).pair() {
                None => {
                    debug!(%field, "no matching field option, skipping");
                    UpdateOutcome::Skipped
                }
                Some((field_id, option_id)) => {
                    match self
                        .set_single_select(transport, &item_id, field_id, option_id)
                        .await
                    {
                        Ok(()) => UpdateOutcome::Applied,
                        Err(e) => {
                            warn!(%field, error = %e, "failed to update field");
                            UpdateOutcome::Failed(e.to_string())
                        }
                    }
                }
            };
            updates.push(FieldUpdate { field, outcome });
        }

        Ok(DraftOutcome { item_id, updates })
    }

    async fn add_draft_issue(
        &self,
        transport: &dyn GraphQLTransport,
        title: &str,
        body: &str,
    ) -> Result<String> {
        let variables = json!({
            "input": {
                "projectId": self.project_id,
                "title": title,
                "body": body,
            }
        });

        let response: AddDraftIssueResponse =
            client::query(transport, ADD_DRAFT_ISSUE_MUTATION, Some(variables))
                .await
                .map_err(|source| SignalError::RemoteMutation {
                    what: "create draft issue",
                    source,
                })?;

        response
            .add_draft_issue
            .map(|payload| payload.project_item.id)
            .ok_or(SignalError::RemoteMutation {
                what: "create draft issue",
                source: TransportError::EmptyResponse,
            })
    }

    async fn set_single_select(
        &self,
        transport: &dyn GraphQLTransport,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> std::result::Result<(), TransportError> {
        let variables = json!({
            "input": {
                "projectId": self.project_id,
                "itemId": item_id,
                "fieldId": field_id,
                "value": { "singleSelectOptionId": option_id },
            }
        });

        transport
            .execute(UPDATE_FIELD_VALUE_MUTATION, Some(variables))
            .await
            .map(|_| ())
    }
}
