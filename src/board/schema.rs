use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::ProjectBoard;
use crate::client;
use crate::error::{Result, SignalError};
use crate::responses::{Connection, NodeResponse};
use crate::types::{FieldInfo, FieldKind, FieldOption};

const PROJECT_FIELDS_QUERY: &str = r#"
query ProjectFields($projectId: ID!) {
    node(id: $projectId) {
        ... on ProjectV2 {
            fields(first: 50) {
                nodes {
                    __typename
                    ... on ProjectV2SingleSelectField {
                        id
                        name
                        options {
                            id
                            name
                        }
                    }
                    ... on ProjectV2IterationField {
                        id
                        name
                    }
                }
            }
        }
    }
}
"#;

#[derive(Deserialize)]
struct ProjectFields {
    #[serde(default)]
    fields: Connection<FieldNode>,
}

#[derive(Deserialize)]
#[serde(tag = "__typename")]
enum FieldNode {
    #[serde(rename = "ProjectV2SingleSelectField")]
    SingleSelect {
        id: String,
        name: String,
        #[serde(default)]
        options: Vec<FieldOption>,
    },
    #[serde(rename = "ProjectV2IterationField")]
    Iteration { id: String, name: String },
    #[serde(other)]
    Unknown,
}

impl FieldNode {
    fn into_field_info(self) -> Option<FieldInfo> {
        match self {
            FieldNode::SingleSelect { id, name, options } => Some(FieldInfo {
                id,
                name,
                kind: FieldKind::SingleSelect,
                options,
            }),
            FieldNode::Iteration { id, name } => Some(FieldInfo {
                id,
                name,
                kind: FieldKind::Iteration,
                options: Vec::new(),
            }),
            FieldNode::Unknown => None,
        }
    }
}

impl ProjectBoard {
    /// Fetch every single-select and iteration field defined on the project.
    pub async fn discover_fields(&self) -> Result<Vec<FieldInfo>> {
        let transport = self.transport()?;

        let variables = json!({ "projectId": self.project_id });
        let response: NodeResponse<ProjectFields> =
            client::query(transport, PROJECT_FIELDS_QUERY, Some(variables))
                .await
                .map_err(|source| SignalError::RemoteQuery {
                    what: "project fields",
                    source,
                })?;

        let project = response
            .node
            .ok_or_else(|| SignalError::ProjectNotFound(self.project_id.clone()))?;

        let fields: Vec<FieldInfo> = project
            .fields
            .nodes
            .into_iter()
            .filter_map(FieldNode::into_field_info)
            .collect();

        debug!(project = %self.project_id, count = fields.len(), "discovered project fields");
        Ok(fields)
    }
}
