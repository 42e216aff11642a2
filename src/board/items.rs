use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::resolve::{option_matches, resolve_for_retrieval, OptionHint, RetrievalCriteria};
use super::ProjectBoard;
use crate::client;
use crate::error::{Result, SignalError, TransportError};
use crate::responses::{Connection, NodeResponse, PageInfo};
use crate::types::Issue;
use crate::version::extract_version;

// ProjectV2 items cannot be filtered server-side, so every page is scanned.
const PROJECT_ITEMS_QUERY: &str = r#"
query ProjectItems($projectId: ID!, $first: Int!, $after: String) {
    node(id: $projectId) {
        ... on ProjectV2 {
            items(first: $first, after: $after) {
                nodes {
                    content {
                        __typename
                        ... on Issue {
                            number
                            title
                            body
                            state
                            url
                        }
                    }
                    fieldValues(first: 20) {
                        nodes {
                            __typename
                            ... on ProjectV2ItemFieldSingleSelectValue {
                                name
                                field {
                                    ... on ProjectV2FieldCommon {
                                        id
                                        name
                                    }
                                }
                            }
                        }
                    }
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }
    }
}
"#;

const ITEMS_QUERY_WHAT: &str = "project items";

#[derive(Deserialize)]
struct ProjectItems {
    items: ItemsConnection,
}

#[derive(Deserialize)]
struct ItemsConnection {
    nodes: Vec<ItemNode>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct ItemNode {
    content: Option<ItemContent>,
    #[serde(rename = "fieldValues", default)]
    field_values: Connection<FieldValueNode>,
}

#[derive(Deserialize)]
#[serde(tag = "__typename")]
enum ItemContent {
    Issue(Issue),
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "__typename")]
enum FieldValueNode {
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        name: Option<String>,
        field: FieldRef,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct FieldRef {
    id: Option<String>,
}

impl FieldValueNode {
    /// `(field id, option label)` of a single-select value.
    fn single_select(&self) -> Option<(&str, &str)> {
        match self {
            FieldValueNode::SingleSelect {
                name: Some(label),
                field: FieldRef { id: Some(id) },
            } => Some((id.as_str(), label.as_str())),
            _ => None,
        }
    }
}

impl RetrievalCriteria {
    fn on_target_release(&self, values: &[FieldValueNode]) -> bool {
        values.iter().filter_map(FieldValueNode::single_select).any(|(field, label)| {
            field == self.release_field_id
                && extract_version(label).as_deref() == Some(self.target_version.as_str())
        })
    }

    fn is_failing(&self, values: &[FieldValueNode]) -> bool {
        values.iter().filter_map(FieldValueNode::single_select).any(|(field, label)| {
            field == self.status_field_id && option_matches(label, OptionHint::FailingOrFlaky)
        })
    }
}

impl ItemNode {
    fn into_selected_issue(self, criteria: &RetrievalCriteria) -> Option<Issue> {
        let Some(ItemContent::Issue(issue)) = self.content else {
            return None;
        };

        let values = &self.field_values.nodes;
        (criteria.on_target_release(values) && criteria.is_failing(values)).then_some(issue)
    }
}

impl ProjectBoard {
    /// Walk every item page and keep issues on the newest release whose status
    /// is failing or flaky. Any page failure discards everything collected.
    pub async fn retrieve_filtered_issues(&self, page_size: u32) -> Result<Vec<Issue>> {
        let transport = self.transport()?;

        let fields = self.discover_fields().await?;
        let criteria = resolve_for_retrieval(&fields)?;
        debug!(version = %criteria.target_version, "retrieving failing and flaky issues");

        let mut issues = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 0u32;

        loop {
            page += 1;
            let variables = json!({
                "projectId": self.project_id,
                "first": page_size,
                "after": cursor,
            });

            let response: NodeResponse<ProjectItems> =
                client::query(transport, PROJECT_ITEMS_QUERY, Some(variables))
                    .await
                    .map_err(|source| SignalError::RemoteQuery {
                        what: ITEMS_QUERY_WHAT,
                        source,
                    })?;

            let items = response
                .node
                .ok_or_else(|| SignalError::ProjectNotFound(self.project_id.clone()))?
                .items;

            let before = issues.len();
            issues.extend(
                items
                    .nodes
                    .into_iter()
                    .filter_map(|item| item.into_selected_issue(&criteria)),
            );
            debug!(page, matched = issues.len() - before, "scanned project items page");

            if !items.page_info.has_next_page {
                break;
            }
            cursor = Some(items.page_info.end_cursor.ok_or(SignalError::RemoteQuery {
                what: ITEMS_QUERY_WHAT,
                source: TransportError::MissingCursor,
            })?);
        }

        Ok(issues)
    }
}
