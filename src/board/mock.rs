//! Scripted transport and fixtures for board tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::GraphQLTransport;
use crate::error::TransportError;

#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub query: String,
    pub variables: Value,
}

/// Replays canned `data` payloads (or failures) in order and records each call.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, data: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(data));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQLTransport for ScriptedTransport {
    async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            query: query.to_string(),
            variables: variables.unwrap_or(Value::Null),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(TransportError::GraphQL {
                messages: vec![message],
            }),
            None => panic!("unexpected GraphQL call: {query}"),
        }
    }
}

/// A project schema shaped like the SIG Release signal board.
pub fn sample_schema() -> Value {
    json!({
        "node": { "fields": { "nodes": [
            { "__typename": "ProjectV2Field" },
            {
                "__typename": "ProjectV2SingleSelectField",
                "id": "F_release",
                "name": "K8s Release",
                "options": [
                    { "id": "R_130", "name": "v1.30" },
                    { "id": "R_131", "name": "v1.31" }
                ]
            },
            {
                "__typename": "ProjectV2SingleSelectField",
                "id": "F_status",
                "name": "Status",
                "options": [
                    { "id": "S_draft", "name": "Drafting" },
                    { "id": "S_fail", "name": "Failing" },
                    { "id": "S_flake", "name": "Flaky" },
                    { "id": "S_done", "name": "Resolved" }
                ]
            },
            {
                "__typename": "ProjectV2SingleSelectField",
                "id": "F_view",
                "name": "View",
                "options": [
                    { "id": "V_board", "name": "board" },
                    { "id": "V_issues", "name": "issue-tracking" }
                ]
            },
            {
                "__typename": "ProjectV2SingleSelectField",
                "id": "F_board",
                "name": "Testgrid Board",
                "options": [
                    { "id": "B_blocking", "name": "master-blocking" },
                    { "id": "B_informing", "name": "master-informing" },
                    { "id": "B_gce", "name": "gce" }
                ]
            },
            { "__typename": "ProjectV2IterationField", "id": "F_iter", "name": "Sprint" }
        ] } }
    })
}

pub fn select_value(field_id: &str, label: &str) -> Value {
    json!({
        "__typename": "ProjectV2ItemFieldSingleSelectValue",
        "name": label,
        "field": { "id": field_id, "name": "ignored" }
    })
}

pub fn issue_item(number: u64, values: Vec<Value>) -> Value {
    json!({
        "content": {
            "__typename": "Issue",
            "number": number,
            "title": format!("Failing test {number}"),
            "body": "",
            "state": "OPEN",
            "url": format!("https://github.com/kubernetes/kubernetes/issues/{number}")
        },
        "fieldValues": { "nodes": values }
    })
}

pub fn items_page(nodes: Vec<Value>, end_cursor: Option<&str>) -> Value {
    json!({
        "node": { "items": {
            "nodes": nodes,
            "pageInfo": {
                "hasNextPage": end_cursor.is_some(),
                "endCursor": end_cursor
            }
        } }
    })
}
