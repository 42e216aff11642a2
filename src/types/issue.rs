use serde::{Deserialize, Serialize};

/// A project item backed by a real issue.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub state: String,
    pub url: String,
}
