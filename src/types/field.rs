use std::fmt;

use serde::{Deserialize, Serialize};

/// Field kinds the engine understands. Anything else is dropped during discovery.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    SingleSelect,
    Iteration,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::SingleSelect => write!(f, "single-select"),
            FieldKind::Iteration => write!(f, "iteration"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
}

/// One project field. Options keep the order the API returned them in.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
    pub options: Vec<FieldOption>,
}

/// The semantic roles a project field can play for signalhound.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Release,
    View,
    Status,
    Board,
}

impl FieldRole {
    /// Lowercase fragment a field name must contain to play this role.
    pub fn name_hint(self) -> &'static str {
        match self {
            FieldRole::Release => "k8s release",
            FieldRole::View => "view",
            FieldRole::Status => "status",
            FieldRole::Board => "board",
        }
    }

    /// Draft updates are issued in this order.
    pub fn all() -> [FieldRole; 4] {
        [
            FieldRole::Release,
            FieldRole::View,
            FieldRole::Status,
            FieldRole::Board,
        ]
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRole::Release => write!(f, "K8s Release"),
            FieldRole::View => write!(f, "View"),
            FieldRole::Status => write!(f, "Status"),
            FieldRole::Board => write!(f, "Testgrid Board"),
        }
    }
}
