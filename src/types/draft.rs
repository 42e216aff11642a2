use serde::Serialize;

use super::FieldRole;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "result", content = "reason", rename_all = "lowercase")]
pub enum UpdateOutcome {
    Applied,
    /// No field or option matched, so no mutation was sent.
    Skipped,
    Failed(String),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: FieldRole,
    #[serde(flatten)]
    pub outcome: UpdateOutcome,
}

/// Result of creating a draft item.
///
/// The item exists once this value is returned; any subset of its fields may
/// still be unset.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DraftOutcome {
    pub item_id: String,
    pub updates: Vec<FieldUpdate>,
}

impl DraftOutcome {
    pub fn outcome(&self, field: FieldRole) -> Option<&UpdateOutcome> {
        self.updates
            .iter()
            .find(|u| u.field == field)
            .map(|u| &u.outcome)
    }

    pub fn applied_count(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| u.outcome == UpdateOutcome::Applied)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldUpdate> {
        self.updates
            .iter()
            .filter(|u| matches!(u.outcome, UpdateOutcome::Failed(_)))
    }
}
