//! Heuristic mapping from dynamically named project fields to the roles
//! signalhound cares about.
//!
//! Field roles are found by case-insensitive substring match on the field
//! name, and only the first matching field is ever examined. A project with
//! two "status"-named fields therefore never has its second one considered.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{Result, SignalError};
use crate::types::{FieldInfo, FieldOption, FieldRole};
use crate::version::{compare_versions, extract_version};

/// What an option label must look like to be picked.
#[derive(Debug, Clone, Copy)]
pub enum OptionHint<'a> {
    /// Status for freshly created drafts.
    Drafting,
    /// Status of items worth reporting.
    FailingOrFlaky,
    IssueTracking,
    /// Board name from the dashboard selector.
    Board(&'a str),
}

pub fn field_matches(name: &str, role: FieldRole) -> bool {
    name.to_lowercase().contains(role.name_hint())
}

pub fn option_matches(label: &str, hint: OptionHint<'_>) -> bool {
    let label = label.to_lowercase();
    match hint {
        OptionHint::Drafting => label.contains("drafting") || label.contains("draft"),
        OptionHint::FailingOrFlaky => label.contains("failing") || label.contains("flaky"),
        OptionHint::IssueTracking => {
            label.contains("issue-tracking") || label.contains("issue tracking")
        }
        // an empty label would match every board
        OptionHint::Board(board) => !label.is_empty() && board.contains(&label),
    }
}

/// Board part of a `"board#tab"` selector.
pub fn board_name(selector: &str) -> &str {
    selector
        .split_once('#')
        .map_or(selector, |(board, _)| board)
}

/// A resolved `(field, option)` pair. Either half may be missing.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSlot {
    pub field_id: Option<String>,
    pub option_id: Option<String>,
}

impl FieldSlot {
    fn new(field: &FieldInfo, option: Option<&FieldOption>) -> Self {
        Self {
            field_id: Some(field.id.clone()),
            option_id: option.map(|o| o.id.clone()),
        }
    }

    /// Both ids, when the slot can be written.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.field_id, &self.option_id) {
            (Some(field), Some(option)) if !field.is_empty() && !option.is_empty() => {
                Some((field.as_str(), option.as_str()))
            }
            _ => None,
        }
    }
}

/// Field values to set on a new draft item.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldResolution {
    pub release: FieldSlot,
    pub view: FieldSlot,
    pub status: FieldSlot,
    pub board: FieldSlot,
}

impl FieldResolution {
    pub fn slot(&self, role: FieldRole) -> &FieldSlot {
        match role {
            FieldRole::Release => &self.release,
            FieldRole::View => &self.view,
            FieldRole::Status => &self.status,
            FieldRole::Board => &self.board,
        }
    }
}

/// What an item must carry to be reported by the retriever.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RetrievalCriteria {
    pub release_field_id: String,
    pub target_version: String,
    pub status_field_id: String,
}

fn first_field(fields: &[FieldInfo], role: FieldRole) -> Option<&FieldInfo> {
    fields.iter().find(|f| field_matches(&f.name, role))
}

/// Option with the highest version label, with its extracted version.
/// Ties keep the first one seen.
fn latest_version_option(field: &FieldInfo) -> Option<(&FieldOption, String)> {
    let mut latest: Option<(&FieldOption, String)> = None;

    for option in &field.options {
        let Some(version) = extract_version(&option.name) else {
            continue;
        };
        let newer = latest
            .as_ref()
            .map_or(true, |(_, best)| {
                compare_versions(&version, best) == Ordering::Greater
            });
        if newer {
            latest = Some((option, version));
        }
    }

    latest
}

/// The release field and its newest version option.
pub fn resolve_release(fields: &[FieldInfo]) -> FieldSlot {
    first_field(fields, FieldRole::Release)
        .map(|field| FieldSlot::new(field, latest_version_option(field).map(|(o, _)| o)))
        .unwrap_or_default()
}

/// The first field playing `role` and its first option matching `hint`.
pub fn resolve_option(fields: &[FieldInfo], role: FieldRole, hint: OptionHint<'_>) -> FieldSlot {
    first_field(fields, role)
        .map(|field| {
            let option = field.options.iter().find(|o| option_matches(&o.name, hint));
            FieldSlot::new(field, option)
        })
        .unwrap_or_default()
}

/// Resolve all four roles for draft creation. Unmatched slots stay empty.
pub fn resolve_for_draft(fields: &[FieldInfo], board_selector: &str) -> FieldResolution {
    FieldResolution {
        release: resolve_release(fields),
        view: resolve_option(fields, FieldRole::View, OptionHint::IssueTracking),
        status: resolve_option(fields, FieldRole::Status, OptionHint::Drafting),
        board: resolve_option(
            fields,
            FieldRole::Board,
            OptionHint::Board(board_name(board_selector)),
        ),
    }
}

/// Resolve the release and failing/flaky status needed for retrieval.
pub fn resolve_for_retrieval(fields: &[FieldInfo]) -> Result<RetrievalCriteria> {
    let release = first_field(fields, FieldRole::Release);
    let (release_field_id, target_version) = release
        .and_then(|field| latest_version_option(field).map(|(_, v)| (field.id.clone(), v)))
        .ok_or(SignalError::MissingRequiredField(
            "latest version option in k8s release field",
        ))?;

    let status = resolve_option(fields, FieldRole::Status, OptionHint::FailingOrFlaky);
    let (status_field_id, _) = status
        .pair()
        .ok_or(SignalError::MissingRequiredField(
            "failing/flaky option in status field",
        ))?;

    Ok(RetrievalCriteria {
        release_field_id,
        target_version,
        status_field_id: status_field_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn select(id: &str, name: &str, options: &[(&str, &str)]) -> FieldInfo {
        FieldInfo {
            id: id.to_string(),
            name: name.to_string(),
            kind: FieldKind::SingleSelect,
            options: options
                .iter()
                .map(|(name, id)| FieldOption {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn board_fields() -> Vec<FieldInfo> {
        vec![
            select("F_release", "K8s Release", &[("v1.30", "A"), ("v1.31", "B")]),
            select("F_status", "Status", &[("Drafting", "X"), ("Failing", "Y")]),
            select("F_view", "View", &[("issue tracking", "V")]),
            select("F_board", "Board", &[("gce", "G"), ("master-blocking", "MB")]),
        ]
    }

    #[test]
    fn test_release_picks_highest_version() {
        let slot = resolve_release(&board_fields());
        assert_eq!(slot.pair(), Some(("F_release", "B")));
    }

    #[test]
    fn test_release_is_numeric_not_positional() {
        let fields = vec![select(
            "F",
            "k8s release",
            &[("v1.9", "old"), ("v1.10 (current)", "new"), ("unscheduled", "none")],
        )];
        assert_eq!(resolve_release(&fields).option_id.as_deref(), Some("new"));
    }

    #[test]
    fn test_release_tie_keeps_first() {
        let fields = vec![select("F", "K8s Release", &[("v1.31", "first"), ("1.31 rc", "second")])];
        assert_eq!(resolve_release(&fields).option_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_release_without_versions() {
        let fields = vec![select("F", "K8s Release", &[("next", "N")])];
        let slot = resolve_release(&fields);
        assert_eq!(slot.field_id.as_deref(), Some("F"));
        assert_eq!(slot.pair(), None);
    }

    #[test]
    fn test_status_matchers_differ_by_call_site() {
        let fields = board_fields();
        let draft = resolve_option(&fields, FieldRole::Status, OptionHint::Drafting);
        let failing = resolve_option(&fields, FieldRole::Status, OptionHint::FailingOrFlaky);
        assert_eq!(draft.option_id.as_deref(), Some("X"));
        assert_eq!(failing.option_id.as_deref(), Some("Y"));
    }

    #[test]
    fn test_only_first_status_field_is_examined() {
        let fields = vec![
            select("F_status", "Status", &[("Todo", "T")]),
            select("F_triage", "Triage status", &[("Flaky", "FL")]),
        ];
        let slot = resolve_option(&fields, FieldRole::Status, OptionHint::FailingOrFlaky);
        assert_eq!(slot.field_id.as_deref(), Some("F_status"));
        assert_eq!(slot.option_id, None);
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        assert!(field_matches("K8S RELEASE", FieldRole::Release));
        assert!(field_matches("Testgrid Board", FieldRole::Board));
        assert!(!field_matches("Release", FieldRole::Release));
    }

    #[test]
    fn test_view_option_spellings() {
        assert!(option_matches("Issue-Tracking", OptionHint::IssueTracking));
        assert!(option_matches("issue tracking", OptionHint::IssueTracking));
        assert!(!option_matches("tracking", OptionHint::IssueTracking));
    }

    #[test]
    fn test_board_option_uses_board_segment() {
        assert_eq!(board_name("sig-release-master-blocking#gce-cos"), "sig-release-master-blocking");
        assert_eq!(board_name("no-tab"), "no-tab");

        let resolution = resolve_for_draft(&board_fields(), "sig-release-master-blocking#gce-cos");
        assert_eq!(resolution.board.option_id.as_deref(), Some("MB"));
    }

    #[test]
    fn test_board_option_ignores_tab_segment() {
        let resolution = resolve_for_draft(&board_fields(), "sig-release-master-informing#gce");
        assert_eq!(resolution.board.field_id.as_deref(), Some("F_board"));
        assert_eq!(resolution.board.option_id, None);
    }

    #[test]
    fn test_unmatched_board_leaves_other_slots() {
        let resolution = resolve_for_draft(&board_fields(), "unknown-board#tab");
        assert_eq!(resolution.board.pair(), None);
        assert_eq!(resolution.release.pair(), Some(("F_release", "B")));
        assert_eq!(resolution.view.pair(), Some(("F_view", "V")));
        assert_eq!(resolution.status.pair(), Some(("F_status", "X")));
    }

    #[test]
    fn test_empty_schema_resolves_nothing() {
        let resolution = resolve_for_draft(&[], "board#tab");
        assert_eq!(resolution, FieldResolution::default());
    }

    #[test]
    fn test_retrieval_criteria() {
        let criteria = resolve_for_retrieval(&board_fields()).unwrap();
        assert_eq!(
            criteria,
            RetrievalCriteria {
                release_field_id: "F_release".to_string(),
                target_version: "1.31".to_string(),
                status_field_id: "F_status".to_string(),
            }
        );
    }

    #[test]
    fn test_retrieval_requires_release() {
        let fields = vec![select("F_status", "Status", &[("Failing", "Y")])];
        let err = resolve_for_retrieval(&fields).unwrap_err();
        assert!(matches!(err, SignalError::MissingRequiredField(_)));
    }

    #[test]
    fn test_retrieval_requires_failing_status() {
        let fields = vec![
            select("F_release", "K8s Release", &[("v1.31", "B")]),
            select("F_status", "Status", &[("Drafting", "X")]),
        ];
        let err = resolve_for_retrieval(&fields).unwrap_err();
        assert!(matches!(
            err,
            SignalError::MissingRequiredField("failing/flaky option in status field")
        ));
    }
}
