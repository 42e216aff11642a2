use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::board::resolve::{
    board_name, resolve_for_draft, resolve_for_retrieval, FieldResolution, FieldSlot,
    RetrievalCriteria,
};
use crate::board::ProjectManager;
use crate::error::Result;
use crate::output;
use crate::types::{FieldInfo, FieldRole};

#[derive(Serialize)]
struct ResolveReport {
    board_selector: String,
    draft: FieldResolution,
    retrieval: Option<RetrievalCriteria>,
    retrieval_error: Option<String>,
}

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Option")]
    option: String,
}

fn find_field<'a>(fields: &'a [FieldInfo], id: Option<&str>) -> Option<&'a FieldInfo> {
    id.and_then(|id| fields.iter().find(|f| f.id == id))
}

fn slot_row(fields: &[FieldInfo], role: FieldRole, slot: &FieldSlot) -> SlotRow {
    let field = find_field(fields, slot.field_id.as_deref());
    let option = field.and_then(|f| {
        f.options
            .iter()
            .find(|o| Some(o.id.as_str()) == slot.option_id.as_deref())
    });

    SlotRow {
        role: role.to_string(),
        field: field
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "-".bright_black().to_string()),
        option: option
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "-".bright_black().to_string()),
    }
}

pub async fn show(board: &dyn ProjectManager, board_selector: &str) -> Result<()> {
    let fields = board.discover_fields().await?;

    let draft = resolve_for_draft(&fields, board_selector);
    let (retrieval, retrieval_error) = match resolve_for_retrieval(&fields) {
        Ok(criteria) => (Some(criteria), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let report = ResolveReport {
        board_selector: board_selector.to_string(),
        draft,
        retrieval,
        retrieval_error,
    };

    output::print_item(&report, |report| {
        println!("Draft fields for board '{}':", board_name(&report.board_selector));
        let rows: Vec<SlotRow> = FieldRole::all()
            .into_iter()
            .map(|role| slot_row(&fields, role, report.draft.slot(role)))
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
        println!();

        match (&report.retrieval, &report.retrieval_error) {
            (Some(criteria), _) => {
                let status = find_field(&fields, Some(criteria.status_field_id.as_str()))
                    .map(|f| f.name.as_str())
                    .unwrap_or("-");
                println!(
                    "Retrieval: release {} with failing/flaky {}",
                    criteria.target_version.bold(),
                    status
                );
            }
            (None, Some(error)) => println!("Retrieval: {}", error.red()),
            (None, None) => {}
        }
    });

    Ok(())
}
