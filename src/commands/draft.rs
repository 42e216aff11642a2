use tabled::{settings::Style, Table, Tabled};

use crate::board::ProjectManager;
use crate::cli::DraftArgs;
use crate::error::{Result, SignalError};
use crate::output::{self, outcome_colored};
use crate::types::{DraftOutcome, FieldUpdate};

#[derive(Tabled)]
struct UpdateRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl From<&FieldUpdate> for UpdateRow {
    fn from(update: &FieldUpdate) -> Self {
        Self {
            field: update.field.to_string(),
            result: outcome_colored(&update.outcome),
        }
    }
}

fn read_body(args: &DraftArgs) -> Result<String> {
    match (&args.body, &args.body_file) {
        (Some(body), _) => Ok(body.clone()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| SignalError::FileRead {
            path: path.display().to_string(),
            source: e,
        }),
        (None, None) => Ok(String::new()),
    }
}

pub async fn create(board: &dyn ProjectManager, args: DraftArgs) -> Result<()> {
    let body = read_body(&args)?;
    let outcome = board
        .create_draft_item(&args.title, &body, &args.board)
        .await?;

    output::print_item(&outcome, |outcome: &DraftOutcome| {
        output::print_message(&format!(
            "Created draft item {} ({}/{} fields set)",
            outcome.item_id,
            outcome.applied_count(),
            outcome.updates.len()
        ));
        let rows: Vec<UpdateRow> = outcome.updates.iter().map(UpdateRow::from).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    });

    Ok(())
}
