use tabled::Tabled;

use crate::board::ProjectManager;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::types::FieldInfo;

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn option_names(field: &FieldInfo) -> String {
    field
        .options
        .iter()
        .map(|o| o.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&FieldInfo> for FieldRow {
    fn from(field: &FieldInfo) -> Self {
        Self {
            name: field.name.clone(),
            kind: field.kind.to_string(),
            options: truncate(&option_names(field), 60),
            id: field.id.clone(),
        }
    }
}

pub async fn list(board: &dyn ProjectManager) -> Result<()> {
    let fields = board.discover_fields().await?;

    if fields.is_empty() {
        output::print_message("No single-select or iteration fields found");
        return Ok(());
    }

    output::print_table(
        &fields,
        |f| FieldRow::from(f),
        |f| format!("{} [{}] {}", f.name, f.kind, option_names(f)),
    );

    Ok(())
}
