mod draft;
mod field;
mod issue;

pub use draft::{DraftOutcome, FieldUpdate, UpdateOutcome};
pub use field::{FieldInfo, FieldKind, FieldOption, FieldRole};
pub use issue::Issue;
