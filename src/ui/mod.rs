//! UI components for the plan window
//!
//! Views draw from borrowed state and report the changes that must go
//! through `AppState` (saved document fields, store writes) as
//! [`ViewAction`]s. Session-only content is edited in place.

mod activities;
mod add_section;
pub mod field;
mod header;
mod notes;
mod rich_text;
mod section_editor;
mod sections;
mod sortable;
mod status;
mod table;
mod tasks;

pub use add_section::show_add_section;
pub use header::{show_footer, show_header, HeaderAction, SaveStatus};
pub use notes::show_notes_window;
pub use section_editor::{show_section_editor, SectionEditorOutput};
pub use sections::SectionView;
pub use sortable::SortableList;
pub use status::show_load_status;

use crate::document::DocumentAction;
use crate::sync::SyncCommand;

/// A change a view asks the application to make after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Mutate the saved document
    Document(DocumentAction),
    /// Write to the activity store
    Sync(SyncCommand),
    /// Open the content editor of a custom section
    EditSection(String),
}
