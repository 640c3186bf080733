mod dashboard;
mod panel;

pub use dashboard::{Dashboard, DropdownOption, Selection};
pub use panel::{DebugPanel, echo_event};
