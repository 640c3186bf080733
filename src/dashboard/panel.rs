use anyhow::Result;
use serde_json::Value;

/// Read-only panels mirroring the raw plot interaction events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugPanel {
    Hover,
    Click,
    Selection,
    Relayout,
}

impl DebugPanel {
    pub const ALL: [DebugPanel; 4] = [DebugPanel::Hover, DebugPanel::Click, DebugPanel::Selection, DebugPanel::Relayout];

    /// Element id of the panel in the page.
    pub fn id(&self) -> &'static str {
        match self {
            DebugPanel::Hover => "hover-data",
            DebugPanel::Click => "click-data",
            DebugPanel::Selection => "selected-data",
            DebugPanel::Relayout => "relayout-data",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DebugPanel::Hover => "Hover Data",
            DebugPanel::Click => "Click Data",
            DebugPanel::Selection => "Selection Data",
            DebugPanel::Relayout => "Zoom and Relayout Data",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            DebugPanel::Hover => "Mouse over values in the graph.",
            DebugPanel::Click => "Click on points in the graph.",
            DebugPanel::Selection =>
                "Choose the lasso or rectangle tool in the graph's menu bar and then select points in the graph.",
            DebugPanel::Relayout =>
                "Click and drag on the graph to zoom or click on the zoom buttons in the graph's menu bar.",
        }
    }
}

/// Text shown in a debug panel: the event payload verbatim, as JSON indented by two spaces.
/// No event yet reads `null`.
pub fn echo_event(payload: Option<&Value>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&payload)?)
}
