use super::element::BODY_SELECTOR;

/// CSS class put on the draggable element while a drag is active.
pub const DEFAULT_DRAGGING_CLASS: &str = "free-dragging";

/// Options for [`super::FreeDragging`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FreeDraggingOptions {
    /// Selector of the container the element must stay inside.
    ///
    /// Defaults to `"body"`, i.e. the whole document.
    pub boundary_query: String,

    /// Class toggled on the draggable element while it is being dragged.
    pub dragging_class: String,

    /// If true, record drag events (start/end/teardown) in a small ring buffer,
    /// readable through [`super::FreeDragging::debug_log_text`].
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for FreeDraggingOptions {
    fn default() -> Self {
        Self {
            boundary_query: BODY_SELECTOR.to_owned(),
            dragging_class: DEFAULT_DRAGGING_CLASS.to_owned(),
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl FreeDraggingOptions {
    /// Options constraining the element to the container matched by `query`.
    pub fn with_boundary(query: impl Into<String>) -> Self {
        Self {
            boundary_query: query.into(),
            ..Default::default()
        }
    }
}
