/// Why [`super::FreeDragging::init`] could not install dragging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeDragError {
    /// The boundary selector matched no element.
    BoundaryNotFound { query: String },
    /// The boundary selector was empty or only whitespace.
    EmptyBoundaryQuery,
}

impl std::fmt::Display for FreeDragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundaryNotFound { query } => {
                write!(f, "could not find any element with query: {query}")
            }
            Self::EmptyBoundaryQuery => write!(f, "boundary query is empty"),
        }
    }
}

impl std::error::Error for FreeDragError {}
