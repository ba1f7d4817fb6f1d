//! Cursor pagination shared by listing calls.

/// First page (`pageSize` plus any filter) or continuation (`cursor` only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageClause {
    First { page_size: u32 },
    Next { cursor: String },
}

impl PageClause {
    /// An empty cursor means page one.
    pub fn new(page_size: u32, cursor: impl Into<String>) -> Self {
        let cursor = cursor.into();
        if cursor.is_empty() {
            PageClause::First { page_size }
        } else {
            PageClause::Next { cursor }
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, PageClause::First { .. })
    }

    /// `pageSize` to send; omitted when continuing from a cursor.
    pub fn page_size(&self) -> Option<u32> {
        match self {
            PageClause::First { page_size } => Some(*page_size),
            PageClause::Next { .. } => None,
        }
    }

    pub fn cursor(&self) -> Option<&str> {
        match self {
            PageClause::First { .. } => None,
            PageClause::Next { cursor } => Some(cursor),
        }
    }
}

/// Servers send `""` for "no further pages".
pub(crate) fn normalize_cursor(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.is_empty())
}
