use std::fmt;
use std::str::FromStr;

use super::task::Priority;

/// Completion status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }

    /// All → Active → Completed → All
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected all, active or completed)")]
pub struct ParseStatusError(pub String);

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" | "open" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Either every value, or exactly one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// An optional task field matches `Only(v)` only when it is present and equal
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: fmt::Display> Selection<T> {
    pub fn label(&self, all_label: &str) -> String {
        match self {
            Selection::All => all_label.to_string(),
            Selection::Only(v) => v.to_string(),
        }
    }
}

/// Current search/status/category/priority selection. Lives for the session,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty matches everything
    pub search: String,
    pub status: StatusFilter,
    /// Exact, case-sensitive match
    pub category: Selection<String>,
    pub priority: Selection<Priority>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.status != StatusFilter::All
            || !self.category.is_all()
            || !self.priority.is_all()
    }
}
