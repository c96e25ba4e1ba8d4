//! Filter and sort selection for `GET /tasks`.

use serde::{Deserialize, Serialize};

/// Which tasks to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Pending,
    /// Completed tasks only.
    Completed,
}

impl Filter {
    /// All filters in selector order.
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Lowercase name (`all`, `pending`, `completed`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// Value of the `completed` query parameter, if any.
    #[must_use]
    pub const fn completed_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Pending => Some("false"),
            Self::Completed => Some("true"),
        }
    }

    /// Whether a task with the given completion flag passes this filter.
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !completed,
            Self::Completed => completed,
        }
    }

    /// Next filter in selector order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field used to order the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation date (server default).
    #[default]
    Date,
    /// Title.
    Title,
    /// Priority.
    Priority,
}

impl SortKey {
    /// All sort keys in selector order.
    pub const ALL: [Self; 3] = [Self::Date, Self::Title, Self::Priority];

    /// Lowercase name (`date`, `title`, `priority`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
            Self::Priority => "priority",
        }
    }

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Date Created",
            Self::Title => "Title",
            Self::Priority => "Priority",
        }
    }

    /// Value of the `sort` query parameter; the default sort sends none.
    #[must_use]
    pub const fn sort_param(self) -> Option<&'static str> {
        match self {
            Self::Date => None,
            Self::Title => Some("title"),
            Self::Priority => Some("priority"),
        }
    }

    /// Next sort key in selector order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Date => Self::Title,
            Self::Title => Self::Priority,
            Self::Priority => Self::Date,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Completion filter.
    pub filter: Filter,
    /// Ordering.
    pub sort: SortKey,
}

impl ListQuery {
    /// Creates a query for the given selection.
    #[must_use]
    pub const fn new(filter: Filter, sort: SortKey) -> Self {
        Self { filter, sort }
    }

    /// Query-string pairs, `completed` first, omitting defaults.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(completed) = self.filter.completed_param() {
            pairs.push(("completed", completed));
        }
        if let Some(sort) = self.sort.sort_param() {
            pairs.push(("sort", sort));
        }
        pairs
    }
}
