use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::task::Task;

/// Which tasks the list view shows. Transient: never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    /// All selections, in the order the filter picker lists them
    pub const OPTIONS: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.is_completed(),
            Filter::Completed => task.is_completed(),
        }
    }

    /// Visible subset of `tasks`, in list order
    pub fn apply(self, tasks: &[Task]) -> impl Iterator<Item = &Task> {
        tasks.iter().filter(move |t| self.matches(t))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    /// Human-facing label for the picker and the list title
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "unknown filter '{}' (expected all, pending, or completed)",
                other
            )),
        }
    }
}
