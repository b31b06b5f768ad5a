use serde::Serialize;

use crate::model::filter::Filter;
use crate::model::task::{Task, TaskStatus};

/// One visible row: what the list shows for a task. The id is what the
/// row's Complete and Delete actions act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub task: String,
    pub date: String,
    pub status: TaskStatus,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        TaskRow {
            id: task.id.clone(),
            task: task.description.clone(),
            date: task.formatted_date(),
            status: task.status,
        }
    }
}

/// The filtered projection of the task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub filter: Filter,
    pub rows: Vec<TaskRow>,
}

impl TaskView {
    /// No rows: show the empty-state indicator instead of a list
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }
}

/// Project `tasks` through `filter`, keeping list order
pub fn project(tasks: &[Task], filter: Filter) -> TaskView {
    TaskView {
        filter,
        rows: filter.apply(tasks).map(TaskRow::from).collect(),
    }
}
