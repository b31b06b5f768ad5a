use std::collections::HashSet;

use tracing::{debug, error, warn};

use crate::io::store::{StoreError, TaskStore};
use crate::model::filter::Filter;
use crate::model::task::{Task, TaskStatus, parse_due_date};
use crate::ops::ids::IdGenerator;
use crate::ops::view::{self, TaskView};

/// Notice shown when the add form is missing a field
pub const MISSING_FIELDS: &str = "Please fill in both task and date!";

/// Error type for task list operations. Every variant leaves the list as it
/// was before the call.
#[derive(Debug, thiserror::Error)]
pub enum TaskListError {
    #[error("{0}")]
    Validation(String),
    #[error("No tasks to delete!")]
    NothingToDelete,
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("a confirmation is already waiting for an answer")]
    ConfirmationPending,
    #[error("nothing is waiting for confirmation")]
    NoPendingConfirmation,
    #[error("could not save tasks: {0}")]
    Storage(#[from] StoreError),
}

/// A destructive action parked until the user answers its prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteTask { id: String },
    DeleteAll,
}

impl Confirmation {
    /// The question put to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteTask { .. } => "Are you sure you want to delete this task?",
            Confirmation::DeleteAll => {
                "Are you sure you want to delete ALL tasks? This action cannot be undone."
            }
        }
    }
}

/// The user's answer to a [`Confirmation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

impl From<bool> for Decision {
    fn from(accepted: bool) -> Self {
        if accepted {
            Decision::Accept
        } else {
            Decision::Decline
        }
    }
}

/// Owns the task list, the current filter and the storage slot.
///
/// Every mutation is written to the store before it becomes visible: if the
/// save fails, the in-memory list is left untouched.
pub struct TaskList<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
    filter: Filter,
    ids: IdGenerator,
    pending: Option<Confirmation>,
}

impl<S: TaskStore> TaskList<S> {
    /// Load the list from `store`. Missing or unreadable data gives an
    /// empty list.
    pub fn load(mut store: S) -> Self {
        let mut tasks = store.load();
        let mut ids = IdGenerator::seeded(&tasks);
        repair_duplicate_ids(&mut tasks, &mut ids);
        TaskList {
            store,
            tasks,
            filter: Filter::default(),
            ids,
            pending: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of tasks still pending
    pub fn pending_count(&self) -> usize {
        Filter::Pending.apply(&self.tasks).count()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new pending task. `due_date` is the raw input, either
    /// `YYYY-MM-DD` or `MM/DD/YYYY`.
    pub fn add_task(&mut self, description: &str, due_date: &str) -> Result<&Task, TaskListError> {
        self.ensure_no_pending()?;
        let description = description.trim();
        if description.is_empty() || due_date.trim().is_empty() {
            return Err(TaskListError::Validation(MISSING_FIELDS.to_string()));
        }
        let due = parse_due_date(due_date).ok_or_else(|| {
            TaskListError::Validation(format!(
                "Invalid date: {} (use YYYY-MM-DD or MM/DD/YYYY)",
                due_date.trim()
            ))
        })?;

        let task = Task::new(self.ids.next_id(), description.to_string(), due);
        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)?;
        debug!(count = self.tasks.len(), "added task");
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Mark a task completed. Returns whether anything changed: an unknown
    /// id or an already-completed task is a no-op.
    pub fn complete_task(&mut self, id: &str) -> Result<bool, TaskListError> {
        self.ensure_no_pending()?;
        let Some(index) = self
            .tasks
            .iter()
            .position(|t| t.id == id && t.status == TaskStatus::Pending)
        else {
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next[index].status = TaskStatus::Completed;
        self.commit(next)?;
        debug!(id, "completed task");
        Ok(true)
    }

    /// First step of deleting one task: park the request and return the
    /// prompt to show. Nothing is removed until [`TaskList::resolve`].
    pub fn request_delete(&mut self, id: &str) -> Result<&Confirmation, TaskListError> {
        self.ensure_no_pending()?;
        if self.find(id).is_none() {
            return Err(TaskListError::NotFound(id.to_string()));
        }
        Ok(self.pending.insert(Confirmation::DeleteTask { id: id.to_string() }))
    }

    /// First step of deleting every task. Fails on an empty list.
    pub fn request_delete_all(&mut self) -> Result<&Confirmation, TaskListError> {
        self.ensure_no_pending()?;
        if self.tasks.is_empty() {
            return Err(TaskListError::NothingToDelete);
        }
        Ok(self.pending.insert(Confirmation::DeleteAll))
    }

    /// Second step: carry out or drop the parked confirmation. Returns
    /// whether the action ran.
    pub fn resolve(&mut self, decision: Decision) -> Result<bool, TaskListError> {
        let confirmation = self
            .pending
            .take()
            .ok_or(TaskListError::NoPendingConfirmation)?;
        if decision == Decision::Decline {
            debug!(?confirmation, "confirmation declined");
            return Ok(false);
        }

        let next = match &confirmation {
            Confirmation::DeleteTask { id } => {
                self.tasks.iter().filter(|t| &t.id != id).cloned().collect()
            }
            Confirmation::DeleteAll => Vec::new(),
        };
        self.commit(next)?;
        debug!(?confirmation, count = self.tasks.len(), "deleted");
        Ok(true)
    }

    /// Delete one task, asking `confirm` first. For callers that can block
    /// on an answer.
    pub fn delete_task(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&Confirmation) -> bool,
    ) -> Result<bool, TaskListError> {
        let decision = Decision::from(confirm(self.request_delete(id)?));
        self.resolve(decision)
    }

    /// Delete every task, asking `confirm` first
    pub fn delete_all(
        &mut self,
        confirm: impl FnOnce(&Confirmation) -> bool,
    ) -> Result<bool, TaskListError> {
        let decision = Decision::from(confirm(self.request_delete_all()?));
        self.resolve(decision)
    }

    /// Change which tasks the view shows. Never touches the list or storage.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The rows to display under the current filter
    pub fn view(&self) -> TaskView {
        view::project(&self.tasks, self.filter)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure_no_pending(&self) -> Result<(), TaskListError> {
        if self.pending.is_some() {
            return Err(TaskListError::ConfirmationPending);
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), TaskListError> {
        if let Err(e) = self.store.save(&next) {
            error!(error = %e, "save failed, change discarded");
            return Err(e.into());
        }
        self.tasks = next;
        Ok(())
    }
}

/// Give later duplicates of an id a fresh one
fn repair_duplicate_ids(tasks: &mut [Task], ids: &mut IdGenerator) {
    let mut seen = HashSet::new();
    for task in tasks.iter_mut() {
        if !seen.insert(task.id.clone()) {
            let fresh = ids.next_id();
            warn!(old = %task.id, new = %fresh, "duplicate task id in storage, reassigned");
            task.id = fresh.clone();
            seen.insert(fresh);
        }
    }
}
