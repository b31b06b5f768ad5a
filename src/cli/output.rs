use serde::Serialize;

use crate::model::task::{Task, TaskStatus};
use crate::ops::view::{TaskRow, TaskView};
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub filter: &'a str,
    pub total: usize,
    pub pending: usize,
    pub tasks: &'a [TaskRow],
}

pub fn task_to_json(task: &Task) -> TaskRow {
    TaskRow::from(task)
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const COLUMN_GAP: &str = "  ";

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Pending => ' ',
        TaskStatus::Completed => 'x',
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {} (due {})",
        status_char(task.status),
        task.id,
        task.description,
        task.formatted_date()
    )
}

/// Format the filtered view as an aligned table. An empty view is the
/// single `empty_text` line.
pub fn format_table(view: &TaskView, empty_text: &str) -> Vec<String> {
    if view.is_empty() {
        return vec![empty_text.to_string()];
    }

    let header = ["ID", "TASK", "DUE", "STATUS"];
    let cells: Vec<[&str; 4]> = view
        .rows
        .iter()
        .map(|r| [r.id.as_str(), r.task.as_str(), r.date.as_str(), r.status.label()])
        .collect();

    let mut widths = header.map(unicode::display_width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(unicode::display_width(cell));
        }
    }

    std::iter::once(header)
        .chain(cells)
        .map(|row| {
            let last = row.len() - 1;
            row.iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.to_string()
                    } else {
                        unicode::pad_to_width(cell, widths[i])
                    }
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
        })
        .collect()
}

/// One-line footer: `2 tasks, 1 pending (filter: pending)`
pub fn format_summary(total: usize, pending: usize, view: &TaskView) -> String {
    format!(
        "{} task{}, {} pending (filter: {})",
        total,
        if total == 1 { "" } else { "s" },
        pending,
        view.filter
    )
}
