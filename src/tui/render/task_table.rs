use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::task::TaskStatus;
use crate::ops::view::TaskRow;
use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// "MM/DD/YYYY" plus a two-cell gap
const DATE_W: usize = 12;
/// "COMPLETED" plus a two-cell gap
const STATUS_W: usize = 11;

/// Render the filtered task list with a header row
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = app.view();
    let bg = app.theme.background;
    let focused = app.focus == Focus::List;

    let title = format!(" Tasks \u{00b7} {} ", view.filter.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.muted).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if view.is_empty() {
        let indicator = Paragraph::new(Line::from(Span::styled(
            format!(" {}", app.ui.empty_text),
            Style::default()
                .fg(app.theme.muted)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(indicator, inner);
        return;
    }

    let width = inner.width as usize;
    let desc_w = width.saturating_sub(1 + DATE_W + STATUS_W).max(1);

    // Keep the cursor row on screen (one row goes to the header)
    let visible = (inner.height as usize).saturating_sub(1).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }

    let header_style = Style::default()
        .fg(app.theme.muted)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::from(vec![
        Span::styled(" ", header_style),
        Span::styled(unicode::pad_to_width("Task", desc_w), header_style),
        Span::styled(unicode::pad_to_width("Due", DATE_W), header_style),
        Span::styled("Status", header_style),
    ])];

    for (i, row) in view
        .rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let selected = focused && i == app.cursor;
        lines.push(render_row(app, row, desc_w, width, selected));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_row<'a>(
    app: &App,
    row: &'a TaskRow,
    desc_w: usize,
    width: usize,
    selected: bool,
) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let text_color = if row.status == TaskStatus::Completed {
        app.theme.muted
    } else {
        app.theme.text_bright
    };
    let text_style = Style::default().fg(text_color).bg(bg);

    let marker = if selected { "\u{258E}" } else { " " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(app.theme.accent).bg(bg)),
        Span::styled(unicode::pad_to_width(&row.task, desc_w), text_style),
        Span::styled(
            unicode::pad_to_width(&row.date, DATE_W),
            Style::default().fg(app.theme.text).bg(bg),
        ),
        Span::styled(
            unicode::pad_to_width(row.status.label(), STATUS_W),
            Style::default().fg(app.theme.status_color(row.status)).bg(bg),
        ),
    ];

    // Fill the rest of a selected row so the highlight spans the width
    let used = 1 + desc_w + DATE_W + STATUS_W;
    if selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::Filter;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn table_lists_rows_in_order() {
        let mut app = app_with_tasks(&[("Buy milk", "2024-01-15"), ("Walk dog", "2024-03-09")]);
        let out = render_to_string(50, 6, |frame, area| {
            render_task_table(frame, &mut app, area)
        });
        assert_snapshot!(out, @r"
        ┌ Tasks · All ───────────────────────────────────┐
        │ Task                    Due         Status     │
        │▎Buy milk                01/15/2024  PENDING    │
        │ Walk dog                03/09/2024  PENDING    │
        │                                                │
        └────────────────────────────────────────────────┘
        ");
    }

    #[test]
    fn empty_view_shows_indicator() {
        let mut app = app_with_tasks(&[("Buy milk", "2024-01-15")]);
        app.list.set_filter(Filter::Completed);
        let out = render_to_string(50, 5, |frame, area| {
            render_task_table(frame, &mut app, area)
        });
        assert!(out.contains("Tasks · Completed"));
        assert!(out.contains("No task found"));
        assert!(!out.contains("Buy milk"));
    }

    #[test]
    fn custom_empty_text() {
        let mut app = empty_app();
        app.ui.empty_text = "Nothing to do".into();
        let out = render_to_string(40, 4, |frame, area| {
            render_task_table(frame, &mut app, area)
        });
        assert!(out.contains("Nothing to do"));
    }

    #[test]
    fn completed_rows_show_label() {
        let mut app = app_with_tasks(&[("Buy milk", "2024-01-15")]);
        let id = app.list.tasks()[0].id.clone();
        app.list.complete_task(&id).unwrap();
        let out = render_to_string(50, 4, |frame, area| {
            render_task_table(frame, &mut app, area)
        });
        assert!(out.contains("COMPLETED"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let tasks: Vec<(String, String)> = (1..=9)
            .map(|i| (format!("task {i}"), format!("2024-01-0{i}")))
            .collect();
        let pairs: Vec<(&str, &str)> = tasks
            .iter()
            .map(|(d, t)| (d.as_str(), t.as_str()))
            .collect();
        let mut app = app_with_tasks(&pairs);
        app.cursor = 8;
        // 6 rows: 2 borders, 1 header, 3 visible tasks
        let out = render_to_string(50, 6, |frame, area| {
            render_task_table(frame, &mut app, area)
        });
        assert_eq!(app.scroll_offset, 6);
        assert!(out.contains("task 9"));
        assert!(out.contains("task 7"));
        assert!(!out.contains("task 6"));
    }
}
