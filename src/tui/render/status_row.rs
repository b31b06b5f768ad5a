use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {message}"),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    } else if app.ui.show_key_hints && !app.is_modal() {
        spans.push(Span::styled(
            format!(" {}", key_hints(app.focus)),
            Style::default().fg(app.theme.muted).bg(bg),
        ));
    }

    // Counts, right-aligned
    let counts = format!(
        "{} tasks \u{00b7} {} pending ",
        app.list.len(),
        app.list.pending_count()
    );
    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let counts_width = unicode::display_width(&counts);
    if content_width + counts_width < width {
        let padding = width - content_width - counts_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            counts,
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Description | Focus::Date => "Enter add  Tab next  Esc list",
        Focus::List => "c complete  d delete  D all  f filter  a add  ? help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn counts_and_hints() {
        let mut app = app_with_tasks(&[("a", "2024-01-01"), ("b", "2024-01-02")]);
        let id = app.list.tasks()[0].id.clone();
        app.list.complete_task(&id).unwrap();
        let out = render_to_string(80, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.starts_with(" c complete"));
        assert!(out.ends_with("2 tasks \u{00b7} 1 pending"));
    }

    #[test]
    fn message_replaces_hints() {
        let mut app = empty_app();
        app.status_message = Some("added".into());
        let out = render_to_string(60, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.starts_with(" added"));
        assert!(!out.contains("Enter add"));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = empty_app();
        app.ui.show_key_hints = false;
        let out = render_to_string(60, 1, |frame, area| render_status_row(frame, &app, area));
        assert_eq!(out.trim(), "0 tasks \u{00b7} 0 pending");
    }
}
