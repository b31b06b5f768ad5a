use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::model::filter::Filter;
use crate::tui::app::App;
use crate::util::unicode;

/// Render a yes/no question about a pending delete
pub fn render_confirm(frame: &mut Frame, app: &App, prompt: &str, area: Rect) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.muted).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(prompt.to_string(), text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", key_style),
            Span::styled(" confirm  ", dim_style),
            Span::styled("n", key_style),
            Span::styled("/", dim_style),
            Span::styled("Esc", key_style),
            Span::styled(" cancel", dim_style),
        ]),
    ];
    render_box(frame, app, " Confirm ", lines, app.theme.danger, area);
}

/// Render a blocking notice (validation failures and the like)
pub fn render_notice(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(app.theme.accent)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ok", Style::default().fg(app.theme.muted).bg(bg)),
        ]),
    ];
    render_box(frame, app, " Notice ", lines, app.theme.pending, area);
}

/// Render the filter picker with `selected` highlighted
pub fn render_filter_picker(frame: &mut Frame, app: &App, selected: Filter, area: Rect) {
    let bg = app.theme.background;
    let current = app.list.filter();

    let mut lines: Vec<Line> = Vec::new();
    for (i, option) in Filter::OPTIONS.iter().enumerate() {
        let is_selected = *option == selected;
        let row_bg = if is_selected {
            app.theme.selection_bg
        } else {
            bg
        };
        let marker = if *option == current { "\u{2022}" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", i + 1),
                Style::default().fg(app.theme.muted).bg(row_bg),
            ),
            Span::styled(
                format!("{marker} "),
                Style::default().fg(app.theme.accent).bg(row_bg),
            ),
            Span::styled(
                unicode::pad_to_width(option.label(), 12),
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter apply  Esc cancel",
        Style::default().fg(app.theme.muted).bg(bg),
    )));

    render_box(frame, app, " Filter ", lines, app.theme.accent, area);
}

/// Draw `lines` in a bordered box centered over `area`
fn render_box(
    frame: &mut Frame,
    app: &App,
    title: &str,
    lines: Vec<Line>,
    border: Color,
    area: Rect,
) {
    let bg = app.theme.background;
    let content_w = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let popup_w = (content_w + 4)
        .max(title.len() as u16 + 4)
        .min(area.width.saturating_sub(2));
    // Long lines wrap inside the border and padding
    let inner_w = popup_w.saturating_sub(4).max(1) as usize;
    let text_h: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(inner_w).max(1))
        .sum();
    let popup_h = (text_h as u16 + 2).min(area.height);

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(border)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn confirm_shows_prompt_and_keys() {
        let app = empty_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm(
                frame,
                &app,
                "Are you sure you want to delete this task?",
                area,
            )
        });
        assert!(out.contains(" Confirm "));
        assert!(out.contains("Are you sure you want to delete this task?"));
        assert!(out.contains("y confirm  n/Esc cancel"));
    }

    #[test]
    fn filter_picker_lists_options() {
        let app = empty_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_filter_picker(frame, &app, Filter::Pending, area)
        });
        assert!(out.contains("1 \u{2022} All"));
        assert!(out.contains("2   Pending"));
        assert!(out.contains("3   Completed"));
    }

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
    }
}
