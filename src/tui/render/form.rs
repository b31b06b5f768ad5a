use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::field::TextField;

const DESCRIPTION_PLACEHOLDER: &str = "What needs doing?";
const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";
/// Date box: "YYYY-MM-DD" plus borders and a spare cell for the cursor
const DATE_BOX_W: u16 = 16;

/// Render the add form: description and due date side by side
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(DATE_BOX_W)])
        .split(area);

    render_field(
        frame,
        app,
        chunks[0],
        " Task ",
        &app.description,
        DESCRIPTION_PLACEHOLDER,
        app.focus == Focus::Description,
    );
    render_field(
        frame,
        app,
        chunks[1],
        " Due ",
        &app.date,
        DATE_PLACEHOLDER,
        app.focus == Focus::Date,
    );
}

fn render_field(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    field: &TextField,
    placeholder: &str,
    focused: bool,
) {
    let bg = app.theme.background;
    let border_color = if focused {
        app.theme.accent
    } else {
        app.theme.muted
    };
    let title_style = if focused {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(title.to_string(), title_style))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    // Scroll horizontally so the cursor stays inside the box
    let inner_w = inner.width as usize;
    let cursor_col = field.cursor_col();
    let h_scroll = if inner_w > 0 && cursor_col >= inner_w {
        cursor_col - inner_w + 1
    } else {
        0
    };

    let paragraph = if field.is_empty() {
        Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(app.theme.muted).bg(bg),
        ))
    } else {
        Paragraph::new(Span::styled(
            field.text().to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
        .scroll((0, h_scroll as u16))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused && !app.is_modal() && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (cursor_col - h_scroll) as u16;
        frame.set_cursor_position((x, inner.y));
    }
}
