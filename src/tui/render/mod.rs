pub mod form;
pub mod help_overlay;
pub mod popups;
pub mod status_row;
pub mod task_table;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Overlay};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: add form (3 rows) | task table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // bordered input fields
            Constraint::Min(1),    // task table
            Constraint::Length(1), // status row
        ])
        .split(area);

    form::render_form(frame, app, chunks[0]);
    task_table::render_task_table(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Modals (rendered on top of everything)
    match &app.overlay {
        Some(Overlay::Help) => help_overlay::render_help_overlay(frame, app, area),
        Some(Overlay::Filter { selected }) => {
            popups::render_filter_picker(frame, app, *selected, area)
        }
        Some(Overlay::Notice(message)) => popups::render_notice(frame, app, message, area),
        None => {}
    }
    if let Some(confirmation) = app.list.pending_confirmation() {
        popups::render_confirm(frame, app, confirmation.prompt(), area);
    }
}
