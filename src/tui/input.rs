use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::filter::Filter;
use crate::ops::task_list::Decision;

use super::app::{App, Focus, Overlay};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.status_message = None;

    // A waiting confirmation takes every key until answered
    if app.list.pending_confirmation().is_some() {
        handle_confirm(app, key);
        return;
    }

    match app.overlay.clone() {
        Some(Overlay::Notice(_)) => handle_notice(app, key),
        Some(Overlay::Help) => handle_help(app, key),
        Some(Overlay::Filter { selected }) => handle_filter_picker(app, key, selected),
        None => match app.focus {
            Focus::Description | Focus::Date => handle_form(app, key),
            Focus::List => handle_list(app, key),
        },
    }
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

fn handle_confirm(app: &mut App, key: KeyEvent) {
    let decision = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Decision::Accept,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Decision::Decline,
        _ => return,
    };
    match app.list.resolve(decision) {
        Ok(true) => {
            app.clamp_cursor();
            app.status_message = Some("deleted".to_string());
        }
        Ok(false) => {}
        Err(e) => app.overlay = Some(Overlay::Notice(e.to_string())),
    }
}

fn handle_notice(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.overlay = None;
    }
}

fn handle_help(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
    ) {
        app.overlay = None;
    }
}

fn handle_filter_picker(app: &mut App, key: KeyEvent, selected: Filter) {
    let options = Filter::OPTIONS;
    let index = options.iter().position(|f| *f == selected).unwrap_or(0);

    let next = match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            options[(index + options.len() - 1) % options.len()]
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => options[(index + 1) % options.len()],
        KeyCode::Char('1') => Filter::All,
        KeyCode::Char('2') => Filter::Pending,
        KeyCode::Char('3') => Filter::Completed,
        KeyCode::Enter => {
            apply_filter(app, selected);
            return;
        }
        KeyCode::Esc => {
            app.overlay = None;
            return;
        }
        _ => return,
    };
    app.overlay = Some(Overlay::Filter { selected: next });
}

fn apply_filter(app: &mut App, filter: Filter) {
    app.list.set_filter(filter);
    app.overlay = None;
    app.cursor = 0;
    app.scroll_offset = 0;
}

// ---------------------------------------------------------------------------
// Add form
// ---------------------------------------------------------------------------

fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => submit_add(app),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Description => Focus::Date,
                _ => Focus::List,
            }
        }
        KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Date => Focus::Description,
                _ => Focus::List,
            }
        }
        KeyCode::Esc | KeyCode::Down => app.focus = Focus::List,
        code => {
            let Some(field) = app.focused_field_mut() else {
                return;
            };
            match code {
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    field.insert(c)
                }
                KeyCode::Backspace => field.backspace(),
                KeyCode::Delete => field.delete(),
                KeyCode::Left => field.move_left(),
                KeyCode::Right => field.move_right(),
                KeyCode::Home => field.home(),
                KeyCode::End => field.end(),
                _ => {}
            }
        }
    }
}

/// Add a task from the two form fields. On success both fields are
/// cleared and focus returns to the description.
fn submit_add(app: &mut App) {
    let added = app
        .list
        .add_task(app.description.text(), app.date.text())
        .map(|task| task.id.clone());

    match added {
        Ok(id) => {
            app.description.clear();
            app.date.clear();
            app.focus = Focus::Description;
            if let Some(pos) = app.view().position(&id) {
                app.cursor = pos;
            }
            app.status_message = Some("added".to_string());
        }
        Err(e) => app.overlay = Some(Overlay::Notice(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

fn handle_list(app: &mut App, key: KeyEvent) {
    let count = app.view().len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.cursor = count.saturating_sub(1),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => app.focus = Focus::Description,
        KeyCode::BackTab => app.focus = Focus::Date,
        KeyCode::Char('c') | KeyCode::Char(' ') => complete_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        KeyCode::Char('D') => delete_all(app),
        KeyCode::Char('f') => {
            app.overlay = Some(Overlay::Filter {
                selected: app.list.filter(),
            })
        }
        KeyCode::Char('?') => app.overlay = Some(Overlay::Help),
        _ => {}
    }
}

fn complete_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    match app.list.complete_task(&id) {
        Ok(true) => {
            // The pending filter may have just hidden it
            app.clamp_cursor();
            app.status_message = Some("completed".to_string());
        }
        Ok(false) => {}
        Err(e) => app.overlay = Some(Overlay::Notice(e.to_string())),
    }
}

fn delete_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    if let Err(e) = app.list.request_delete(&id) {
        app.overlay = Some(Overlay::Notice(e.to_string()));
    }
}

fn delete_all(app: &mut App) {
    if let Err(e) = app.list.request_delete_all() {
        app.overlay = Some(Overlay::Notice(e.to_string()));
    }
}
