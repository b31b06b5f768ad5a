use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::{MemoryStore, TaskStore};
use crate::model::UiConfig;
use crate::ops::task_list::TaskList;
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 16;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen of `app`
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An App over an empty in-memory store
pub fn empty_app() -> App {
    let store: Box<dyn TaskStore> = Box::new(MemoryStore::new());
    App::new(TaskList::load(store), &UiConfig::default())
}

/// An App with one pending task per `(description, YYYY-MM-DD)` pair, in order
pub fn app_with_tasks(tasks: &[(&str, &str)]) -> App {
    let store: Box<dyn TaskStore> = Box::new(MemoryStore::new());
    let mut list = TaskList::load(store);
    for (description, date) in tasks {
        list.add_task(description, date).unwrap();
    }
    App::new(list, &UiConfig::default())
}
