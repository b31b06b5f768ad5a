use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::{read_config, storage_path};
use crate::io::store::{JsonFileStore, TaskStore};
use crate::model::UiConfig;
use crate::model::filter::Filter;
use crate::ops::task_list::TaskList;
use crate::ops::view::TaskView;

use super::field::TextField;
use super::input;
use super::render;
use super::theme::Theme;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Description,
    Date,
    List,
}

/// Modal drawn over the list. Confirmations are not here: they live in the
/// task list itself while they wait for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Filter picker with the highlighted (not yet applied) option
    Filter { selected: Filter },
    /// Blocking notice, dismissed with Enter or Esc
    Notice(String),
    Help,
}

/// Main application state
pub struct App {
    pub list: TaskList<Box<dyn TaskStore>>,
    pub theme: Theme,
    pub ui: UiConfig,
    pub focus: Focus,
    pub description: TextField,
    pub date: TextField,
    /// Cursor index into the visible rows
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub overlay: Option<Overlay>,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(list: TaskList<Box<dyn TaskStore>>, ui: &UiConfig) -> Self {
        let focus = if list.is_empty() {
            Focus::Description
        } else {
            Focus::List
        };
        App {
            list,
            theme: Theme::from_config(ui),
            ui: ui.clone(),
            focus,
            description: TextField::default(),
            date: TextField::default(),
            cursor: 0,
            scroll_offset: 0,
            overlay: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> TaskView {
        self.list.view()
    }

    /// Id of the task under the cursor
    pub fn selected_id(&self) -> Option<String> {
        self.view().rows.get(self.cursor).map(|r| r.id.clone())
    }

    /// Keep the cursor on a visible row after the view shrinks
    pub fn clamp_cursor(&mut self) {
        let count = self.view().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    /// The text field that has focus, if any
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Description => Some(&mut self.description),
            Focus::Date => Some(&mut self.date),
            Focus::List => None,
        }
    }

    /// Whether something modal is on screen (keys go to it, not the form)
    pub fn is_modal(&self) -> bool {
        self.overlay.is_some() || self.list.pending_confirmation().is_some()
    }
}

/// Run the TUI application against the task file in `data_dir`
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let store: Box<dyn TaskStore> = Box::new(JsonFileStore::new(storage_path(data_dir, &config)));
    let list = TaskList::load(store);
    let mut app = App::new(list, &config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
