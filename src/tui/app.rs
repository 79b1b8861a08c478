use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::model::{Priority, Task, TaskId, UiConfig};
use crate::session::DynSession;

use super::editor::LineEditor;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Add form open
    Add,
    /// Inline edit of one task's text
    Edit,
    /// Search prompt in the filter bar
    Search,
    /// A task is grabbed and follows the cursor
    Move,
}

/// Focused field of the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Text,
    Category,
    Priority,
}

impl AddField {
    pub fn next(self) -> Self {
        match self {
            AddField::Text => AddField::Category,
            AddField::Category => AddField::Priority,
            AddField::Priority => AddField::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AddField::Text => AddField::Priority,
            AddField::Category => AddField::Text,
            AddField::Priority => AddField::Category,
        }
    }
}

/// Draft of the task being added
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub text: LineEditor,
    pub field: AddField,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

/// A grabbed task: `origin` and `target` are positions in the filtered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub task_id: TaskId,
    pub origin: usize,
    pub target: usize,
}

/// Main application state
pub struct App {
    pub session: DynSession,
    pub mode: Mode,
    pub should_quit: bool,
    dark_theme: Theme,
    light_theme: Theme,
    pub show_key_hints: bool,
    pub show_help: bool,
    /// Cursor position in the filtered view
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// Buffer for Edit and Search modes
    pub editor: LineEditor,
    /// Task being edited in Edit mode
    pub edit_target: Option<TaskId>,
    /// Search criterion when the prompt opened, restored on Esc
    pub search_before: String,
    pub add_form: AddForm,
    pub move_state: Option<MoveState>,
    /// Terminal cell of the focused text field's insertion point, set while
    /// rendering
    pub cursor_anchor: Option<(u16, u16)>,
}

impl App {
    pub fn new(session: DynSession, ui: &UiConfig) -> Self {
        App {
            session,
            mode: Mode::Navigate,
            should_quit: false,
            dark_theme: Theme::from_config(ui, true),
            light_theme: Theme::from_config(ui, false),
            show_key_hints: ui.show_key_hints,
            show_help: false,
            cursor: 0,
            scroll_offset: 0,
            editor: LineEditor::new(),
            edit_target: None,
            search_before: String::new(),
            add_form: AddForm::default(),
            move_state: None,
            cursor_anchor: None,
        }
    }

    /// Palette for the current display mode
    pub fn theme(&self) -> &Theme {
        if self.session.dark_mode() {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }

    /// Number of rows in the filtered view
    pub fn visible_len(&self) -> usize {
        self.session.view_indices().len()
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.session.visible(self.cursor)
    }

    /// Keep the cursor on a row after the view shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Filtered-view positions in display order. While a task is grabbed it
    /// is shown at its target slot.
    pub fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.visible_len()).collect();
        if let Some(ms) = &self.move_state
            && ms.origin < order.len()
            && ms.target < order.len()
        {
            let grabbed = order.remove(ms.origin);
            order.insert(ms.target, grabbed);
        }
        order
    }

    /// Case-insensitive literal regex for the current search text
    pub fn search_re(&self) -> Option<Regex> {
        let search = &self.session.filters().search;
        if search.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(search))).ok()
    }
}

/// Run the TUI application
pub fn run(session: DynSession, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(session, ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    tracing::info!(tasks = app.session.tasks().len(), "session closed");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
