use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::{KeyValueStore, MemoryStore};
use crate::model::UiConfig;
use crate::ops::task_ops::NewTask;
use crate::session::Session;
use crate::tui::app::App;
use crate::tui::input::handle_key;

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

/// Full-screen render of the app
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// App over an in-memory store with the given tasks, default config
pub fn app_with_tasks(texts: &[&str]) -> App {
    let ui = UiConfig::default();
    let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
    let mut session = Session::open(store).with_categories(ui.categories.clone());
    for text in texts {
        session.create(NewTask::new(*text)).unwrap();
    }
    App::new(session, &ui)
}

pub fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Texts of the filtered view, in order
pub fn visible_texts(app: &App) -> Vec<String> {
    app.session
        .filtered_tasks()
        .iter()
        .map(|t| t.text.clone())
        .collect()
}
