use serde::Serialize;

use crate::model::Task;
use crate::session::Counts;

pub const NO_TASKS: &str = "No tasks found.";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CreatedJson<'a> {
    pub id: &'a str,
    pub task: &'a Task,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModeJson {
    pub dark_mode: bool,
}

#[derive(Serialize)]
pub struct MovedJson<'a> {
    pub from: usize,
    pub to: usize,
    pub tasks: Vec<&'a Task>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `  2. [x] 1f0c9e2a  Call mom  #Personal  !High`
pub fn format_task_line(position: usize, task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "{:>3}. [{}] {}  {}",
        position,
        check,
        task.id.short(),
        task.text
    );
    if let Some(category) = &task.category {
        line.push_str(&format!("  #{}", category));
    }
    if let Some(priority) = task.priority {
        line.push_str(&format!("  !{}", priority));
    }
    line
}

/// Numbered listing of a view; positions are 1-based
pub fn format_listing(tasks: &[&Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec![NO_TASKS.to_string()];
    }
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format_task_line(i + 1, task))
        .collect()
}

pub fn format_counts(counts: Counts) -> String {
    format!(
        "{} tasks, {} active, {} completed",
        counts.total, counts.active, counts.completed
    )
}

pub fn display_mode_name(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}
