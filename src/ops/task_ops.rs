use crate::model::task::{Priority, Task, TaskId, normalize_category};

/// Error type for task operations.
///
/// None of these are fatal: the interactive UI treats every one as "state
/// unchanged". The CLI reports them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task text cannot be blank")]
    BlankText,
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// Fields for a task that doesn't exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

impl NewTask {
    pub fn new(text: impl Into<String>) -> Self {
        NewTask {
            text: text.into(),
            ..Default::default()
        }
    }
}

// Every operation below reads the current collection and returns a
// replacement; the input is never mutated.

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a new open task. Returns the new collection and the assigned id.
pub fn create_task(tasks: &[Task], new: NewTask) -> Result<(Vec<Task>, TaskId), TaskError> {
    let text = clean_text(&new.text)?;
    let id = fresh_id(tasks);
    let task = Task::new(id.clone(), text)
        .with_category(normalize_category(new.category.as_deref()))
        .with_priority(new.priority);

    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.extend_from_slice(tasks);
    next.push(task);
    Ok((next, id))
}

/// Flip `completed` on one task, leaving every other task as it was.
pub fn toggle_complete(tasks: &[Task], id: &TaskId) -> Result<Vec<Task>, TaskError> {
    let idx = position_of(tasks, id)?;
    let mut next = tasks.to_vec();
    next[idx].completed = !next[idx].completed;
    Ok(next)
}

/// Remove one task; the rest keep their relative order.
pub fn delete_task(tasks: &[Task], id: &TaskId) -> Result<Vec<Task>, TaskError> {
    let idx = position_of(tasks, id)?;
    let mut next = tasks.to_vec();
    next.remove(idx);
    Ok(next)
}

/// Replace a task's text. Blank input is rejected the same way `create_task`
/// rejects it, so stored text is never blank.
pub fn update_text(tasks: &[Task], id: &TaskId, new_text: &str) -> Result<Vec<Task>, TaskError> {
    let idx = position_of(tasks, id)?;
    let text = clean_text(new_text)?;
    let mut next = tasks.to_vec();
    next[idx].text = text;
    Ok(next)
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_task<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|t| &t.id == id)
}

pub fn position_of(tasks: &[Task], id: &TaskId) -> Result<usize, TaskError> {
    tasks
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))
}

/// Ids of every task whose id starts with `prefix`
pub fn ids_with_prefix<'a>(tasks: &'a [Task], prefix: &str) -> Vec<&'a TaskId> {
    tasks
        .iter()
        .map(|t| &t.id)
        .filter(|id| id.as_str().starts_with(prefix))
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clean_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::BlankText);
    }
    Ok(trimmed.to_string())
}

/// A generated id that no live task uses
pub(crate) fn fresh_id(tasks: &[Task]) -> TaskId {
    loop {
        let id = TaskId::generate();
        if find_task(tasks, &id).is_none() {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
