use crate::io::persist::{self, PersistError};
use crate::io::store::KeyValueStore;
use crate::model::filter::FilterCriteria;
use crate::model::task::{Task, TaskId};
use crate::ops::filter::matching_indices;
use crate::ops::reorder;
use crate::ops::task_ops::{self, NewTask, TaskError};

/// Session over whichever backend the binary picked at startup
pub type DynSession = Session<Box<dyn KeyValueStore>>;

/// Task counts for headers and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// The running planner: owns the store, the task collection, the filter
/// criteria and the display mode.
///
/// Every mutating entry point follows the same sequence: compute the
/// replacement collection, persist it if it differs, recompute the view.
/// Store failures are logged and remembered (see [`Session::take_write_error`])
/// but never undo the in-memory change. A stored collection that could be
/// neither read nor backed up on open is never saved over; edits then stay
/// in memory only.
pub struct Session<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    filters: FilterCriteria,
    dark_mode: bool,
    /// Full-collection indices of the tasks passing `filters`
    view: Vec<usize>,
    suggested_categories: Vec<String>,
    write_error: Option<PersistError>,
    protect_stored: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Load tasks and display mode from the store
    pub fn open(mut store: S) -> Self {
        let loaded = persist::load_tasks(&mut store);
        let tasks = loaded.tasks;
        let dark_mode = persist::load_display_mode(&store);
        tracing::info!(
            tasks = tasks.len(),
            dark_mode,
            protect_stored = loaded.protect_stored,
            "session opened"
        );

        let mut session = Session {
            store,
            tasks,
            filters: FilterCriteria::default(),
            dark_mode,
            view: Vec::new(),
            suggested_categories: Vec::new(),
            write_error: None,
            protect_stored: loaded.protect_stored,
        };
        session.recompute_view();
        session
    }

    /// Categories offered before the ones found on tasks
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.suggested_categories = categories;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.view.iter().map(|&i| &self.tasks[i]).collect()
    }

    pub fn view_indices(&self) -> &[usize] {
        &self.view
    }

    /// Task at a position of the filtered view
    pub fn visible(&self, pos: usize) -> Option<&Task> {
        self.view.get(pos).map(|&i| &self.tasks[i])
    }

    /// Position of a task within the filtered view
    pub fn view_position(&self, id: &TaskId) -> Option<usize> {
        self.view.iter().position(|&i| &self.tasks[i].id == id)
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Suggested categories followed by any other category in use, first-seen
    /// order, no duplicates
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let in_use = self.tasks.iter().filter_map(|t| t.category.as_ref());
        for category in self.suggested_categories.iter().chain(in_use) {
            if !out.contains(category) {
                out.push(category.clone());
            }
        }
        out
    }

    pub fn counts(&self) -> Counts {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Counts {
            total: self.tasks.len(),
            active: self.tasks.len() - completed,
            completed,
        }
    }

    /// The last store failure since this was called
    pub fn take_write_error(&mut self) -> Option<PersistError> {
        self.write_error.take()
    }

    // -----------------------------------------------------------------------
    // Filter criteria
    // -----------------------------------------------------------------------

    pub fn set_filter_criteria(&mut self, criteria: FilterCriteria) {
        self.filters = criteria;
        self.recompute_view();
    }

    pub fn update_filters(&mut self, f: impl FnOnce(&mut FilterCriteria)) {
        f(&mut self.filters);
        self.recompute_view();
    }

    pub fn clear_filters(&mut self) {
        self.set_filter_criteria(FilterCriteria::default());
    }

    // -----------------------------------------------------------------------
    // Collection edits
    // -----------------------------------------------------------------------

    pub fn create(&mut self, new: NewTask) -> Result<TaskId, TaskError> {
        let (next, id) = task_ops::create_task(&self.tasks, new)?;
        tracing::debug!(id = %id, "task created");
        self.commit(next);
        Ok(id)
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> Result<bool, TaskError> {
        let next = task_ops::toggle_complete(&self.tasks, id)?;
        tracing::debug!(id = %id, "task toggled");
        Ok(self.commit(next))
    }

    pub fn delete(&mut self, id: &TaskId) -> Result<bool, TaskError> {
        let next = task_ops::delete_task(&self.tasks, id)?;
        tracing::debug!(id = %id, "task deleted");
        Ok(self.commit(next))
    }

    pub fn update_text(&mut self, id: &TaskId, text: &str) -> Result<bool, TaskError> {
        let next = task_ops::update_text(&self.tasks, id, text)?;
        tracing::debug!(id = %id, "task text updated");
        Ok(self.commit(next))
    }

    /// Move within the full collection
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, TaskError> {
        let next = reorder::reorder(&self.tasks, from, to)?;
        tracing::debug!(from, to, "tasks reordered");
        Ok(self.commit(next))
    }

    /// Move within the filtered view; hidden tasks stay where they are
    pub fn reorder_in_view(&mut self, from: usize, to: usize) -> Result<bool, TaskError> {
        let next = reorder::reorder_in_view(&self.tasks, &self.view, from, to)?;
        tracing::debug!(from, to, filtered = self.filters.is_active(), "view reordered");
        Ok(self.commit(next))
    }

    // -----------------------------------------------------------------------
    // Display mode
    // -----------------------------------------------------------------------

    pub fn set_display_mode(&mut self, dark: bool) {
        if self.dark_mode == dark {
            return;
        }
        self.dark_mode = dark;
        if let Err(e) = persist::save_display_mode(&mut self.store, dark) {
            tracing::warn!(error = %e, "could not save display mode");
            self.write_error = Some(e);
        }
    }

    /// Returns the new mode (true = dark)
    pub fn toggle_display_mode(&mut self) -> bool {
        self.set_display_mode(!self.dark_mode);
        self.dark_mode
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Replace the collection if it changed, persist, refresh the view.
    /// Returns whether anything changed.
    fn commit(&mut self, next: Vec<Task>) -> bool {
        if next == self.tasks {
            return false;
        }
        self.tasks = next;
        if self.protect_stored {
            tracing::warn!("stored tasks were unreadable on open, not saving");
            self.write_error = Some(PersistError::StoredValueProtected);
        } else if let Err(e) = persist::save_tasks(&mut self.store, &self.tasks) {
            tracing::warn!(error = %e, "could not save tasks");
            self.write_error = Some(e);
        }
        self.recompute_view();
        true
    }

    fn recompute_view(&mut self) {
        self.view = matching_indices(&self.tasks, &self.filters);
    }
}
