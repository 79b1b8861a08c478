use std::collections::HashSet;

use crate::model::task::{Task, TaskId};

use super::recovery::backup_corrupt_value;
use super::store::{KeyValueStore, StoreError};

/// Store key holding the JSON task array
pub const TASKS_KEY: &str = "tasks";
/// Store key holding `"true"` / `"false"`
pub const DARK_MODE_KEY: &str = "darkMode";

/// Error type for persisting state
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("stored tasks could not be read or backed up, refusing to overwrite them")]
    StoredValueProtected,
}

/// Outcome of [`load_tasks`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadedTasks {
    pub tasks: Vec<Task>,
    /// The stored value is neither readable nor backed up; saving over it
    /// would destroy the only copy.
    pub protect_stored: bool,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Load the task collection. Absent or corrupt state yields an empty
/// collection; a corrupt value (bad JSON or not UTF-8) is first copied to a
/// backup key. A value that cannot be read at all, or a corrupt one whose
/// backup failed, is flagged with `protect_stored`.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &mut S) -> LoadedTasks {
    let raw = match store.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedTasks::default(),
        Err(e @ StoreError::NotUtf8 { .. }) => return set_aside_corrupt(store, &e),
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored tasks, starting empty without saving");
            return LoadedTasks {
                tasks: Vec::new(),
                protect_stored: true,
            };
        }
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => LoadedTasks {
            tasks: normalize(tasks),
            protect_stored: false,
        },
        Err(e) => set_aside_corrupt(store, &e),
    }
}

fn set_aside_corrupt<S: KeyValueStore + ?Sized>(
    store: &mut S,
    error: &dyn std::error::Error,
) -> LoadedTasks {
    match backup_corrupt_value(store, TASKS_KEY) {
        Ok(backup) => {
            tracing::warn!(
                error = %error,
                backup = %backup,
                "stored tasks are corrupt, kept a copy and starting empty"
            );
            LoadedTasks::default()
        }
        Err(be) => {
            tracing::warn!(
                error = %error,
                backup_error = %be,
                "stored tasks are corrupt and could not be backed up, starting empty without saving"
            );
            LoadedTasks {
                tasks: Vec::new(),
                protect_stored: true,
            }
        }
    }
}

/// Serialize and overwrite the whole collection
pub fn save_tasks<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tasks: &[Task],
) -> Result<(), PersistError> {
    let json = serde_json::to_string(tasks)?;
    store.set(TASKS_KEY, &json)?;
    Ok(())
}

/// Repair loaded data so the collection invariants hold: trimmed non-blank
/// text and unique ids.
fn normalize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<TaskId> = HashSet::new();
    let mut out: Vec<Task> = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        let trimmed = task.text.trim();
        if trimmed.is_empty() {
            tracing::warn!(id = %task.id, "dropping stored task with blank text");
            continue;
        }
        if trimmed.len() != task.text.len() {
            task.text = trimmed.to_string();
        }

        if seen.contains(&task.id) {
            let fresh = fresh_unique_id(&seen);
            tracing::warn!(old = %task.id, new = %fresh, "stored task id is duplicated, reassigned");
            task.id = fresh;
        }
        seen.insert(task.id.clone());
        out.push(task);
    }
    out
}

fn fresh_unique_id(seen: &HashSet<TaskId>) -> TaskId {
    loop {
        let id = TaskId::generate();
        if !seen.contains(&id) {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// Display mode
// ---------------------------------------------------------------------------

/// Anything other than the exact string `"true"` reads as light mode
pub fn load_display_mode<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            tracing::warn!(error = %e, "could not read display mode, using light");
            false
        }
    }
}

pub fn save_display_mode<S: KeyValueStore + ?Sized>(
    store: &mut S,
    dark: bool,
) -> Result<(), PersistError> {
    store.set(DARK_MODE_KEY, if dark { "true" } else { "false" })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::{FileStore, MemoryStore};
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<Task> {
        let mut done = Task::new("2".into(), "Call mom".into());
        done.completed = true;
        vec![
            Task::new("1".into(), "Buy milk".into())
                .with_category(Some("Personal".into()))
                .with_priority(Some(Priority::Medium)),
            done,
            Task::new("3".into(), "Essay".into()).with_category(Some("School".into())),
        ]
    }

    #[test]
    fn save_then_load_round_trip() {
        let mut store = MemoryStore::new();
        save_tasks(&mut store, &sample()).unwrap();
        assert_eq!(load_tasks(&mut store).tasks, sample());
    }

    #[test]
    fn round_trip_through_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        save_tasks(&mut store, &sample()).unwrap();

        let mut reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(load_tasks(&mut reopened).tasks, sample());
    }

    #[test]
    fn persisted_layout_is_a_json_array() {
        let mut store = MemoryStore::new();
        save_tasks(&mut store, &sample()[..2]).unwrap();
        let raw = store.get(TASKS_KEY).unwrap().unwrap();
        insta::assert_snapshot!(raw, @r#"[{"id":"1","text":"Buy milk","completed":false,"category":"Personal","priority":"Medium"},{"id":"2","text":"Call mom","completed":true}]"#);
    }

    #[test]
    fn never_written_store_loads_empty() {
        let mut store = MemoryStore::new();
        assert_eq!(load_tasks(&mut store), LoadedTasks::default());
    }

    #[test]
    fn corrupt_value_loads_empty_and_is_backed_up() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "not json {{{").unwrap();
        assert_eq!(load_tasks(&mut store), LoadedTasks::default());

        let backups: Vec<String> = store
            .keys()
            .filter(|k| k.starts_with("tasks.corrupt-"))
            .map(str::to_string)
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            store.get(&backups[0]).unwrap().as_deref(),
            Some("not json {{{")
        );
    }

    #[test]
    fn invalid_utf8_is_backed_up_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let raw = b"[{\"id\":\"1\",\"text\":\"Important \xff\",\"completed\":false}]";
        std::fs::write(dir.path().join(TASKS_KEY), raw).unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert_eq!(load_tasks(&mut store), LoadedTasks::default());
        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().contains("tasks.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read(&backups[0]).unwrap(), raw.to_vec());
    }

    #[test]
    fn unreadable_value_is_protected() {
        let dir = TempDir::new().unwrap();
        // A directory where the value file should be cannot be read
        std::fs::create_dir(dir.path().join(TASKS_KEY)).unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        let loaded = load_tasks(&mut store);
        assert!(loaded.tasks.is_empty());
        assert!(loaded.protect_stored);
    }

    #[test]
    fn stored_categories_load_verbatim() {
        let mut store = MemoryStore::new();
        store
            .set(TASKS_KEY, r#"[{"id":"1","text":"Report","category":" Work"}]"#)
            .unwrap();
        let tasks = load_tasks(&mut store).tasks;
        assert_eq!(tasks[0].category.as_deref(), Some(" Work"));
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, r#"{"tasks": []}"#).unwrap();
        assert_eq!(load_tasks(&mut store), LoadedTasks::default());
    }

    #[test]
    fn browser_data_loads() {
        let mut store = MemoryStore::new();
        store
            .set(
                TASKS_KEY,
                r#"[{"id":"1715678400000","text":"Plan trip","completed":false,"category":"","priority":"High"}]"#,
            )
            .unwrap();
        let tasks = load_tasks(&mut store).tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "1715678400000");
        assert_eq!(tasks[0].category, None);
        assert_eq!(tasks[0].priority, Some(Priority::High));
    }

    #[test]
    fn load_repairs_blank_text_and_duplicate_ids() {
        let mut store = MemoryStore::new();
        store
            .set(
                TASKS_KEY,
                r#"[{"id":"1","text":"  padded  "},{"id":"2","text":"   "},{"id":"1","text":"twin"}]"#,
            )
            .unwrap();
        let tasks = load_tasks(&mut store).tasks;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id.as_str(), "1");
        assert_eq!(tasks[0].text, "padded");
        assert_eq!(tasks[1].text, "twin");
        assert_ne!(tasks[1].id.as_str(), "1");
    }

    #[test]
    fn display_mode_round_trip() {
        let mut store = MemoryStore::new();
        assert!(!load_display_mode(&store));
        save_display_mode(&mut store, true).unwrap();
        assert!(load_display_mode(&store));
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        save_display_mode(&mut store, false).unwrap();
        assert!(!load_display_mode(&store));
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn unexpected_display_mode_reads_false() {
        let mut store = MemoryStore::new();
        for value in ["TRUE", "1", "yes", " true", ""] {
            store.set(DARK_MODE_KEY, value).unwrap();
            assert!(!load_display_mode(&store), "{:?} should read as light", value);
        }
    }
}
