use crate::io::config_io::ConfigError;
use crate::io::persist::PersistError;
use crate::io::store::StoreError;
use crate::model::{Task, TaskId};
use crate::ops::task_ops::{self, TaskError};

/// Errors surfaced by command handlers
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no task matches id '{0}'")]
    UnknownId(String),
    #[error("id '{prefix}' is ambiguous: matches {}", .matches.join(", "))]
    AmbiguousId { prefix: String, matches: Vec<String> },
    #[error("position {position} is out of range (1-{len})")]
    BadPosition { position: usize, len: usize },
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An exact id, else the single task whose id starts with `prefix`
pub fn resolve_id(tasks: &[Task], prefix: &str) -> Result<TaskId, CliError> {
    let exact = TaskId::from(prefix);
    if task_ops::find_task(tasks, &exact).is_some() {
        return Ok(exact);
    }
    let matches = task_ops::ids_with_prefix(tasks, prefix);
    match matches.as_slice() {
        [] => Err(CliError::UnknownId(prefix.to_string())),
        [only] => Ok((*only).clone()),
        many => Err(CliError::AmbiguousId {
            prefix: prefix.to_string(),
            matches: many.iter().map(|id| id.short().to_string()).collect(),
        }),
    }
}

/// 1-based position within a list of `len` rows to a 0-based index
pub fn resolve_position(position: usize, len: usize) -> Result<usize, CliError> {
    if position == 0 || position > len {
        return Err(CliError::BadPosition { position, len });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("abc123".into(), "One".into()),
            Task::new("abd456".into(), "Two".into()),
            Task::new("ab".into(), "Three".into()),
        ]
    }

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(resolve_id(&tasks(), "abc").unwrap().as_str(), "abc123");
    }

    #[test]
    fn exact_id_beats_prefix() {
        assert_eq!(resolve_id(&tasks(), "ab").unwrap().as_str(), "ab");
    }

    #[test]
    fn ambiguous_and_unknown_prefixes_fail() {
        assert!(matches!(
            resolve_id(&tasks()[..2], "ab"),
            Err(CliError::AmbiguousId { .. })
        ));
        assert!(matches!(
            resolve_id(&tasks(), "zz"),
            Err(CliError::UnknownId(_))
        ));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(resolve_position(1, 3).unwrap(), 0);
        assert_eq!(resolve_position(3, 3).unwrap(), 2);
        assert!(resolve_position(0, 3).is_err());
        assert!(resolve_position(4, 3).is_err());
    }
}
