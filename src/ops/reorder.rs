use crate::model::task::Task;

use super::task_ops::TaskError;

/// Move the task at `from` so that it ends up at index `to`.
///
/// `from == to` returns an identical copy. A destination outside the
/// collection means the drop landed nowhere and is rejected.
pub fn reorder(tasks: &[Task], from: usize, to: usize) -> Result<Vec<Task>, TaskError> {
    check_bounds(tasks.len(), from, to)?;
    let mut next = tasks.to_vec();
    if from != to {
        let moved = next.remove(from);
        next.insert(to, moved);
    }
    Ok(next)
}

/// Reorder within a filtered view.
///
/// `view` holds the full-collection index of each visible task, ascending, and
/// `from`/`to` are positions within the view. The visible tasks are permuted
/// among the slots they already occupy, so every hidden task keeps its exact
/// index.
pub fn reorder_in_view(
    tasks: &[Task],
    view: &[usize],
    from: usize,
    to: usize,
) -> Result<Vec<Task>, TaskError> {
    check_bounds(view.len(), from, to)?;
    if let Some(&bad) = view.iter().find(|&&idx| idx >= tasks.len()) {
        return Err(TaskError::InvalidPosition(format!(
            "view index {} outside collection of {}",
            bad,
            tasks.len()
        )));
    }

    let mut visible: Vec<&Task> = view.iter().map(|&idx| &tasks[idx]).collect();
    if from != to {
        let moved = visible.remove(from);
        visible.insert(to, moved);
    }

    let mut next = tasks.to_vec();
    for (&slot, task) in view.iter().zip(visible) {
        next[slot] = task.clone();
    }
    Ok(next)
}

fn check_bounds(len: usize, from: usize, to: usize) -> Result<(), TaskError> {
    if from >= len {
        return Err(TaskError::InvalidPosition(format!(
            "source {} outside list of {}",
            from, len
        )));
    }
    if to >= len {
        return Err(TaskError::InvalidPosition(format!(
            "destination {} outside list of {}",
            to, len
        )));
    }
    Ok(())
}
