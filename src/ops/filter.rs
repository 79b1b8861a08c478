use crate::model::filter::{FilterCriteria, StatusFilter};
use crate::model::task::Task;

/// Whether one task satisfies every criterion
pub fn matches(task: &Task, criteria: &FilterCriteria) -> bool {
    matches_search(task, &criteria.search)
        && matches_status(task, criteria.status)
        && criteria.category.admits(task.category.as_ref())
        && criteria.priority.admits(task.priority.as_ref())
}

/// Indices (into `tasks`) of the matching tasks, in collection order
pub fn matching_indices(tasks: &[Task], criteria: &FilterCriteria) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| matches(t, criteria))
        .map(|(i, _)| i)
        .collect()
}

/// The matching tasks, in collection order
pub fn filter_tasks<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    tasks.iter().filter(|t| matches(t, criteria)).collect()
}

fn matches_search(task: &Task, search: &str) -> bool {
    search.is_empty() || task.text.to_lowercase().contains(&search.to_lowercase())
}

fn matches_status(task: &Task, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Active => !task.completed,
        StatusFilter::Completed => task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::Selection;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;

    fn milk() -> Task {
        let mut task = Task::new("1".into(), "Buy milk".into())
            .with_category(Some("Work".into()))
            .with_priority(Some(Priority::High));
        task.completed = true;
        task
    }

    fn milk_criteria() -> FilterCriteria {
        FilterCriteria {
            search: "milk".into(),
            status: StatusFilter::Completed,
            category: Selection::Only("Work".into()),
            priority: Selection::Only(Priority::High),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new("1".into(), "Write Report".into()).with_category(Some("Work".into())),
            Task::new("2".into(), "Call mom".into()).with_category(Some("Personal".into())),
            Task::new("3".into(), "report card".into()).with_priority(Some(Priority::Low)),
            Task::new("4".into(), "Gym".into()).with_category(Some("work".into())),
        ]
    }

    #[test]
    fn all_four_criteria_match() {
        assert!(matches(&milk(), &milk_criteria()));
    }

    #[test]
    fn changing_any_one_criterion_excludes() {
        let task = milk();

        let mut c = milk_criteria();
        c.status = StatusFilter::Active;
        assert!(!matches(&task, &c));

        let mut c = milk_criteria();
        c.search = "bread".into();
        assert!(!matches(&task, &c));

        let mut c = milk_criteria();
        c.category = Selection::Only("School".into());
        assert!(!matches(&task, &c));

        let mut c = milk_criteria();
        c.priority = Selection::Only(Priority::Low);
        assert!(!matches(&task, &c));
    }

    #[test]
    fn search_is_case_insensitive() {
        let criteria = FilterCriteria {
            search: "REPORT".into(),
            ..Default::default()
        };
        assert_eq!(matching_indices(&sample(), &criteria), vec![0, 2]);
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let criteria = FilterCriteria {
            category: Selection::Only("Work".into()),
            ..Default::default()
        };
        assert_eq!(matching_indices(&sample(), &criteria), vec![0]);
    }

    #[test]
    fn unset_priority_never_matches_a_value() {
        let criteria = FilterCriteria {
            priority: Selection::Only(Priority::Low),
            ..Default::default()
        };
        let tasks = sample();
        let hits = filter_tasks(&tasks, &criteria);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "3");
    }

    #[test]
    fn default_criteria_keeps_everything_in_order() {
        let tasks = sample();
        assert_eq!(
            matching_indices(&tasks, &FilterCriteria::default()),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn status_filters() {
        let mut tasks = sample();
        tasks[1].completed = true;
        let active = FilterCriteria {
            status: StatusFilter::Active,
            ..Default::default()
        };
        let done = FilterCriteria {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        assert_eq!(matching_indices(&tasks, &active), vec![0, 2, 3]);
        assert_eq!(matching_indices(&tasks, &done), vec![1]);
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let tasks = sample();
        let criteria = FilterCriteria {
            search: "r".into(),
            ..Default::default()
        };
        assert_eq!(
            filter_tasks(&tasks, &criteria),
            filter_tasks(&tasks, &criteria)
        );
    }
}
