mod resolve;
pub use resolve::{CliError, resolve_id, resolve_position};

use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store::{FileStore, KeyValueStore, MemoryStore};
use crate::io::{config_io, logging, paths};
use crate::model::{FilterCriteria, PlannerConfig, Selection, TaskId, normalize_category};
use crate::ops::task_ops::NewTask;
use crate::session::{DynSession, Session};
use crate::tui;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = paths::resolve_data_dir(cli.data_dir.as_deref());
    let config = config_io::read_config(&data_dir, cli.config.as_deref())?;
    if !cli.ephemeral {
        logging::init_logging(&config.log, &data_dir);
    }

    let mut session = open_session(&data_dir, cli.ephemeral, &config)?;

    match cli.command {
        None => tui::run(session, &config.ui),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&mut session, args, json),
            Commands::Theme(args) => cmd_theme(&mut session, args, json),

            // Collection edits
            Commands::Add(args) => cmd_add(&mut session, args, json),
            Commands::Toggle(args) => cmd_toggle(&mut session, args, json),
            Commands::Rm(args) => cmd_rm(&mut session, args, json),
            Commands::Edit(args) => cmd_edit(&mut session, args, json),
            Commands::Mv(args) => cmd_mv(&mut session, args, json),
        },
    }
}

/// File-backed session in the data directory, or an in-memory one
pub fn open_session(
    data_dir: &Path,
    ephemeral: bool,
    config: &PlannerConfig,
) -> Result<DynSession, CliError> {
    let store: Box<dyn KeyValueStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::open(data_dir)?)
    };
    Ok(Session::open(store).with_categories(config.ui.categories.clone()))
}

/// Filter flags to criteria; absent flags select everything
fn criteria_from(args: &FilterArgs) -> FilterCriteria {
    FilterCriteria {
        search: args.search.clone().unwrap_or_default(),
        status: args.status.unwrap_or_default(),
        category: match normalize_category(args.category.as_deref()) {
            Some(c) => Selection::Only(c),
            None => Selection::All,
        },
        priority: match args.priority {
            Some(p) => Selection::Only(p),
            None => Selection::All,
        },
    }
}

/// Report a store failure from the last edit
fn check_saved(session: &mut DynSession) -> Result<(), CliError> {
    match session.take_write_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Views and display mode
// ---------------------------------------------------------------------------

fn cmd_list(session: &mut DynSession, args: ListArgs, json: bool) -> CmdResult {
    session.set_filter_criteria(criteria_from(&args.filter));
    let tasks = session.filtered_tasks();
    if json {
        return print_json(&tasks);
    }
    for line in format_listing(&tasks) {
        println!("{}", line);
    }
    if session.filters().is_active() {
        println!();
        println!("{} shown ({})", tasks.len(), format_counts(session.counts()));
    }
    Ok(())
}

fn cmd_theme(session: &mut DynSession, args: ThemeArgs, json: bool) -> CmdResult {
    match args.mode {
        None => {}
        Some(ThemeChoice::Dark) => session.set_display_mode(true),
        Some(ThemeChoice::Light) => session.set_display_mode(false),
        Some(ThemeChoice::Toggle) => {
            session.toggle_display_mode();
        }
    }
    check_saved(session)?;

    let dark = session.dark_mode();
    if json {
        return print_json(&DisplayModeJson { dark_mode: dark });
    }
    println!("{}", display_mode_name(dark));
    Ok(())
}

// ---------------------------------------------------------------------------
// Collection edits
// ---------------------------------------------------------------------------

fn cmd_add(session: &mut DynSession, args: AddArgs, json: bool) -> CmdResult {
    let new = NewTask {
        text: args.text.join(" "),
        category: args.category,
        priority: args.priority,
    };
    let id = session.create(new).map_err(CliError::from)?;
    check_saved(session)?;

    if json {
        let task = session
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CliError::UnknownId(id.to_string()))?;
        return print_json(&CreatedJson {
            id: id.as_str(),
            task,
        });
    }
    println!("{}", id);
    Ok(())
}

fn cmd_toggle(session: &mut DynSession, args: IdArgs, json: bool) -> CmdResult {
    let id = resolve_id(session.tasks(), &args.id)?;
    session.toggle_complete(&id).map_err(CliError::from)?;
    check_saved(session)?;
    print_task(session, &id, json)
}

fn cmd_rm(session: &mut DynSession, args: IdArgs, json: bool) -> CmdResult {
    let id = resolve_id(session.tasks(), &args.id)?;
    let removed = session
        .tasks()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| CliError::UnknownId(args.id.clone()))?;
    session.delete(&id).map_err(CliError::from)?;
    check_saved(session)?;

    if json {
        return print_json(&removed);
    }
    println!("deleted: {}", removed.text);
    Ok(())
}

fn cmd_edit(session: &mut DynSession, args: EditArgs, json: bool) -> CmdResult {
    let id = resolve_id(session.tasks(), &args.id)?;
    session
        .update_text(&id, &args.text.join(" "))
        .map_err(CliError::from)?;
    check_saved(session)?;
    print_task(session, &id, json)
}

fn cmd_mv(session: &mut DynSession, args: MvArgs, json: bool) -> CmdResult {
    session.set_filter_criteria(criteria_from(&args.filter));
    let len = session.view_indices().len();
    let from = resolve_position(args.from, len)?;
    let to = resolve_position(args.to, len)?;
    session.reorder_in_view(from, to).map_err(CliError::from)?;
    check_saved(session)?;

    let tasks = session.filtered_tasks();
    if json {
        return print_json(&MovedJson {
            from: args.from,
            to: args.to,
            tasks,
        });
    }
    for line in format_listing(&tasks) {
        println!("{}", line);
    }
    Ok(())
}

/// Print one task as a listing line numbered by its full-list position
fn print_task(session: &DynSession, id: &TaskId, json: bool) -> CmdResult {
    let Some((pos, task)) = session
        .tasks()
        .iter()
        .enumerate()
        .find(|(_, t)| &t.id == id)
    else {
        return Err(CliError::UnknownId(id.to_string()).into());
    };
    if json {
        return print_json(task);
    }
    println!("{}", format_task_line(pos + 1, task));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, StatusFilter};

    #[test]
    fn absent_flags_select_everything() {
        assert_eq!(criteria_from(&FilterArgs::default()), FilterCriteria::default());
    }

    #[test]
    fn flags_map_to_criteria() {
        let args = FilterArgs {
            search: Some("milk".into()),
            status: Some(StatusFilter::Active),
            category: Some(" Work ".into()),
            priority: Some(Priority::Low),
        };
        let criteria = criteria_from(&args);
        assert_eq!(criteria.search, "milk");
        assert_eq!(criteria.status, StatusFilter::Active);
        assert_eq!(criteria.category, Selection::Only("Work".into()));
        assert_eq!(criteria.priority, Selection::Only(Priority::Low));
    }

    #[test]
    fn ephemeral_session_touches_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let mut session = open_session(&data_dir, true, &PlannerConfig::default()).unwrap();
        session.create(NewTask::new("in memory")).unwrap();
        assert!(!data_dir.exists());
        assert_eq!(session.categories(), vec!["Work", "Personal", "School"]);
    }

    #[test]
    fn file_session_persists_between_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PlannerConfig::default();
        let mut session = open_session(dir.path(), false, &config).unwrap();
        session.create(NewTask::new("kept")).unwrap();
        check_saved(&mut session).unwrap();

        let reopened = open_session(dir.path(), false, &config).unwrap();
        assert_eq!(reopened.tasks().len(), 1);
        assert_eq!(reopened.tasks()[0].text, "kept");
    }
}
