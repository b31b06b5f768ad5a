use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::JsonFileStore;
use crate::model::config::Config;
use crate::model::filter::Filter;
use crate::ops::task_list::{Confirmation, TaskList, TaskListError};

type CliResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, data_dir: &Path) -> CliResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };

    let config = config_io::read_config(data_dir)?;
    let store = JsonFileStore::new(config_io::storage_path(data_dir, &config));
    let mut list = TaskList::load(store);

    match command {
        Commands::Add(args) => cmd_add(&mut list, args, json),
        Commands::List(args) => cmd_list(&mut list, args, &config, json),
        Commands::Complete(args) => cmd_complete(&mut list, args, json),
        Commands::Delete(args) => cmd_delete(&mut list, args, json),
        Commands::DeleteAll(args) => cmd_delete_all(&mut list, args, json),
    }
}

/// Resolve the `-C` override, falling back to the current directory
pub fn resolve_data_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => {
            let abs = std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
            Ok(abs)
        }
        None => Ok(std::env::current_dir()?),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ask a yes/no question on stderr and read the answer from stdin.
/// Anything but an explicit yes declines.
fn confirm_on_stdin(confirmation: &Confirmation) -> bool {
    eprint!("{} [y/N] ", confirmation.prompt());
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(list: &mut TaskList<JsonFileStore>, args: AddArgs, json: bool) -> CliResult {
    let task = list.add_task(&args.description, &args.date)?;
    if json {
        print_json(&task_to_json(task))
    } else {
        println!("{}", format_task_line(task));
        Ok(())
    }
}

fn cmd_list(
    list: &mut TaskList<JsonFileStore>,
    args: ListArgs,
    config: &Config,
    json: bool,
) -> CliResult {
    let filter: Filter = args.filter.parse()?;
    list.set_filter(filter);
    let view = list.view();

    if json {
        return print_json(&TaskListJson {
            filter: filter.as_str(),
            total: list.len(),
            pending: list.pending_count(),
            tasks: &view.rows,
        });
    }

    for line in format_table(&view, &config.ui.empty_text) {
        println!("{}", line);
    }
    if !view.is_empty() {
        println!();
        println!("{}", format_summary(list.len(), list.pending_count(), &view));
    }
    Ok(())
}

fn cmd_complete(list: &mut TaskList<JsonFileStore>, args: CompleteArgs, json: bool) -> CliResult {
    if list.find(&args.id).is_none() {
        return Err(TaskListError::NotFound(args.id).into());
    }
    let changed = list.complete_task(&args.id)?;
    let Some(task) = list.find(&args.id) else {
        return Ok(());
    };

    if json {
        print_json(&task_to_json(task))
    } else {
        if changed {
            println!("{}", format_task_line(task));
        } else {
            println!("{} is already completed", task.id);
        }
        Ok(())
    }
}

fn cmd_delete(list: &mut TaskList<JsonFileStore>, args: DeleteArgs, json: bool) -> CliResult {
    let yes = args.yes;
    let deleted = list.delete_task(&args.id, |c| yes || confirm_on_stdin(c))?;
    if json {
        print_json(&serde_json::json!({ "id": args.id, "deleted": deleted }))
    } else {
        if deleted {
            println!("deleted {}", args.id);
        } else {
            println!("cancelled");
        }
        Ok(())
    }
}

fn cmd_delete_all(list: &mut TaskList<JsonFileStore>, args: DeleteAllArgs, json: bool) -> CliResult {
    let count = list.len();
    let yes = args.yes;
    let deleted = list.delete_all(|c| yes || confirm_on_stdin(c))?;
    let removed = if deleted { count } else { 0 };
    if json {
        print_json(&serde_json::json!({ "deleted": removed }))
    } else {
        if deleted {
            println!("deleted {} task{}", count, if count == 1 { "" } else { "s" });
        } else {
            println!("cancelled");
        }
        Ok(())
    }
}
