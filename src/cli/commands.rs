use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - things to do, and when"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding tasks.json and tasklist.toml (default: current directory)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task with a due date
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Mark a task completed
    Complete(CompleteArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Delete every task
    DeleteAll(DeleteAllArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// What needs doing
    pub description: String,
    /// Due date (YYYY-MM-DD or MM/DD/YYYY)
    pub date: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, pending, completed)
    #[arg(long, short, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct DeleteAllArgs {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
