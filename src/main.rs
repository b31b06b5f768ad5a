use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::logging;

fn main() {
    let cli = Cli::parse();

    let data_dir = match handlers::resolve_data_dir(cli.data_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            logging::init_for_tui(&data_dir);
            tasklist::tui::run(&data_dir)
        }
        Some(_) => {
            logging::init_for_cli();
            handlers::dispatch(cli, &data_dir)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
