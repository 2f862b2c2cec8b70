use anyhow::Result;

use group_tournaments::cli::Command;
use group_tournaments::{
    handle_completions, handle_recalculate, handle_serve, handle_setup, handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Setup { reset } => handle_setup(*reset),
        Command::Recalculate { tournament_id } => handle_recalculate(*tournament_id),
        Command::Standings { tournament_id } => handle_standings(*tournament_id),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
