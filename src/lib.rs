pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod engine;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use log::info;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::DbConn;
use crate::services::server::ServerService;
use crate::services::standings::{self, GroupStandings};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_setup(reset: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let conn = open_database(&config)?;
    if reset {
        database::setup::reset_database(&conn)?;
        info!("Database {} reset", config.database.path);
    } else {
        info!("Database {} ready", config.database.path);
    }
    Ok(())
}

pub fn handle_recalculate(tournament_id: i64) -> Result<()> {
    let config = AppConfig::from_env();
    let mut conn = open_database(&config)?;
    let groups = standings::recalculate_tournament(&mut conn, tournament_id)?;
    println!("Recalculated {} groups for tournament {}", groups, tournament_id);
    Ok(())
}

pub fn handle_standings(tournament_id: i64) -> Result<()> {
    let config = AppConfig::from_env();
    let mut conn = open_database(&config)?;
    let tournament = services::tournaments::load_tournament(&conn, tournament_id)?;
    let groups = standings::group_standings(&mut conn, tournament_id)?;

    println!("{}", tournament.name.bold());
    for group in &groups {
        print_group(group);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn open_database(config: &AppConfig) -> Result<DbConn> {
    let pool = database::create_pool(&config.database.path)?;
    let conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&conn)?;
    Ok(conn)
}

fn print_group(group: &GroupStandings) {
    println!();
    println!("{}", format!("Group {}", group.group_number).cyan().bold());
    println!(
        "{:>4}  {:<24} {:>5} {:>5} {:>5} {:>6} {:>6}",
        "#", "Player", "G", "W", "L", "Diff", "Pts"
    );
    if group.rows.is_empty() {
        println!("{}", "  no players".dimmed());
    }
    for row in &group.rows {
        let s = &row.standing;
        let rank = s.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
        let line = format!(
            "{:>4}  {:<24} {:>5} {:>5} {:>5} {:>+6} {:>6}",
            rank, row.player_name, s.games, s.wins, s.losses, s.diff, s.points
        );
        if s.rank == Some(1) && s.games > 0 {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}
