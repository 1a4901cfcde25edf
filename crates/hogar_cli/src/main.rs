//! Command-line entry point for local household progress.
//!
//! # Responsibility
//! - Drive task and gamification use-cases against the local database.
//! - Keep output plain and line-oriented for scripting.
//!
//! Configuration: `HOGAR_DB_PATH` selects the database file (default
//! `<tmp>/mi_hogar.sqlite3`); `HOGAR_LOG_DIR` enables file logging.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use hogar_core::db::open_db;
use hogar_core::{
    compute_level_requirement, default_log_level, filter_achievements, init_logging, summarize,
    xp_progress_percent, AchievementFilter, DualStore, SqliteSnapshotRepository, TaskService,
};
use std::path::PathBuf;
use std::process::ExitCode;

type CliTaskService<'conn> = TaskService<DualStore<SqliteSnapshotRepository<'conn>>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(dir) = std::env::var("HOGAR_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli.command.unwrap_or(Command::Status)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    let conn = open_db(db_path()).map_err(|err| format!("failed to open database: {err}"))?;
    let service = TaskService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));

    match command {
        Command::Status => print_status(&service),
        Command::Tasks => {
            for task in service.list_tasks() {
                let mark = if task.completed { "x" } else { " " };
                println!(
                    "[{mark}] {} {:<6} {}",
                    task.id,
                    task.priority.as_str(),
                    task.title
                );
            }
            println!("{} pending", service.pending_count());
        }
        Command::Add { priority, title } => {
            let task = service
                .add_task(title.join(" "), priority.into())
                .map_err(|err| err.to_string())?;
            println!("{}", task.id);
        }
        Command::Toggle { id } => {
            let toggled = service.toggle_task(id).map_err(|err| err.to_string())?;
            let profile = toggled.gamification.profile;
            println!(
                "completed={} level={} xp={}",
                toggled.task.completed, profile.level, profile.xp
            );
            for achievement in toggled.gamification.newly_unlocked {
                println!("unlocked {} {}", achievement.id, achievement.title);
            }
        }
        Command::Delete { id } => service.delete_task(id).map_err(|err| err.to_string())?,
        Command::Achievements { filter, query } => {
            let snapshot = service.gamification().snapshot();
            let filter = filter.map_or(AchievementFilter::All, Into::into);
            let query = query.join(" ");
            for achievement in filter_achievements(&snapshot.achievements, filter, &query) {
                let mark = if achievement.unlocked { "*" } else { " " };
                println!("[{mark}] {:<10} {}", achievement.id, achievement.description);
            }
        }
        Command::Reset { yes } => {
            if !yes {
                return Err("reset is destructive; re-run with `reset --yes`".to_string());
            }
            let snapshot = service.gamification().reset();
            println!(
                "level={} achievements={}",
                snapshot.profile.level,
                snapshot.achievements.len()
            );
        }
    }
    Ok(())
}

fn print_status(service: &CliTaskService<'_>) {
    let snapshot = service.gamification().bootstrap();
    let profile = snapshot.profile;
    let summary = summarize(&snapshot.achievements);
    println!("level={}", profile.level);
    println!(
        "xp={}/{} ({}%)",
        profile.xp,
        compute_level_requirement(profile.level),
        xp_progress_percent(&profile)
    );
    println!("tasks_completed={}", profile.total_tasks_completed);
    println!("achievements={}/{}", summary.unlocked, summary.total);
}

fn db_path() -> PathBuf {
    match std::env::var("HOGAR_DB_PATH") {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => std::env::temp_dir().join("mi_hogar.sqlite3"),
    }
}
