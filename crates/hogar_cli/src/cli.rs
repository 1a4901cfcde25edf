//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap and keeps it separate from execution.

use clap::{Parser, Subcommand, ValueEnum};
use hogar_core::{AchievementFilter, Priority, TaskId};
use uuid::Uuid;

/// Mi Hogar household progress
#[derive(Debug, Parser)]
#[command(name = "hogar")]
#[command(about = "Mi Hogar - household tasks, levels and achievements", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Subcommand (defaults to `status`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Show level, XP and achievement count
    Status,

    /// List tasks, pending first
    Tasks,

    /// Add a task
    Add {
        /// Task priority
        #[arg(value_enum)]
        priority: PriorityArg,
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Complete or un-complete a task
    Toggle {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },

    /// Delete a task
    Delete {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },

    /// List achievements
    Achievements {
        /// Status filter (defaults to `all`)
        #[arg(value_enum)]
        filter: Option<FilterArg>,
        /// Case-insensitive search over title and description
        query: Vec<String>,
    },

    /// Reset level, XP and achievements (tasks are kept)
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Unlocked,
    Pending,
}

impl From<FilterArg> for AchievementFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => AchievementFilter::All,
            FilterArg::Unlocked => AchievementFilter::Unlocked,
            FilterArg::Pending => AchievementFilter::Pending,
        }
    }
}

fn parse_task_id(value: &str) -> Result<TaskId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid task id `{}`", value.trim()))
}
