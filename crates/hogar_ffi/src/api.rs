//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level task and gamification functions via FRB.
//! - Convert typed core results into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database, so state is shared across calls.

use hogar_core::db::open_db;
use hogar_core::{
    compute_level_requirement, core_version as core_version_inner, filter_achievements,
    init_logging as init_logging_inner, ping as ping_inner, summarize, xp_progress_percent,
    Achievement, AchievementFilter, DualStore, GamificationSnapshot, Priority,
    SqliteSnapshotRepository, Task, TaskService,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "mi_hogar.sqlite3";
const DB_PATH_ENV: &str = "HOGAR_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; conflicting calls return an error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Profile progression view for the level/XP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub level: u32,
    pub xp: u32,
    /// XP needed to leave the current level.
    pub xp_required: u64,
    /// Whole percentage towards the next level, capped at 100.
    pub progress_percent: u8,
    pub total_tasks_completed: u32,
}

/// One achievement row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// `low|medium|high`.
    pub priority: String,
}

/// Gamification state envelope shared by status/reset calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamificationResponse {
    pub ok: bool,
    pub profile: Option<ProfileView>,
    pub unlocked_count: u32,
    pub total_achievements: u32,
    pub message: String,
}

/// Task mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    pub task: Option<TaskItem>,
    pub profile: Option<ProfileView>,
    /// Achievements unlocked by this action (toggle only).
    pub newly_unlocked: Vec<AchievementItem>,
    pub message: String,
}

impl TaskActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            profile: None,
            newly_unlocked: Vec::new(),
            message: message.into(),
        }
    }
}

/// Task list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksListResponse {
    pub items: Vec<TaskItem>,
    pub pending_count: u32,
    pub message: String,
}

/// Achievement list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementsListResponse {
    pub items: Vec<AchievementItem>,
    pub unlocked_count: u32,
    pub total: u32,
    pub message: String,
}

/// Loads and re-evaluates gamification state (page load/bootstrap).
#[flutter_rust_bridge::frb(sync)]
pub fn gamification_status() -> GamificationResponse {
    match with_task_service(|service| service.gamification().bootstrap()) {
        Ok(snapshot) => to_gamification_response(&snapshot, "Status loaded."),
        Err(err) => gamification_failure(format!("gamification_status failed: {err}")),
    }
}

/// Resets level, XP and achievements. Task data is left untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn gamification_reset() -> GamificationResponse {
    match with_task_service(|service| service.gamification().reset()) {
        Ok(snapshot) => to_gamification_response(&snapshot, "Progress reset."),
        Err(err) => gamification_failure(format!("gamification_reset failed: {err}")),
    }
}

/// Lists tasks pending-first.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TasksListResponse {
    match with_task_service(|service| (service.list_tasks(), service.pending_count())) {
        Ok((tasks, pending)) => TasksListResponse {
            message: format!("{pending} pending."),
            items: tasks.iter().map(to_task_item).collect(),
            pending_count: saturating_u32(pending),
        },
        Err(err) => TasksListResponse {
            items: Vec::new(),
            pending_count: 0,
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Adds a pending task. `priority` is `low|medium|high`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, priority: String) -> TaskActionResponse {
    let result = Priority::parse(&priority)
        .map_err(|err| err.to_string())
        .and_then(|priority| {
            with_task_service(|service| service.add_task(title, priority))
                .and_then(|added| added.map_err(|err| err.to_string()))
        });
    match result {
        Ok(task) => TaskActionResponse {
            ok: true,
            task: Some(to_task_item(&task)),
            profile: None,
            newly_unlocked: Vec::new(),
            message: "Task created.".to_string(),
        },
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Flips completion of one task and applies the XP transition.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    let result = parse_task_id(&task_id).and_then(|id| {
        with_task_service(|service| service.toggle_task(id))
            .and_then(|toggled| toggled.map_err(|err| err.to_string()))
    });
    match result {
        Ok(toggled) => {
            let outcome = toggled.gamification;
            let message = if outcome.newly_unlocked.is_empty() {
                "Task updated.".to_string()
            } else {
                format!(
                    "Task updated. {} achievement(s) unlocked.",
                    outcome.newly_unlocked.len()
                )
            };
            TaskActionResponse {
                ok: true,
                task: Some(to_task_item(&toggled.task)),
                profile: Some(to_profile_view(&outcome.profile)),
                newly_unlocked: outcome
                    .newly_unlocked
                    .iter()
                    .map(to_achievement_item)
                    .collect(),
                message,
            }
        }
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Deletes one task. Progress already earned is kept.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    let result = parse_task_id(&task_id).and_then(|id| {
        with_task_service(|service| service.delete_task(id))
            .and_then(|deleted| deleted.map_err(|err| err.to_string()))
    });
    match result {
        Ok(()) => TaskActionResponse {
            ok: true,
            task: None,
            profile: None,
            newly_unlocked: Vec::new(),
            message: "Task deleted.".to_string(),
        },
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Lists achievements by status (`all|unlocked|pending`) and text query.
///
/// Unknown filter values fall back to `all`.
#[flutter_rust_bridge::frb(sync)]
pub fn achievements_list(filter: String, query: String) -> AchievementsListResponse {
    let filter = parse_filter(&filter);
    match with_task_service(|service| service.gamification().snapshot()) {
        Ok(snapshot) => {
            let summary = summarize(&snapshot.achievements);
            let items = filter_achievements(&snapshot.achievements, filter, &query)
                .iter()
                .map(to_achievement_item)
                .collect::<Vec<_>>();
            AchievementsListResponse {
                message: format!("Found {} achievement(s).", items.len()),
                items,
                unlocked_count: saturating_u32(summary.unlocked),
                total: saturating_u32(summary.total),
            }
        }
        Err(err) => AchievementsListResponse {
            items: Vec::new(),
            unlocked_count: 0,
            total: 0,
            message: format!("achievements_list failed: {err}"),
        },
    }
}

fn parse_filter(value: &str) -> AchievementFilter {
    match value.trim().to_ascii_lowercase().as_str() {
        "unlocked" => AchievementFilter::Unlocked,
        "pending" => AchievementFilter::Pending,
        "all" | "" => AchievementFilter::All,
        other => {
            warn!("event=achievements_list module=ffi status=fallback filter={other}");
            AchievementFilter::All
        }
    }
}

fn parse_task_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid task id `{}`", value.trim()))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_task_service<T>(
    f: impl FnOnce(&TaskService<DualStore<SqliteSnapshotRepository<'_>>>) -> T,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let service = TaskService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
    Ok(f(&service))
}

fn to_gamification_response(
    snapshot: &GamificationSnapshot,
    message: &str,
) -> GamificationResponse {
    let summary = summarize(&snapshot.achievements);
    GamificationResponse {
        ok: true,
        profile: Some(to_profile_view(&snapshot.profile)),
        unlocked_count: saturating_u32(summary.unlocked),
        total_achievements: saturating_u32(summary.total),
        message: message.to_string(),
    }
}

fn gamification_failure(message: String) -> GamificationResponse {
    GamificationResponse {
        ok: false,
        profile: None,
        unlocked_count: 0,
        total_achievements: 0,
        message,
    }
}

fn to_profile_view(profile: &hogar_core::Profile) -> ProfileView {
    ProfileView {
        level: profile.level,
        xp: profile.xp,
        xp_required: compute_level_requirement(profile.level),
        progress_percent: xp_progress_percent(profile),
        total_tasks_completed: profile.total_tasks_completed,
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
        priority: task.priority.as_str().to_string(),
    }
}

fn to_achievement_item(achievement: &Achievement) -> AchievementItem {
    AchievementItem {
        id: achievement.id.clone(),
        title: achievement.title.clone(),
        description: achievement.description.clone(),
        unlocked: achievement.unlocked,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
