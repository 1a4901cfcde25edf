//! Persistence gateway for gamification and task state.
//!
//! # Responsibility
//! - Name the persisted collections and their stable keys.
//! - Define the durable snapshot contract (`SnapshotRepository`) and the
//!   recovering, best-effort gateway the services consume (`GamificationStore`).
//!
//! # Invariants
//! - Last write wins; a read returns the most recent write.
//! - `GamificationStore` never surfaces read or write failures: reads fall
//!   back to defaults, writes are logged and dropped.

use crate::db::DbError;
use crate::model::achievement::Achievement;
use crate::model::profile::Profile;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod dual_store;
mod snapshot_repo;

pub use dual_store::DualStore;
pub use snapshot_repo::SqliteSnapshotRepository;

/// Named persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Tasks,
    GamificationProfile,
    Achievements,
}

impl Collection {
    /// Stable storage key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::GamificationProfile => "gamification-profile",
            Self::Achievements => "achievements",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "snapshot serialization failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable storage of one raw JSON snapshot per collection.
pub trait SnapshotRepository {
    fn load_snapshot(&self, collection: Collection) -> StoreResult<Option<String>>;
    fn save_snapshot(&self, collection: Collection, payload: &str) -> StoreResult<()>;
}

/// Capability consumed by services: typed, recovering, best-effort.
pub trait GamificationStore {
    /// Stored profile, or `Profile::default()` when absent or unreadable.
    fn load_profile(&self) -> Profile;
    fn save_profile(&self, profile: &Profile);
    /// Stored catalog, or a freshly generated one when absent, unreadable or empty.
    fn load_achievements(&self) -> Vec<Achievement>;
    fn save_achievements(&self, achievements: &[Achievement]);
    /// Stored tasks, or an empty list when absent or unreadable.
    fn load_tasks(&self) -> Vec<Task>;
    fn save_tasks(&self, tasks: &[Task]);
}
