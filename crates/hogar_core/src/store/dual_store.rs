//! Dual-write gateway: in-memory fast path in front of durable snapshots.
//!
//! # Responsibility
//! - Serve reads from the fast-path cache, then durable storage, then defaults.
//! - Write the cache first and the durable snapshot second, best-effort.
//!
//! # Invariants
//! - Malformed or invalid payloads are never returned; the next source is tried.
//! - Durable write failures are logged at `warn` and never surfaced.
//! - The durable profile snapshot is a one-element array; the cache holds the
//!   bare record. Both shapes are accepted on read.

use super::{Collection, GamificationStore, SnapshotRepository};
use crate::gamification::achievements::generate_catalog;
use crate::model::achievement::Achievement;
use crate::model::profile::Profile;
use crate::model::task::Task;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Gateway combining a per-process cache with a durable repository.
pub struct DualStore<R: SnapshotRepository> {
    durable: R,
    cache: RefCell<HashMap<Collection, String>>,
}

impl<R: SnapshotRepository> DualStore<R> {
    pub fn new(durable: R) -> Self {
        Self {
            durable,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Drops the fast-path cache so the next reads hit durable storage.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    fn load_with<T>(
        &self,
        collection: Collection,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Option<T> {
        let cached = self.cache.borrow().get(&collection).cloned();
        if let Some(raw) = cached {
            match parse(&raw) {
                Ok(value) => return Some(value),
                Err(reason) => warn!(
                    "event=store_load module=store status=skip source=cache collection={} reason={}",
                    collection.key(),
                    reason
                ),
            }
        }

        match self.durable.load_snapshot(collection) {
            Ok(Some(raw)) => match parse(&raw) {
                Ok(value) => {
                    debug!(
                        "event=store_load module=store status=ok source=durable collection={}",
                        collection.key()
                    );
                    self.cache.borrow_mut().insert(collection, raw);
                    Some(value)
                }
                Err(reason) => {
                    warn!(
                        "event=store_load module=store status=skip source=durable collection={} reason={}",
                        collection.key(),
                        reason
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error source=durable collection={} error={}",
                    collection.key(),
                    err
                );
                None
            }
        }
    }

    fn write(&self, collection: Collection, cache_payload: String, durable_payload: &str) {
        self.cache.borrow_mut().insert(collection, cache_payload);
        if let Err(err) = self.durable.save_snapshot(collection, durable_payload) {
            warn!(
                "event=store_save module=store status=error collection={} error={}",
                collection.key(),
                err
            );
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, collection: Collection, value: &T) {
        match serde_json::to_string(value) {
            Ok(payload) => self.write(collection, payload.clone(), &payload),
            Err(err) => warn!(
                "event=store_save module=store status=error collection={} error={}",
                collection.key(),
                err
            ),
        }
    }
}

impl<R: SnapshotRepository> GamificationStore for DualStore<R> {
    fn load_profile(&self) -> Profile {
        self.load_with(Collection::GamificationProfile, parse_profile)
            .unwrap_or_else(|| {
                debug!(
                    "event=store_load module=store status=default collection=gamification-profile"
                );
                Profile::default()
            })
    }

    fn save_profile(&self, profile: &Profile) {
        let collection = Collection::GamificationProfile;
        let encoded = serde_json::to_string(profile)
            .and_then(|bare| serde_json::to_string(&[profile]).map(|wrapped| (bare, wrapped)));
        match encoded {
            Ok((bare, wrapped)) => self.write(collection, bare, &wrapped),
            Err(err) => warn!(
                "event=store_save module=store status=error collection={} error={}",
                collection.key(),
                err
            ),
        }
    }

    fn load_achievements(&self) -> Vec<Achievement> {
        self.load_with(Collection::Achievements, parse_catalog)
            .unwrap_or_else(|| {
                debug!("event=store_load module=store status=default collection=achievements");
                generate_catalog()
            })
    }

    fn save_achievements(&self, achievements: &[Achievement]) {
        self.write_json(Collection::Achievements, achievements);
    }

    fn load_tasks(&self) -> Vec<Task> {
        self.load_with(Collection::Tasks, parse_json::<Vec<Task>>)
            .unwrap_or_default()
    }

    fn save_tasks(&self, tasks: &[Task]) {
        self.write_json(Collection::Tasks, tasks);
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|err| err.to_string())
}

fn parse_profile(raw: &str) -> Result<Profile, String> {
    let value: Value = parse_json(raw)?;
    let record = match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => return Err("empty profile snapshot".to_string()),
        other => other,
    };
    let profile: Profile = serde_json::from_value(record).map_err(|err| err.to_string())?;
    profile.validate().map_err(|err| err.to_string())?;
    Ok(profile)
}

fn parse_catalog(raw: &str) -> Result<Vec<Achievement>, String> {
    let catalog: Vec<Achievement> = parse_json(raw)?;
    if catalog.is_empty() {
        return Err("empty achievement catalog".to_string());
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, parse_profile, DualStore};
    use crate::db::open_db_in_memory;
    use crate::model::profile::Profile;
    use crate::store::{
        Collection, GamificationStore, SnapshotRepository, SqliteSnapshotRepository, StoreError,
        StoreResult,
    };

    struct FailingRepository;

    impl SnapshotRepository for FailingRepository {
        fn load_snapshot(&self, _collection: Collection) -> StoreResult<Option<String>> {
            Err(StoreError::Serialize(
                serde_json::from_str::<u8>("x").unwrap_err(),
            ))
        }

        fn save_snapshot(&self, _collection: Collection, _payload: &str) -> StoreResult<()> {
            Err(StoreError::Serialize(
                serde_json::from_str::<u8>("x").unwrap_err(),
            ))
        }
    }

    #[test]
    fn parse_profile_accepts_bare_and_wrapped_records() {
        let bare = parse_profile(r#"{"level":2,"xp":5,"totalTasksCompleted":7}"#).unwrap();
        let wrapped = parse_profile(r#"[{"level":2,"xp":5,"totalTasksCompleted":7}]"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.total_tasks_completed, 7);
    }

    #[test]
    fn parse_profile_rejects_zero_level_and_garbage() {
        assert!(parse_profile(r#"{"level":0,"xp":0,"totalTasksCompleted":0}"#).is_err());
        assert!(parse_profile("[]").is_err());
        assert!(parse_profile("not json").is_err());
    }

    #[test]
    fn parse_catalog_rejects_empty_list() {
        assert!(parse_catalog("[]").is_err());
    }

    #[test]
    fn failing_durable_store_still_serves_cache() {
        let store = DualStore::new(FailingRepository);
        assert_eq!(store.load_profile(), Profile::default());
        assert_eq!(store.load_achievements().len(), 100);

        let profile = Profile {
            level: 4,
            xp: 12,
            total_tasks_completed: 40,
        };
        store.save_profile(&profile);
        assert_eq!(store.load_profile(), profile);
    }

    #[test]
    fn durable_profile_snapshot_is_wrapped_in_array() {
        let conn = open_db_in_memory().unwrap();
        let store = DualStore::new(SqliteSnapshotRepository::new(&conn));
        store.save_profile(&Profile::default());

        let raw = SqliteSnapshotRepository::new(&conn)
            .load_snapshot(Collection::GamificationProfile)
            .unwrap()
            .unwrap();
        assert_eq!(raw, r#"[{"level":1,"xp":0,"totalTasksCompleted":0}]"#);
    }
}
