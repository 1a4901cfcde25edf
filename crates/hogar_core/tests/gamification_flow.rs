use hogar_core::db::{open_db, open_db_in_memory};
use hogar_core::{
    Achievement, Collection, DualStore, GamificationService, GamificationStore, Priority, Profile,
    SnapshotRepository, SqliteSnapshotRepository,
};

fn unlocked_ids(achievements: &[Achievement]) -> Vec<String> {
    achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.id.clone())
        .collect()
}

#[test]
fn bootstrap_generates_and_persists_catalog_when_missing() {
    let conn = open_db_in_memory().unwrap();
    let service = GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));

    let snapshot = service.bootstrap();
    assert_eq!(snapshot.profile, Profile::default());
    assert_eq!(snapshot.achievements.len(), 100);
    assert_eq!(unlocked_ids(&snapshot.achievements), vec!["lvl-1"]);

    let raw = SqliteSnapshotRepository::new(&conn)
        .load_snapshot(Collection::Achievements)
        .unwrap()
        .expect("catalog should be persisted by bootstrap");
    assert!(raw.contains("\"levelReq\":1"));
    assert!(raw.contains("\"tasksReq\":500"));
}

#[test]
fn toggle_levels_up_and_reports_new_achievements() {
    let conn = open_db_in_memory().unwrap();
    let service = GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
    service.store().save_profile(&Profile {
        level: 1,
        xp: 110,
        total_tasks_completed: 9,
    });
    service.bootstrap();

    let outcome = service.record_toggle(false, true, Priority::Medium);
    assert_eq!(
        outcome.profile,
        Profile {
            level: 2,
            xp: 10,
            total_tasks_completed: 10,
        }
    );
    let fresh: Vec<_> = outcome
        .newly_unlocked
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(fresh, vec!["lvl-2", "tasks-10"]);
    assert_eq!(
        unlocked_ids(&outcome.achievements),
        vec!["lvl-1", "lvl-2", "tasks-10"]
    );
}

#[test]
fn reverting_completion_relocks_task_milestone_but_keeps_level() {
    let conn = open_db_in_memory().unwrap();
    let service = GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
    service.store().save_profile(&Profile {
        level: 1,
        xp: 110,
        total_tasks_completed: 9,
    });

    service.record_toggle(false, true, Priority::Medium);
    let reverted = service.record_toggle(true, false, Priority::Medium);

    assert_eq!(
        reverted.profile,
        Profile {
            level: 2,
            xp: 0,
            total_tasks_completed: 9,
        }
    );
    assert!(reverted.newly_unlocked.is_empty());
    assert_eq!(unlocked_ids(&reverted.achievements), vec!["lvl-1", "lvl-2"]);
}

#[test]
fn reset_restores_defaults_and_fresh_catalog() {
    let conn = open_db_in_memory().unwrap();
    let service = GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
    for _ in 0..12 {
        service.record_toggle(false, true, Priority::High);
    }
    assert!(service.snapshot().profile.level > 1);

    let snapshot = service.reset();
    assert_eq!(snapshot.profile, Profile::default());
    assert_eq!(snapshot.achievements.len(), 100);
    assert_eq!(unlocked_ids(&snapshot.achievements), vec!["lvl-1"]);
    assert_eq!(service.snapshot(), snapshot);
}

#[test]
fn state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mi_hogar.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let service =
            GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
        service.bootstrap();
        service.record_toggle(false, true, Priority::High);
        service.record_toggle(false, true, Priority::Low);
    }

    let conn = open_db(&path).unwrap();
    let service = GamificationService::new(DualStore::new(SqliteSnapshotRepository::new(&conn)));
    let snapshot = service.snapshot();
    assert_eq!(
        snapshot.profile,
        Profile {
            level: 1,
            xp: 40,
            total_tasks_completed: 2,
        }
    );
    assert_eq!(snapshot.achievements.len(), 100);
}

#[test]
fn malformed_durable_snapshots_fall_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    repo.save_snapshot(Collection::GamificationProfile, "{broken")
        .unwrap();
    repo.save_snapshot(Collection::Achievements, "[]").unwrap();
    repo.save_snapshot(Collection::Tasks, "42").unwrap();

    let store = DualStore::new(SqliteSnapshotRepository::new(&conn));
    assert_eq!(store.load_profile(), Profile::default());
    assert_eq!(store.load_achievements().len(), 100);
    assert!(store.load_tasks().is_empty());
}

#[test]
fn cache_is_refilled_from_durable_store() {
    let conn = open_db_in_memory().unwrap();
    let store = DualStore::new(SqliteSnapshotRepository::new(&conn));
    let profile = Profile {
        level: 7,
        xp: 3,
        total_tasks_completed: 70,
    };
    store.save_profile(&profile);

    store.clear_cache();
    assert_eq!(store.load_profile(), profile);
}
