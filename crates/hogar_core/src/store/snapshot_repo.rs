//! SQLite-backed durable snapshots.
//!
//! # Invariants
//! - At most one row per collection; saves replace the row in place.
//! - Payloads are stored verbatim; parsing belongs to the gateway.

use super::{Collection, SnapshotRepository, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Snapshot repository over a migrated connection.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self, collection: Collection) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collection_snapshots WHERE collection = ?1;",
                [collection.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save_snapshot(&self, collection: Collection, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO collection_snapshots (collection, payload)
             VALUES (?1, ?2)
             ON CONFLICT(collection) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![collection.key(), payload],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSnapshotRepository;
    use crate::db::open_db_in_memory;
    use crate::store::{Collection, SnapshotRepository};

    #[test]
    fn missing_collection_loads_none() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);
        assert!(repo.load_snapshot(Collection::Tasks).unwrap().is_none());
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);

        repo.save_snapshot(Collection::Achievements, "[1]").unwrap();
        repo.save_snapshot(Collection::Achievements, "[2]").unwrap();

        assert_eq!(
            repo.load_snapshot(Collection::Achievements)
                .unwrap()
                .as_deref(),
            Some("[2]")
        );
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM collection_snapshots;", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(rows, 1);
    }
}
