//! Cocktail cache storage.

use chrono::DateTime;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions, SqliteRow};
use tokio::sync::{Mutex, watch};
use tracing::debug;

use super::model::CocktailRecord;
use crate::Result;
use crate::live::watch_stream;

const SELECT_ALL: &str = r"
    SELECT id, name, category, alcoholic, glass, instructions, thumbnail, inserted_at
    FROM cocktails
    ORDER BY inserted_at DESC, rowid DESC
";

/// The cache contents at one commit: the listing and its count always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    /// Cached cocktails, most recently inserted first.
    pub cocktails: Vec<CocktailRecord>,
    /// Number of cached cocktails.
    pub count: u64,
}

/// `SQLite` storage for cached cocktails with live listing and count.
///
/// Every mutation re-reads the table inside its own transaction and
/// publishes the result as one [`CacheSnapshot`], so the listing and the
/// count seen by subscribers always come from the same commit.
pub struct CocktailStore {
    pool: SqlitePool,
    /// Serializes mutate-then-publish so subscribers never see a stale value last.
    write_lock: Mutex<()>,
    snapshot: watch::Sender<CacheSnapshot>,
}

impl CocktailStore {
    /// Create a new store with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        // A single connection that is never recycled, otherwise the data goes with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let (snapshot, _) = watch::channel(CacheSnapshot::default());

        let store = Self {
            pool,
            write_lock: Mutex::new(()),
            snapshot,
        };
        store.initialize().await?;

        let mut conn = store.pool.acquire().await?;
        let current = read_snapshot(&mut *conn).await?;
        store.snapshot.send_replace(current);
        drop(conn);

        Ok(store)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cocktails (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                alcoholic TEXT NOT NULL DEFAULT '',
                glass TEXT NOT NULL DEFAULT '',
                instructions TEXT NOT NULL DEFAULT '',
                thumbnail TEXT NOT NULL DEFAULT '',
                inserted_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_cocktails_inserted_at
            ON cocktails(inserted_at DESC)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a cocktail, or fully replace the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Nothing is stored then.
    pub async fn upsert(&self, record: &CocktailRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO cocktails
                (id, name, category, alcoholic, glass, instructions, thumbnail, inserted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                alcoholic = excluded.alcoholic,
                glass = excluded.glass,
                instructions = excluded.instructions,
                thumbnail = excluded.thumbnail,
                inserted_at = excluded.inserted_at
            ",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.category)
        .bind(&record.alcoholic)
        .bind(&record.glass)
        .bind(&record.instructions)
        .bind(&record.thumbnail)
        .bind(record.inserted_at.timestamp_millis())
        .execute(&mut *tx)
        .await?;

        let snapshot = read_snapshot(&mut *tx).await?;
        tx.commit().await?;

        debug!(id = %record.id, "Cocktail stored");
        self.snapshot.send_replace(snapshot);
        Ok(())
    }

    /// Get a cocktail by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row cannot be decoded.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<CocktailRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, name, category, alcoholic, glass, instructions, thumbnail, inserted_at
            FROM cocktails
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Get all cocktails, most recently inserted first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row cannot be decoded.
    pub async fn list(&self) -> Result<Vec<CocktailRecord>> {
        let mut conn = self.pool.acquire().await?;
        list_rows(&mut *conn).await
    }

    /// Number of cached cocktails.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64> {
        let mut conn = self.pool.acquire().await?;
        count_rows(&mut *conn).await
    }

    /// Delete a cocktail. Deleting an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Nothing is deleted then.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM cocktails WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let snapshot = read_snapshot(&mut *tx).await?;
        tx.commit().await?;

        debug!(id, removed = result.rows_affected(), "Cocktail deleted");
        self.snapshot.send_replace(snapshot);
        Ok(())
    }

    /// Delete every cached cocktail.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Nothing is deleted then.
    pub async fn delete_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM cocktails").execute(&mut *tx).await?;

        let snapshot = read_snapshot(&mut *tx).await?;
        tx.commit().await?;

        debug!(removed = result.rows_affected(), "Cocktail cache cleared");
        self.snapshot.send_replace(snapshot);
        Ok(())
    }

    /// Live cache contents.
    ///
    /// The receiver starts with the current snapshot and is notified after
    /// every committed mutation.
    #[must_use]
    pub fn observe(&self) -> watch::Receiver<CacheSnapshot> {
        self.snapshot.subscribe()
    }

    /// The last published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CacheSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Live listing, most recently inserted first.
    #[must_use]
    pub fn observe_all(&self) -> BoxStream<'static, Vec<CocktailRecord>> {
        watch_stream(self.observe())
            .map(|snapshot| snapshot.cocktails)
            .boxed()
    }

    /// Live count, re-emitted after every mutation.
    #[must_use]
    pub fn observe_count(&self) -> BoxStream<'static, u64> {
        watch_stream(self.observe())
            .map(|snapshot| snapshot.count)
            .boxed()
    }
}

async fn read_snapshot(conn: &mut SqliteConnection) -> Result<CacheSnapshot> {
    let cocktails = list_rows(conn).await?;
    let count = count_rows(conn).await?;
    Ok(CacheSnapshot { cocktails, count })
}

async fn list_rows(conn: &mut SqliteConnection) -> Result<Vec<CocktailRecord>> {
    let rows = sqlx::query(SELECT_ALL).fetch_all(&mut *conn).await?;
    rows.iter().map(record_from_row).collect()
}

async fn count_rows(conn: &mut SqliteConnection) -> Result<u64> {
    let row = sqlx::query(r"SELECT COUNT(*) as count FROM cocktails")
        .fetch_one(&mut *conn)
        .await?;

    let count: i64 = row.get("count");
    Ok(u64::try_from(count).unwrap_or_default())
}

fn record_from_row(row: &SqliteRow) -> Result<CocktailRecord> {
    let millis: i64 = row.try_get("inserted_at")?;
    let inserted_at =
        DateTime::from_timestamp_millis(millis).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "inserted_at".to_string(),
            source: format!("timestamp out of range: {millis}").into(),
        })?;

    Ok(CocktailRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        alcoholic: row.try_get("alcoholic")?,
        glass: row.try_get("glass")?,
        instructions: row.try_get("instructions")?,
        thumbnail: row.try_get("thumbnail")?,
        inserted_at,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn record(id: &str, millis: i64) -> CocktailRecord {
        CocktailRecord {
            id: id.to_string(),
            name: format!("Drink {id}"),
            category: "Cocktail".to_string(),
            alcoholic: "Alcoholic".to_string(),
            glass: "Highball glass".to_string(),
            instructions: "Stir.".to_string(),
            thumbnail: format!("https://example.com/{id}.jpg"),
            inserted_at: Utc.timestamp_millis_opt(millis).unwrap(),
        }
    }

    fn ids(records: &[CocktailRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_upsert_and_get_by_id() {
        let store = CocktailStore::in_memory().await.unwrap();
        let margarita = record("11007", 1_700_000_000_123);

        store.upsert(&margarita).await.unwrap();

        let retrieved = store.get_by_id("11007").await.unwrap();
        assert_eq!(retrieved, Some(margarita));
        assert_eq!(store.get_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_listing_is_most_recent_first() {
        let store = CocktailStore::in_memory().await.unwrap();

        // Inserted out of timestamp order on purpose.
        for (id, millis) in [("b", 2_000), ("d", 4_000), ("a", 1_000), ("c", 3_000)] {
            store.upsert(&record(id, millis)).await.unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(ids(&snapshot.cocktails), ["d", "c", "b", "a"]);
        assert_eq!(snapshot.count, 4);
        assert_eq!(ids(&store.list().await.unwrap()), ["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_upsert_existing_id_replaces() {
        let store = CocktailStore::in_memory().await.unwrap();
        store.upsert(&record("x", 1_000)).await.unwrap();
        store.upsert(&record("y", 2_000)).await.unwrap();

        let mut replacement = record("x", 3_000);
        replacement.name = "Renamed".to_string();
        replacement.glass = String::new();
        store.upsert(&replacement).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        let stored = store.get_by_id("x").await.unwrap().unwrap();
        assert_eq!(stored, replacement);
        assert_eq!(ids(&store.list().await.unwrap()), ["x", "y"]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let store = CocktailStore::in_memory().await.unwrap();
        store.upsert(&record("x", 1_000)).await.unwrap();
        let before = store.list().await.unwrap();

        store.delete_by_id("nope").await.unwrap();

        assert_eq!(store.list().await.unwrap(), before);
        assert_eq!(store.snapshot().count, 1);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = CocktailStore::in_memory().await.unwrap();
        store.upsert(&record("x", 1_000)).await.unwrap();
        store.upsert(&record("y", 2_000)).await.unwrap();

        store.delete_by_id("x").await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(ids(&snapshot.cocktails), ["y"]);
        assert_eq!(snapshot.count, 1);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = CocktailStore::in_memory().await.unwrap();
        store.upsert(&record("x", 1_000)).await.unwrap();
        store.upsert(&record("y", 2_000)).await.unwrap();

        store.delete_all().await.unwrap();

        assert_eq!(store.snapshot(), CacheSnapshot::default());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_observers_notified_on_mutation() {
        let store = CocktailStore::in_memory().await.unwrap();
        let mut live = store.observe();
        assert!(!live.has_changed().unwrap());

        store.upsert(&record("x", 1_000)).await.unwrap();

        assert!(live.has_changed().unwrap());
        {
            let snapshot = live.borrow_and_update();
            assert_eq!(ids(&snapshot.cocktails), ["x"]);
            assert_eq!(snapshot.count, 1);
        }

        store.delete_all().await.unwrap();
        assert!(live.has_changed().unwrap());
        assert!(live.borrow_and_update().cocktails.is_empty());
    }

    #[tokio::test]
    async fn test_observe_streams_replay_current() {
        let store = CocktailStore::in_memory().await.unwrap();
        store.upsert(&record("x", 1_000)).await.unwrap();

        let mut listing = store.observe_all();
        let mut count = store.observe_count();

        assert_eq!(ids(&listing.next().await.unwrap()), ["x"]);
        assert_eq!(count.next().await, Some(1));
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixology.db");
        let path = path.to_str().unwrap();

        {
            let store = CocktailStore::new(path).await.unwrap();
            store.upsert(&record("keep", 5_000)).await.unwrap();
        }

        let reopened = CocktailStore::new(path).await.unwrap();
        let snapshot = reopened.snapshot();
        assert_eq!(snapshot.count, 1);
        assert_eq!(ids(&snapshot.cocktails), ["keep"]);
    }

    async fn insert_raw(store: &CocktailStore, id: &str, inserted_at: i64) {
        sqlx::query("INSERT INTO cocktails (id, name, inserted_at) VALUES (?, ?, ?)")
            .bind(id)
            .bind(id)
            .bind(inserted_at)
            .execute(&store.pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_row_is_an_error() {
        let store = CocktailStore::in_memory().await.unwrap();
        insert_raw(&store, "broken", i64::MAX).await;

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, crate::Error::Database(_)));
        assert!(store.get_by_id("broken").await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_reread_rolls_back_write() {
        let store = CocktailStore::in_memory().await.unwrap();
        insert_raw(&store, "broken", i64::MAX).await;

        assert!(store.upsert(&record("x", 1_000)).await.is_err());
        assert!(store.delete_by_id("missing").await.is_err());

        assert_eq!(store.count().await.unwrap(), 1);
        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cocktails WHERE id = 'x'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(stored, 0);
        assert_eq!(store.snapshot(), CacheSnapshot::default());
    }

    fn expected_order(upserts: &[(String, i64)]) -> Vec<&str> {
        let mut indexed: Vec<(usize, &(String, i64))> = upserts.iter().enumerate().collect();
        // Newest first; equal stamps fall back to the later insert.
        indexed.sort_by(|(ia, (_, ta)), (ib, (_, tb))| tb.cmp(ta).then(ib.cmp(ia)));
        indexed.into_iter().map(|(_, (id, _))| id.as_str()).collect()
    }

    proptest! {
        #[test]
        fn prop_listing_holds_exactly_the_upserts_newest_first(
            stamps in prop::collection::btree_map("[a-z]{1,6}", 0i64..10_000, 0..25)
        ) {
            let upserts: Vec<(String, i64)> = stamps.into_iter().collect();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let snapshot = runtime.block_on(async {
                let store = CocktailStore::in_memory().await.unwrap();
                for (id, millis) in &upserts {
                    store.upsert(&record(id, *millis)).await.unwrap();
                }
                store.snapshot()
            });

            prop_assert_eq!(snapshot.count, upserts.len() as u64);
            prop_assert_eq!(ids(&snapshot.cocktails), expected_order(&upserts));
            prop_assert!(snapshot
                .cocktails
                .windows(2)
                .all(|pair| pair[0].inserted_at >= pair[1].inserted_at));
        }
    }
}
