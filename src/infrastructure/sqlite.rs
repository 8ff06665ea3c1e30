//! SQLite-backed party store

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Params, Row};
use tracing::debug;

use crate::domain::{MaterializedPath, Party};
use crate::infrastructure::traits::{PartyStore, StoreError, StoreResult};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS parties (
        id       TEXT PRIMARY KEY NOT NULL,
        name     TEXT NOT NULL,
        owner_id TEXT,
        path     TEXT NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_parties_owner ON parties(owner_id);
    CREATE INDEX IF NOT EXISTS idx_parties_path ON parties(path);
";

const COLUMNS: &str = "id, name, owner_id, path";

/// Durable store on a single `parties` table.
///
/// `owner_id` carries no foreign key: dangling owners and dangling path
/// segments are tolerated after a delete.
pub struct SqlitePartyStore {
    conn: Mutex<Connection>,
}

impl SqlitePartyStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        debug!("open: database={}", path.display());
        Self::init_with_connection(Connection::open(path)?)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init_with_connection(Connection::open_in_memory()?)
    }

    fn init_with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn query_parties<P: Params>(conn: &Connection, sql: &str, params: P) -> StoreResult<Vec<Party>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, PartyRow::from_row)?;
        rows.map(|row| row.map_err(StoreError::from).and_then(PartyRow::into_party))
            .collect()
    }
}

/// Raw column values before path validation.
struct PartyRow {
    id: String,
    name: String,
    owner_id: Option<String>,
    path: String,
}

impl PartyRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
            path: row.get(3)?,
        })
    }

    fn into_party(self) -> StoreResult<Party> {
        let path = MaterializedPath::parse(&self.path).map_err(|e| StoreError::Corrupt {
            id: self.id.clone(),
            reason: e.to_string(),
        })?;
        Ok(Party {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            path,
        })
    }
}

impl PartyStore for SqlitePartyStore {
    fn insert(&self, party: &Party) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO parties (id, name, owner_id, path) VALUES (?1, ?2, ?3, ?4)",
            params![party.id, party.name, party.owner_id, party.path.as_str()],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::Conflict(party.id.clone()),
            _ => StoreError::from(e),
        })?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Party>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM parties WHERE id = ?1"),
                params![id],
                PartyRow::from_row,
            )
            .optional()?;
        row.map(PartyRow::into_party).transpose()
    }

    fn find_by_ids(&self, ids: &[&str]) -> StoreResult<Vec<Party>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let conn = self.lock()?;
        Self::query_parties(
            &conn,
            &format!("SELECT {COLUMNS} FROM parties WHERE id IN ({placeholders})"),
            params_from_iter(ids.iter()),
        )
    }

    fn find_all(&self) -> StoreResult<Vec<Party>> {
        let conn = self.lock()?;
        Self::query_parties(
            &conn,
            &format!("SELECT {COLUMNS} FROM parties ORDER BY rowid"),
            [],
        )
    }

    fn find_by_path_segment(&self, id: &str) -> StoreResult<Vec<Party>> {
        // Appending '/' to both sides anchors the id at a segment boundary.
        let conn = self.lock()?;
        Self::query_parties(
            &conn,
            &format!(
                "SELECT {COLUMNS} FROM parties \
                 WHERE instr(path || '/', '/' || ?1 || '/') > 0 ORDER BY rowid"
            ),
            params![id],
        )
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM parties WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM parties", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
