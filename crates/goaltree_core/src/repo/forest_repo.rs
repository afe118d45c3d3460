//! Forest persistence contracts and the SQLite slot implementation.
//!
//! # Responsibility
//! - Persist the whole forest as one JSON payload in a single named slot.
//! - Shield the orchestrator from storage failures: reads default to an
//!   empty forest, writes are logged and swallowed.
//!
//! # Invariants
//! - `save` always overwrites the complete forest; never a partial write.
//! - `load` never fails to the caller; an unreadable slot yields an empty
//!   forest.

use crate::db::DbError;
use crate::model::goal::Forest;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the single slot holding the serialized forest.
pub const FOREST_SLOT: &str = "goal_forest";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from forest slot persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite failure.
    Db(DbError),
    /// Stored payload cannot be serialized or deserialized.
    Payload(serde_json::Error),
    /// Connection is missing the slot table; migrations did not run.
    MissingSlotTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "invalid forest payload: {err}"),
            Self::MissingSlotTable(table) => {
                write!(f, "forest store requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::MissingSlotTable(_) => None,
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
        Self::Payload(value)
    }
}

/// Durable storage for the whole goal forest.
///
/// Implementations swallow their own failures; the orchestrator treats
/// persistence as best-effort and never surfaces storage errors upward.
pub trait ForestStore {
    /// Loads the persisted forest, or an empty one when the slot is
    /// missing or unreadable.
    fn load(&self) -> Forest;

    /// Overwrites the slot with the complete forest.
    fn save(&self, forest: &Forest);
}

/// SQLite-backed store writing one row in `forest_slots`.
pub struct SqliteForestStore<'conn> {
    conn: &'conn Connection,
    slot: &'static str,
}

impl<'conn> SqliteForestStore<'conn> {
    /// Creates a store over a migrated connection.
    ///
    /// # Errors
    /// - Returns `MissingSlotTable` when the connection was not opened
    ///   through `db::open_db` / `db::open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !table_exists(conn, "forest_slots")? {
            return Err(StoreError::MissingSlotTable("forest_slots"));
        }
        Ok(Self {
            conn,
            slot: FOREST_SLOT,
        })
    }

    /// Reads and deserializes the slot payload.
    ///
    /// `Ok(None)` means no forest has ever been saved.
    pub fn try_load(&self) -> StoreResult<Option<Forest>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM forest_slots WHERE slot = ?1;",
                [self.slot],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serializes the forest and overwrites the slot row.
    pub fn try_save(&self, forest: &Forest) -> StoreResult<()> {
        let payload = serde_json::to_string(forest)?;
        self.conn.execute(
            "INSERT INTO forest_slots (slot, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.slot, payload],
        )?;
        Ok(())
    }
}

impl ForestStore for SqliteForestStore<'_> {
    fn load(&self) -> Forest {
        match self.try_load() {
            Ok(Some(forest)) => forest,
            Ok(None) => {
                debug!(
                    "event=forest_load module=repo status=empty slot={}",
                    self.slot
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=forest_load module=repo status=error slot={} error={err}",
                    self.slot
                );
                Vec::new()
            }
        }
    }

    fn save(&self, forest: &Forest) {
        if let Err(err) = self.try_save(forest) {
            warn!(
                "event=forest_save module=repo status=error slot={} error={err}",
                self.slot
            );
        }
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
