//! Snapshot repository contract with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Serialize the full shelves+books snapshot to one key-value slot.
//! - Return the default first-run snapshot when the slot is empty.
//!
//! # Invariants
//! - Write paths validate the snapshot before touching storage.
//! - Read paths validate the decoded snapshot before returning it.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::snapshot::{LibrarySnapshot, SnapshotError};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when the caller does not pick one.
pub const DEFAULT_SLOT_KEY: &str = "loreline.library";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure for snapshot load/save.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Snapshot text could not be encoded or decoded as JSON.
    Serialization(serde_json::Error),
    /// Snapshot decoded but breaks library invariants.
    InvalidSnapshot(SnapshotError),
    /// Connection schema is not at the migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Custom adapters report a backend that refused the operation.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "snapshot encoding failed: {err}"),
            Self::InvalidSnapshot(err) => write!(f, "invalid library snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot repository requires table `{table}`")
            }
            Self::Unavailable(message) => write!(f, "snapshot storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidSnapshot(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<SnapshotError> for RepoError {
    fn from(value: SnapshotError) -> Self {
        Self::InvalidSnapshot(value)
    }
}

/// Load/save contract for the persisted library snapshot.
pub trait SnapshotRepository {
    /// Reads the stored snapshot, or `None` when nothing was ever saved.
    fn load(&self) -> RepoResult<Option<LibrarySnapshot>>;
    /// Replaces the stored snapshot with `snapshot`.
    fn save(&self, snapshot: &LibrarySnapshot) -> RepoResult<()>;

    /// Reads the stored snapshot, falling back to the default shelves and no
    /// books on first run.
    fn load_or_default(&self) -> RepoResult<LibrarySnapshot> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// Validates and encodes a snapshot as its JSON wire form.
pub fn encode_snapshot(snapshot: &LibrarySnapshot) -> RepoResult<String> {
    snapshot.validate()?;
    Ok(serde_json::to_string(snapshot)?)
}

/// Decodes a snapshot from JSON and validates it.
pub fn decode_snapshot(text: &str) -> RepoResult<LibrarySnapshot> {
    let snapshot: LibrarySnapshot = serde_json::from_str(text)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Snapshot stored as one JSON document in the `kv_slots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
    slot_key: String,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Builds a repository over a migrated connection using `DEFAULT_SLOT_KEY`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_slot_key(conn, DEFAULT_SLOT_KEY)
    }

    /// Builds a repository over a migrated connection using a caller-chosen slot.
    pub fn with_slot_key(
        conn: &'conn Connection,
        slot_key: impl Into<String>,
    ) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            slot_key: slot_key.into(),
        })
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Option<LibrarySnapshot>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [self.slot_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None => {
                debug!(
                    "event=snapshot_load module=repo status=ok slot={} found=false",
                    self.slot_key
                );
                Ok(None)
            }
            Some(text) => {
                let snapshot = decode_snapshot(&text).inspect_err(|err| {
                    error!(
                        "event=snapshot_load module=repo status=error slot={} error={err}",
                        self.slot_key
                    );
                })?;
                debug!(
                    "event=snapshot_load module=repo status=ok slot={} found=true shelves={} books={}",
                    self.slot_key,
                    snapshot.shelves.len(),
                    snapshot.books.len()
                );
                Ok(Some(snapshot))
            }
        }
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> RepoResult<()> {
        let text = encode_snapshot(snapshot)?;
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.slot_key.as_str(), text],
        )?;
        debug!(
            "event=snapshot_save module=repo status=ok slot={} bytes={}",
            self.slot_key,
            text.len()
        );
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let has_table: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_slots'
        );",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Err(RepoError::MissingRequiredTable("kv_slots"));
    }
    Ok(())
}

/// Volatile snapshot slot holding the encoded JSON text.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    slot: RefCell<Option<String>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw text, as if written by an earlier session.
    pub fn with_raw(text: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(text.into())),
        }
    }

    /// Current raw slot content.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load(&self) -> RepoResult<Option<LibrarySnapshot>> {
        self.slot
            .borrow()
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> RepoResult<()> {
        let text = encode_snapshot(snapshot)?;
        *self.slot.borrow_mut() = Some(text);
        Ok(())
    }
}
