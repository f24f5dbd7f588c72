//! Ordered, reversible schema migrations
//!
//! The schema history is an explicit chain of steps, each naming its
//! predecessor. Applied state is tracked in a `schema_migrations` table
//! (id, parent, applied_at). Each step runs inside a single transaction
//! together with its tracking-row insert, so a failed step leaves no
//! partial change behind.
//!
//! SQLite cannot tighten a column to NOT NULL or attach a foreign key
//! with ALTER TABLE, so those steps rebuild the table: create the new
//! shape, copy rows, drop the old table, rename.

use sqlx::{Row, SqlitePool};
use thiserror::Error;

/// A single reversible schema change.
pub struct Migration {
    /// Stable identifier, also the tracking-table key.
    pub id: &'static str,
    /// Predecessor step; `None` for the first step in the chain.
    pub parent: Option<&'static str>,
    /// Forward statements, executed in order.
    up: &'static [&'static str],
    /// Reverse statements, executed in order.
    down: &'static [&'static str],
}

/// The full migration chain, oldest first.
///
/// History: todos existed before lists. Step 0002 backfills `completed`
/// before tightening it, and step 0003 seeds the `Uncategorized` list
/// and backfills `list_id` on pre-existing todos before the foreign key
/// is enforced.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "0001_create_todos",
        parent: None,
        up: &["CREATE TABLE todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL
            )"],
        down: &["DROP TABLE todos"],
    },
    Migration {
        id: "0002_add_completed",
        parent: Some("0001_create_todos"),
        up: &[
            "ALTER TABLE todos ADD COLUMN completed BOOLEAN",
            "UPDATE todos SET completed = 0 WHERE completed IS NULL",
            "CREATE TABLE todos_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0
            )",
            "INSERT INTO todos_new (id, description, completed)
                SELECT id, description, completed FROM todos",
            "DROP TABLE todos",
            "ALTER TABLE todos_new RENAME TO todos",
        ],
        down: &[
            "CREATE TABLE todos_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL
            )",
            "INSERT INTO todos_new (id, description)
                SELECT id, description FROM todos",
            "DROP TABLE todos",
            "ALTER TABLE todos_new RENAME TO todos",
        ],
    },
    Migration {
        id: "0003_create_todo_lists",
        parent: Some("0002_add_completed"),
        up: &[
            "CREATE TABLE todo_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )",
            "INSERT INTO todo_lists (name) VALUES ('Uncategorized')",
            "ALTER TABLE todos ADD COLUMN list_id INTEGER",
            "UPDATE todos SET list_id = 1 WHERE list_id IS NULL",
            "CREATE TABLE todos_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                list_id INTEGER NOT NULL REFERENCES todo_lists(id) ON DELETE CASCADE
            )",
            "INSERT INTO todos_new (id, description, completed, list_id)
                SELECT id, description, completed, list_id FROM todos",
            "DROP TABLE todos",
            "ALTER TABLE todos_new RENAME TO todos",
        ],
        down: &[
            "CREATE TABLE todos_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0
            )",
            "INSERT INTO todos_new (id, description, completed)
                SELECT id, description, completed FROM todos",
            "DROP TABLE todos",
            "ALTER TABLE todos_new RENAME TO todos",
            "DROP TABLE todo_lists",
        ],
    },
];

/// Migration error type
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration chain broken at '{id}': expected parent {expected:?}, found {found:?}")]
    BrokenChain {
        id: &'static str,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("unknown migration recorded in tracking table: '{0}'")]
    UnknownRecorded(String),
}

/// Status of one step in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub id: &'static str,
    pub parent: Option<&'static str>,
    pub applied: bool,
}

async fn ensure_tracking_table(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            id TEXT PRIMARY KEY,
            parent TEXT,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Fetch applied ids in application order.
async fn applied_ids(pool: &SqlitePool) -> Result<Vec<String>, MigrateError> {
    let rows = sqlx::query("SELECT id FROM schema_migrations ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|r| r.get("id")).collect())
}

/// Verify that the recorded history is a prefix of [`MIGRATIONS`].
///
/// Returns the number of applied steps.
fn verify_prefix(applied: &[String]) -> Result<usize, MigrateError> {
    if applied.len() > MIGRATIONS.len() {
        return Err(MigrateError::UnknownRecorded(
            applied[MIGRATIONS.len()].clone(),
        ));
    }
    for (recorded, migration) in applied.iter().zip(MIGRATIONS) {
        if recorded != migration.id {
            return Err(MigrateError::UnknownRecorded(recorded.clone()));
        }
    }
    Ok(applied.len())
}

/// Apply one step and record it, atomically.
async fn apply_step(pool: &SqlitePool, migration: &Migration) -> Result<(), MigrateError> {
    let mut tx = pool.begin().await?;

    for statement in migration.up {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    sqlx::query("INSERT INTO schema_migrations (id, parent) VALUES ($1, $2)")
        .bind(migration.id)
        .bind(migration.parent)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(id = migration.id, "applied migration");
    Ok(())
}

/// Reverse one step and remove its tracking row, atomically.
async fn revert_step(pool: &SqlitePool, migration: &Migration) -> Result<(), MigrateError> {
    let mut tx = pool.begin().await?;

    for statement in migration.down {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    sqlx::query("DELETE FROM schema_migrations WHERE id = $1")
        .bind(migration.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(id = migration.id, "reverted migration");
    Ok(())
}

/// The id of the most recently applied step, if any.
pub async fn current(pool: &SqlitePool) -> Result<Option<String>, MigrateError> {
    ensure_tracking_table(pool).await?;
    let applied = applied_ids(pool).await?;
    verify_prefix(&applied)?;
    Ok(applied.last().cloned())
}

/// Apply every pending step in chain order.
///
/// Already-applied steps are skipped; each step checks that its parent
/// matches the last applied id before running. Returns the number of
/// steps applied.
pub async fn upgrade(pool: &SqlitePool) -> Result<usize, MigrateError> {
    ensure_tracking_table(pool).await?;
    let applied = applied_ids(pool).await?;
    let done = verify_prefix(&applied)?;

    let mut last = applied.last().cloned();
    let mut count = 0;

    for migration in &MIGRATIONS[done..] {
        if migration.parent.map(String::from) != last {
            return Err(MigrateError::BrokenChain {
                id: migration.id,
                expected: migration.parent.map(String::from),
                found: last,
            });
        }
        apply_step(pool, migration).await?;
        last = Some(migration.id.to_owned());
        count += 1;
    }

    Ok(count)
}

/// Reverse the most recently applied step.
///
/// Returns the reverted id, or `None` when nothing is applied.
pub async fn downgrade(pool: &SqlitePool) -> Result<Option<&'static str>, MigrateError> {
    ensure_tracking_table(pool).await?;
    let applied = applied_ids(pool).await?;
    let done = verify_prefix(&applied)?;

    if done == 0 {
        return Ok(None);
    }

    let migration = &MIGRATIONS[done - 1];
    revert_step(pool, migration).await?;
    Ok(Some(migration.id))
}

/// Reverse every applied step, newest first.
///
/// Returns the number of steps reverted. After this the schema holds
/// no application tables and the tracking table is empty.
pub async fn downgrade_all(pool: &SqlitePool) -> Result<usize, MigrateError> {
    let mut count = 0;
    while downgrade(pool).await?.is_some() {
        count += 1;
    }
    Ok(count)
}

/// The full chain with applied markers, oldest first.
pub async fn status(pool: &SqlitePool) -> Result<Vec<MigrationStatus>, MigrateError> {
    ensure_tracking_table(pool).await?;
    let applied = applied_ids(pool).await?;
    let done = verify_prefix(&applied)?;

    Ok(MIGRATIONS
        .iter()
        .enumerate()
        .map(|(i, m)| MigrationStatus {
            id: m.id,
            parent: m.parent,
            applied: i < done,
        })
        .collect())
}
