//! Schema DDL. Every statement is `IF NOT EXISTS`, so this runs on each start.
//! Range and non-empty checks repeat the model rules at the storage level.

use crate::error::AppError;
use sqlx::SqlitePool;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS campers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) > 0),
        age INTEGER NOT NULL CHECK (age BETWEEN 8 AND 18)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (length(name) > 0),
        difficulty INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS signups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time INTEGER NOT NULL CHECK (time BETWEEN 0 AND 23),
        camper_id INTEGER NOT NULL REFERENCES campers (id) ON DELETE CASCADE,
        activity_id INTEGER NOT NULL REFERENCES activities (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS signups_camper_id ON signups (camper_id)",
    "CREATE INDEX IF NOT EXISTS signups_activity_id ON signups (activity_id)",
];

/// Create the campers, activities, and signups tables with their constraints.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for sql in DDL {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema up to date");
    Ok(())
}
