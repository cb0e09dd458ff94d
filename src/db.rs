//! Database initialization
//!
//! Creates the connection pool and the schema on startup. Schema creation is
//! idempotent (`CREATE TABLE IF NOT EXISTS`) so repeated startups against an
//! existing database file are safe.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Connect to the database and create tables if needed.
///
/// `database_url` is a sqlite URL, e.g. `sqlite://confhub.db?mode=rwc` or
/// `sqlite::memory:` for tests.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // In-memory databases live and die with their connection, so the pool
    // must never drop its last one.
    let pool = SqlitePoolOptions::new()
        .max_connections(if database_url.contains(":memory:") { 1 } else { 10 })
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    info!("Database ready: {}", database_url);
    Ok(pool)
}

/// Create all tables and indexes (idempotent, safe to call multiple times).
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_profiles_table(pool).await?;
    create_conferences_table(pool).await?;
    create_sessions_table(pool).await?;
    create_registrations_table(pool).await?;
    create_wishlist_table(pool).await?;
    Ok(())
}

async fn create_profiles_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            main_email TEXT NOT NULL,
            tee_shirt_size TEXT NOT NULL DEFAULT 'NOT_SPECIFIED',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_conferences_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // topics is a JSON array of strings; month is derived from start_date
    // (0 when no start date) so it can be filtered on directly.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS conferences (
            id TEXT PRIMARY KEY,
            organizer_user_id TEXT NOT NULL REFERENCES profiles(user_id),
            name TEXT NOT NULL,
            description TEXT,
            city TEXT NOT NULL,
            topics TEXT NOT NULL DEFAULT '[]',
            start_date TEXT,
            end_date TEXT,
            month INTEGER NOT NULL DEFAULT 0,
            max_attendees INTEGER NOT NULL DEFAULT 0,
            seats_available INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (seats_available >= 0),
            CHECK (max_attendees >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_conferences_organizer ON conferences(organizer_user_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_conferences_city ON conferences(city)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            conference_id TEXT NOT NULL REFERENCES conferences(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            speaker TEXT NOT NULL,
            type_of_session TEXT NOT NULL DEFAULT 'NOT_SPECIFIED'
                CHECK (type_of_session IN ('LECTURE', 'KEYNOTE', 'WORKSHOP', 'FORUM', 'NOT_SPECIFIED')),
            session_date TEXT,
            start_time TEXT,
            highlights TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_conference ON sessions(conference_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_speaker ON sessions(speaker)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_registrations_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // The composite primary key is what makes duplicate registration
    // structurally impossible; handlers still check first to report 409.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS registrations (
            user_id TEXT NOT NULL REFERENCES profiles(user_id) ON DELETE CASCADE,
            conference_id TEXT NOT NULL REFERENCES conferences(id) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (user_id, conference_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_registrations_conference ON registrations(conference_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_wishlist_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wishlist_entries (
            user_id TEXT NOT NULL REFERENCES profiles(user_id) ON DELETE CASCADE,
            session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (user_id, session_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_wishlist_session ON wishlist_entries(session_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
