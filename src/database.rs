use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::datetime::{DEFAULT_END_TIME, DEFAULT_START_TIME};

const CREATE_EVENTS: &str = "
    CREATE TABLE IF NOT EXISTS events (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      nombre TEXT NOT NULL,
      fecha TEXT NOT NULL,
      hora_inicio TEXT DEFAULT '00:00',
      hora_fin TEXT DEFAULT '23:59',
      lugar TEXT NOT NULL,
      tipo_actividad TEXT NOT NULL,
      empresa TEXT NOT NULL,
      disertantes TEXT NOT NULL,
      descripcion TEXT NOT NULL
    )";

const CREATE_CATEGORIES: &str = "
    CREATE TABLE IF NOT EXISTS categories (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      nombre TEXT NOT NULL
    )";

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Sqlite>,
}

impl Database {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        Ok(Database { pool })
    }

    /// Single-connection in-memory database. The connection is never recycled,
    /// otherwise the data would vanish with it.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Database { pool })
    }

    /// Creates missing tables and adds the time-of-day columns to an `events`
    /// table that predates them. Safe to run on every startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        info!("Running database migrations...");

        sqlx::query(CREATE_EVENTS).execute(&self.pool).await?;
        sqlx::query(CREATE_CATEGORIES).execute(&self.pool).await?;

        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('events')")
                .fetch_all(&self.pool)
                .await?;

        for (column, default) in [
            ("hora_inicio", DEFAULT_START_TIME),
            ("hora_fin", DEFAULT_END_TIME),
        ] {
            if columns.iter().any(|c| c == column) {
                continue;
            }
            info!("Adding missing column events.{}", column);
            let ddl = format!("ALTER TABLE events ADD COLUMN {column} TEXT DEFAULT '{default}'");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }

        info!("Migrations completed");
        Ok(())
    }
}
