use crate::database::Database;
use tracing::info;

pub mod categories;
pub mod events;

/// Event persistence. Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct EventStore {
    db: Database,
}

impl EventStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connects and migrates. The store is only handed out once the schema
    /// is known to be current.
    pub async fn open(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let db = if database_url == "sqlite::memory:" {
            Database::in_memory().await?
        } else {
            Database::new(database_url, pool_size).await?
        };
        info!("Database connected");

        db.run_migrations().await?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
