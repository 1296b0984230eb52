use crate::models::Category;
use crate::store::EventStore;

impl EventStore {
    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, nombre FROM categories")
            .fetch_all(&self.db.pool)
            .await
    }
}
