use tracing::{debug, info};
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventPayload};
use crate::store::EventStore;

const EVENT_COLUMNS: &str = "id, nombre, fecha, hora_inicio, hora_fin, lugar, \
                             tipo_actividad, empresa, disertantes, descripcion";

impl EventStore {
    /// All events in storage order.
    pub async fn list(&self) -> EventResult<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events");
        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&self.db.pool)
            .await?;
        debug!("Loaded {} events", events.len());
        Ok(events)
    }

    pub async fn create(&self, payload: &EventPayload) -> EventResult<Event> {
        payload.validate()?;

        let sql = format!(
            "INSERT INTO events (nombre, fecha, hora_inicio, hora_fin, lugar, \
             tipo_actividad, empresa, disertantes, descripcion) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(payload.nombre.as_deref())
            .bind(payload.fecha.as_deref())
            .bind(payload.start_time())
            .bind(payload.end_time())
            .bind(payload.lugar.as_deref())
            .bind(payload.tipo_actividad.as_deref())
            .bind(payload.empresa.as_deref())
            .bind(payload.disertantes.as_deref())
            .bind(payload.descripcion.as_deref())
            .fetch_one(&self.db.pool)
            .await?;

        info!("Event {} created: {}", event.id, event.nombre);
        Ok(event)
    }

    /// Replaces every mutable field of event `id`.
    pub async fn update(&self, id: i64, payload: &EventPayload) -> EventResult<Event> {
        let sql = format!(
            "UPDATE events SET nombre = ?, fecha = ?, hora_inicio = ?, hora_fin = ?, \
             lugar = ?, tipo_actividad = ?, empresa = ?, disertantes = ?, descripcion = ? \
             WHERE id = ? \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(payload.nombre.as_deref())
            .bind(payload.fecha.as_deref())
            .bind(payload.start_time())
            .bind(payload.end_time())
            .bind(payload.lugar.as_deref())
            .bind(payload.tipo_actividad.as_deref())
            .bind(payload.empresa.as_deref())
            .bind(payload.disertantes.as_deref())
            .bind(payload.descripcion.as_deref())
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await?
            .ok_or(EventError::NotFound)?;

        info!("Event {} updated", event.id);
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> EventResult<()> {
        let affected = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.db.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(EventError::NotFound);
        }
        info!("Event {} deleted", id);
        Ok(())
    }
}
