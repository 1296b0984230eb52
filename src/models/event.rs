use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::datetime::{time_or, DEFAULT_END_TIME, DEFAULT_START_TIME};

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub nombre: String,
    pub fecha: String,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub lugar: String,
    pub tipo_actividad: String,
    pub empresa: String,
    pub disertantes: String,
    pub descripcion: String,
}

/// Request body for creating or replacing an event. Everything is optional on
/// the wire; `nombre` and `fecha` are checked on creation, the remaining text
/// fields by the table's NOT NULL constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventPayload {
    #[validate(required, length(min = 1))]
    pub nombre: Option<String>,
    #[validate(required, length(min = 1))]
    pub fecha: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
    pub lugar: Option<String>,
    pub tipo_actividad: Option<String>,
    pub empresa: Option<String>,
    pub disertantes: Option<String>,
    pub descripcion: Option<String>,
}

impl EventPayload {
    /// Start time to persist: the given one if it is a valid `HH:MM`.
    pub fn start_time(&self) -> &str {
        time_or(self.hora_inicio.as_deref(), DEFAULT_START_TIME)
    }

    pub fn end_time(&self) -> &str {
        time_or(self.hora_fin.as_deref(), DEFAULT_END_TIME)
    }
}

impl From<Event> for EventPayload {
    fn from(event: Event) -> Self {
        EventPayload {
            nombre: Some(event.nombre),
            fecha: Some(event.fecha),
            hora_inicio: event.hora_inicio,
            hora_fin: event.hora_fin,
            lugar: Some(event.lugar),
            tipo_actividad: Some(event.tipo_actividad),
            empresa: Some(event.empresa),
            disertantes: Some(event.disertantes),
            descripcion: Some(event.descripcion),
        }
    }
}
