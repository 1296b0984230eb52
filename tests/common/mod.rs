#![allow(dead_code)]

use std::sync::Arc;

use event_calendar::config::Config;
use event_calendar::models::EventPayload;
use event_calendar::store::EventStore;
use event_calendar::{app, AppState};

pub async fn memory_store() -> EventStore {
    EventStore::open("sqlite::memory:", 1).await.unwrap()
}

pub async fn memory_state() -> Arc<AppState> {
    AppState::new(Config::for_tests()).await.unwrap()
}

/// Serves the application on an ephemeral local port, returns its base URL.
pub async fn spawn_server() -> String {
    let state = memory_state().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn talk() -> EventPayload {
    EventPayload {
        nombre: Some("Talk".into()),
        fecha: Some("2024-05-01".into()),
        hora_inicio: None,
        hora_fin: None,
        lugar: Some("Hall".into()),
        tipo_actividad: Some("Charla".into()),
        empresa: Some("ACME".into()),
        disertantes: Some("Jane".into()),
        descripcion: Some("desc".into()),
    }
}
