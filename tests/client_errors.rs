use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use event_calendar::client::{ApiClient, ApiError};

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/events/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Evento no encontrado" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    match client.delete_event(7).await.unwrap_err() {
        ApiError::Status { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Evento no encontrado");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_errors_are_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/", server.uri())).unwrap();
    let err = client.list_events().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(502));
    assert!(err.to_string().contains("bad gateway"));
}

#[tokio::test]
async fn lists_decode_their_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{
                "id": 1,
                "nombre": "Talk",
                "fecha": "2024-05-01",
                "hora_inicio": null,
                "hora_fin": null,
                "lugar": "Hall",
                "tipo_actividad": "Charla",
                "empresa": "ACME",
                "disertantes": "Jane",
                "descripcion": "desc"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "categories": [{ "id": 1, "nombre": "Charlas" }] })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let events = client.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert!(events[0].hora_inicio.is_none());

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories[0].nombre, "Charlas");
}
