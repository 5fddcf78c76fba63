//! End-to-end request flows through the real router on in-memory stores.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use upskill_server::{build_router, AppState, ServerConfig};

fn app() -> Router {
    build_router(AppState::in_memory(), &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_ana(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/usuarios",
        Some(json!({"nome": "Ana", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_data_101(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/trilhas",
        Some(json!({"nome": "Dados 101", "nivel": "INICIANTE", "carga_horaria": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn enrollment_happy_path() {
    let app = app();
    let user_id = create_ana(&app).await;
    let track_id = create_data_101(&app).await;

    let (status, enrollment) = send(
        &app,
        Method::POST,
        "/api/v1/matriculas",
        Some(json!({"usuario_id": user_id, "trilha_id": track_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment["status"], "ATIVA");
    assert_eq!(enrollment["usuario_id"], user_id);
    assert_eq!(enrollment["trilha_id"], track_id);
    assert!(enrollment["id"].as_i64().unwrap() > 0);
    assert!(enrollment["data_inscricao"].is_string());

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/v1/usuarios/{user_id}/matriculas"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([enrollment]));
}

#[tokio::test]
async fn user_crud_round() {
    let app = app();
    let id = create_ana(&app).await;

    let (status, user) = send(&app, Method::GET, &format!("/api/v1/usuarios/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["nome"], "Ana");
    assert_eq!(user["email"], "ana@x.com");
    assert!(user.get("area_atuacao").is_none());

    let (status, user) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/usuarios/{id}"),
        Some(json!({"nome": "", "area_atuacao": "Dados"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["nome"], "Ana");
    assert_eq!(user["area_atuacao"], "Dados");

    let (status, all) = send(&app, Method::GET, "/api/v1/usuarios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/usuarios/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/usuarios/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Usuário não encontrado(a).");
}

#[tokio::test]
async fn track_partial_update_changes_only_workload() {
    let app = app();
    let id = create_data_101(&app).await;

    let (status, track) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/trilhas/{id}"),
        Some(json!({"carga_horaria": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(track["carga_horaria"], 100);
    assert_eq!(track["nome"], "Dados 101");
    assert_eq!(track["nivel"], "INICIANTE");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = app();
    create_ana(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/usuarios",
        Some(json!({"nome": "Outra Ana", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "O email 'ana@x.com' já está cadastrado.");

    let (_, all) = send(&app, Method::GET, "/api/v1/usuarios", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_references_are_unprocessable() {
    let app = app();
    let user_id = create_ana(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/matriculas",
        Some(json!({"usuario_id": user_id, "trilha_id": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Trilha com ID 999 não encontrada.");

    let (status, _) = send(&app, Method::GET, "/api/v1/usuarios/999/matriculas", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn bad_input_is_400() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/trilhas/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID inválido.");

    let (status, body) = send(&app, Method::GET, "/api/v1/usuarios/abc/matriculas", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID de Usuário inválido.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/trilhas",
        Some(json!({"nome": "Dados 101", "nivel": "EXPERT", "carga_horaria": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dados de entrada inválidos.");
    assert!(body["details"].as_str().unwrap().contains("EXPERT"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/matriculas",
        Some(json!({"usuario_id": 0, "trilha_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::post("/api/v1/usuarios")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_track_drops_its_enrollments() {
    let app = app();
    let user_id = create_ana(&app).await;
    let track_id = create_data_101(&app).await;
    send(
        &app,
        Method::POST,
        "/api/v1/matriculas",
        Some(json!({"usuario_id": user_id, "trilha_id": track_id})),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/trilhas/{track_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/api/v1/usuarios/{user_id}/matriculas"),
        None,
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn health_is_outside_the_api_prefix() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["api"], "/api/v1");
}

#[tokio::test]
async fn collection_routes_accept_trailing_slash() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/usuarios/",
        Some(json!({"nome": "Ana", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "ana@x.com");

    let (status, listed) = send(&app, Method::GET, "/api/v1/usuarios/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, tracks) = send(&app, Method::GET, "/api/v1/trilhas/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracks, json!([]));
}
