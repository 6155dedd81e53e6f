use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::startup::{build_app, Deployment};

async fn build_test_app() -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    migration::maternity::Migrator::up(&db, None).await?;
    Ok(build_app(Deployment::Maternity, db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

/// Registers one pregnant person and one obstetrician, returning their ids.
async fn seed(app: &Router) -> anyhow::Result<(String, String)> {
    let (status, person) = send(
        app,
        "POST",
        "/gestantes",
        Some(json!({"nome": "Maria", "cpf": "123.456.789-01", "data_nascimento": "1995-05-10"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, pro) = send(
        app,
        "POST",
        "/profissionais",
        Some(json!({"nome": "Dra. Paula", "especialidade": "Obstetra", "email": "paula@hospital.org"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok((
        person["id_gestante"].as_str().unwrap_or_default().to_string(),
        pro["id_profissional"].as_str().unwrap_or_default().to_string(),
    ))
}

#[tokio::test]
async fn index_and_health_identify_service() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "maternidade-api");

    let (status, body) = send(&app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["partos"], "/partos");
    Ok(())
}

#[tokio::test]
async fn second_birth_for_same_person_is_rejected() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (person, pro) = seed(&app).await?;
    let birth = json!({
        "id_gestante": person,
        "id_profissional": pro,
        "data_parto": "2024-06-01",
        "tipo_parto": "Normal",
        "semana_gestacional": 39,
        "peso_bebe_g": 3200
    });

    let (status, _) = send(&app, "POST", "/partos", Some(birth.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/partos", Some(birth)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conflict");

    let (status, body) = send(&app, "GET", &format!("/gestantes/{person}/parto"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tipo_parto"], "Normal");
    Ok(())
}

#[tokio::test]
async fn professional_with_visits_cannot_be_deleted() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (person, pro) = seed(&app).await?;
    let (status, visit) = send(
        &app,
        "POST",
        "/consultas",
        Some(json!({"id_gestante": person, "id_profissional": pro, "data_consulta": "2024-02-01", "semana_gestacional": 12})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/profissionais/{pro}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conflict");

    let visit_id = visit["id_consulta"].as_str().unwrap_or_default();
    let (status, body) = send(&app, "DELETE", &format!("/consultas/{visit_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "prenatal visit removed");

    let (status, _) = send(&app, "DELETE", &format!("/profissionais/{pro}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn history_collects_visits_exams_and_birth() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (person, pro) = seed(&app).await?;
    send(
        &app,
        "POST",
        "/consultas",
        Some(json!({"id_gestante": person, "id_profissional": pro, "data_consulta": "2024-01-10"})),
    )
    .await?;
    let (status, _) = send(
        &app,
        "POST",
        "/exames",
        Some(json!({"id_gestante": person, "tipo_exame": "Ultrassom", "data_exame": "2024-01-12"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", &format!("/gestantes/{person}/historico"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_consultas"], 1);
    assert_eq!(body["total_exames"], 1);
    assert!(body["parto"].is_null());

    let (status, body) = send(&app, "GET", "/estatisticas/gerais", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_gestantes"], 1);
    assert_eq!(body["total_partos"], 0);
    Ok(())
}

#[tokio::test]
async fn invalid_cpf_and_missing_reference_are_rejected() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/gestantes",
        Some(json!({"nome": "Joana", "cpf": "123", "data_nascimento": "1990-01-01"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = send(
        &app,
        "POST",
        "/exames",
        Some(json!({"tipo_exame": "Sangue", "data_exame": "2024-01-12"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn person_held_by_exam_or_birth_cannot_be_deleted() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (person, pro) = seed(&app).await?;
    let (status, exam) = send(
        &app,
        "POST",
        "/exames",
        Some(json!({"id_gestante": person, "tipo_exame": "Hemograma", "data_exame": "2024-03-03"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/gestantes/{person}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conflict");
    let (status, _) = send(&app, "GET", &format!("/gestantes/{person}"), None).await?;
    assert_eq!(status, StatusCode::OK);

    let exam_id = exam["id_exame"].as_str().unwrap_or_default();
    let (status, _) = send(&app, "DELETE", &format!("/exames/{exam_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "POST",
        "/partos",
        Some(json!({"id_gestante": person, "id_profissional": pro, "data_parto": "2024-07-01", "tipo_parto": "Cesárea"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/gestantes/{person}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Conflict");
    Ok(())
}

#[tokio::test]
async fn alternate_keys_resolve_before_id_routes() -> anyhow::Result<()> {
    let app = build_test_app().await?;
    let (person, pro) = seed(&app).await?;

    let (status, body) = send(&app, "GET", "/gestantes/cpf/123.456.789-01", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id_gestante"], person.as_str());

    let (status, body) = send(&app, "GET", "/profissionais/email/paula@hospital.org", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id_profissional"], pro.as_str());

    let (status, _) = send(&app, "GET", "/gestantes/cpf/000.000.000-00", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
