mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_bytes, body_json, build_test_app, create_test_researcher, get, get_auth, login_for_token,
    post_json,
};

/// Create and submit a full survey for the given department, returning its id.
async fn submit_survey(app: axum::Router, department: &str) -> i64 {
    let created = post_json(
        app.clone(),
        "/api/v1/surveys",
        json!({
            "gender": "female",
            "birth_year": 1992,
            "education": "bachelor",
            "marital_status": "single",
            "position": "staff_nurse",
            "career_years": 5,
            "institution_type": "tertiary_hospital",
            "department": department,
            "work_types": {
                "D": { "name": "Day", "start_time": "07:00", "end_time": "15:00" }
            },
            "off_duty_types": { "OFF": { "name": "Off" } },
            "schedule": { "2025-04-01": "D", "2025-04-02": "OFF" }
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["data"]["id"].as_i64().unwrap();

    let submitted = post_json(app, &format!("/api/v1/surveys/{id}/submit"), json!({})).await;
    assert_eq!(submitted.status(), StatusCode::OK);
    id
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn csv_export_contains_submitted_responses(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    let id = submit_survey(app.clone(), "icu").await;
    // A lingering draft must not appear in the export.
    post_json(app.clone(), "/api/v1/surveys", json!({ "department": "er" })).await;

    let response = get_auth(app, "/api/v1/admin/surveys/export.csv", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"surveys.csv\""
    );

    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,submitted_at,gender,birth_year,education,marital_status,position,career_years,\
         institution_type,department,work_types,off_duty_types,schedule"
    );

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 1);
    let row = rows[0];
    assert!(row.starts_with(&format!("{id},")));
    assert!(row.contains("icu"));
    assert!(row.contains("D=Day(07:00-15:00)"));
    assert!(row.contains("OFF=Off"));
    assert!(row.contains("2025-04-01=D"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn csv_export_with_no_responses_is_just_the_header(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    let response = get_auth(app, "/api/v1/admin/surveys/export.csv", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn csv_export_requires_auth(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/admin/surveys/export.csv").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// ZIP export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn zip_export_bundles_stored_documents(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    for _ in 0..2 {
        let created = post_json(app.clone(), "/api/v1/surveys", json!({})).await;
        let survey_id = body_json(created).await["data"]["id"].as_i64().unwrap();

        let stored = post_json(
            app.clone(),
            &format!("/api/v1/surveys/{survey_id}/consent"),
            json!({
                "participant_name": "Kim Jiyoung",
                "participant_signatures": [BASE64.encode(b"sig")],
                "participant_signed_on": "2025-04-10",
                "pdf_base64": BASE64.encode(b"%PDF-1.4\ntest\n%%EOF")
            }),
        )
        .await;
        assert_eq!(stored.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/v1/admin/consent-pdfs/export.zip", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/zip"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"consent_pdfs.zip\""
    );

    let bytes = body_bytes(response).await;
    // Local file header magic of the first archive entry.
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zip_export_with_no_documents_is_a_valid_empty_archive(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    let response = get_auth(app, "/api/v1/admin/consent-pdfs/export.zip", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    // An archive with zero entries is just the end-of-central-directory record.
    assert!(bytes.starts_with(b"PK\x05\x06"));
}
