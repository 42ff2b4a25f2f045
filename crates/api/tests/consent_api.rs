mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use shiftsurvey_core::consent::MAX_SIGNATURE_BYTES;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, create_test_researcher, delete, get, get_auth, login_for_token,
    post_json, put_json,
};

fn signature_b64() -> String {
    format!("data:image/png;base64,{}", BASE64.encode(b"\x89PNG\r\n\x1a\nfake-signature"))
}

fn pdf_b64() -> String {
    BASE64.encode(b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n%%EOF")
}

fn consent_body() -> Value {
    json!({
        "participant_name": "Kim Jiyoung",
        "participant_signatures": [signature_b64(), signature_b64()],
        "researcher_signature": signature_b64(),
        "participant_signed_on": "2025-04-10",
        "researcher_signed_on": "2025-04-10",
        "pdf_base64": pdf_b64()
    })
}

/// Open an empty survey draft and return its id.
async fn create_survey(app: axum::Router) -> i64 {
    let response = post_json(app, "/api/v1/surveys", json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Consent drafts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn consent_draft_lifecycle(pool: PgPool) {
    let app = build_test_app(pool);

    // Save progress under a client-chosen session key.
    let saved = put_json(
        app.clone(),
        "/api/v1/consent-drafts/session-abc",
        json!({
            "payload": {
                "participant_name": "Kim Jiyoung",
                "signatures": [signature_b64()],
                "signed_date": "2025-04-10"
            }
        }),
    )
    .await;
    assert_eq!(saved.status(), StatusCode::OK);

    // Resume from another request.
    let fetched = get(app.clone(), "/api/v1/consent-drafts/session-abc").await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = body_json(fetched).await;
    assert_eq!(body["data"]["payload"]["participant_name"], "Kim Jiyoung");
    assert_eq!(body["data"]["payload"]["signatures"].as_array().unwrap().len(), 1);

    // Replacing the draft overwrites the payload.
    let saved = put_json(
        app.clone(),
        "/api/v1/consent-drafts/session-abc",
        json!({ "payload": { "participant_name": "Lee Soojin" } }),
    )
    .await;
    assert_eq!(saved.status(), StatusCode::OK);
    let fetched = get(app.clone(), "/api/v1/consent-drafts/session-abc").await;
    let body = body_json(fetched).await;
    assert_eq!(body["data"]["payload"]["participant_name"], "Lee Soojin");
    assert_eq!(body["data"]["payload"]["signatures"].as_array().unwrap().len(), 0);

    // Discard. Idempotent on repeat.
    let removed = delete(app.clone(), "/api/v1/consent-drafts/session-abc").await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let removed = delete(app.clone(), "/api/v1/consent-drafts/session-abc").await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let fetched = get(app, "/api/v1/consent-drafts/session-abc").await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consent_draft_with_invalid_signature_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/consent-drafts/session-abc",
        json!({ "payload": { "signatures": ["not base64 at all!!!"] } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_consent_draft_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/consent-drafts/never-saved").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Consent PDFs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn storing_a_consent_pdf_succeeds_once(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let stored = post_json(
        app.clone(),
        &format!("/api/v1/surveys/{survey_id}/consent"),
        consent_body(),
    )
    .await;
    assert_eq!(stored.status(), StatusCode::CREATED);
    let body = body_json(stored).await;
    assert_eq!(body["data"]["survey_id"], survey_id);
    assert_eq!(body["data"]["participant_name"], "Kim Jiyoung");

    // One document per survey.
    let duplicate = post_json(
        app,
        &format!("/api/v1/surveys/{survey_id}/consent"),
        consent_body(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let body = body_json(duplicate).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consent_document_must_be_a_pdf(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let mut body = consent_body();
    body["pdf_base64"] = Value::String(BASE64.encode(b"plain text, no magic"));

    let response = post_json(app, &format!("/api/v1/surveys/{survey_id}/consent"), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not a PDF"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversize_signature_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let mut body = consent_body();
    body["participant_signatures"] =
        json!([BASE64.encode(vec![0u8; MAX_SIGNATURE_BYTES + 1])]);

    let response = post_json(app, &format!("/api/v1/surveys/{survey_id}/consent"), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("exceeds"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consent_requires_a_participant_signature(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let mut body = consent_body();
    body["participant_signatures"] = json!([]);

    let response = post_json(app, &format!("/api/v1/surveys/{survey_id}/consent"), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consent_for_missing_survey_is_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app, "/api/v1/surveys/424242/consent", consent_body()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_listing_omits_document_bodies(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    let survey_id = create_survey(app.clone()).await;
    post_json(
        app.clone(),
        &format!("/api/v1/surveys/{survey_id}/consent"),
        consent_body(),
    )
    .await;

    let response = get_auth(app, "/api/v1/admin/consent-pdfs", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["participant_name"], "Kim Jiyoung");
    assert!(items[0].get("pdf_base64").is_none());
    assert!(items[0].get("participant_signatures").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn downloading_a_consent_pdf_returns_the_document(pool: PgPool) {
    let password = create_test_researcher(&pool, "admin").await;
    let app = build_test_app(pool);
    let token = login_for_token(app.clone(), "admin", &password).await;

    let survey_id = create_survey(app.clone()).await;
    let stored = post_json(
        app.clone(),
        &format!("/api/v1/surveys/{survey_id}/consent"),
        consent_body(),
    )
    .await;
    let pdf_id = body_json(stored).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(
        app,
        &format!("/api/v1/admin/consent-pdfs/{pdf_id}/download"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        &format!("attachment; filename=\"consent_survey_{survey_id}.pdf\"")
    );

    let bytes = common::body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
}

// ---------------------------------------------------------------------------
// Personal info
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn personal_info_is_stored_with_normalized_phone(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let response = post_json(
        app,
        &format!("/api/v1/surveys/{survey_id}/personal-info"),
        json!({
            "name": "  Kim Jiyoung  ",
            "birth_date": "1992-03-14",
            "phone": "010-1234-5678"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Kim Jiyoung");
    assert_eq!(body["data"]["phone"], "01012345678");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn personal_info_rejects_bad_phone(pool: PgPool) {
    let app = build_test_app(pool);
    let survey_id = create_survey(app.clone()).await;

    let response = post_json(
        app,
        &format!("/api/v1/surveys/{survey_id}/personal-info"),
        json!({
            "name": "Kim Jiyoung",
            "birth_date": "1992-03-14",
            "phone": "02-1234-5678"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_participant_identity_is_a_conflict(pool: PgPool) {
    let app = build_test_app(pool);

    let identity = json!({
        "name": "Kim Jiyoung",
        "birth_date": "1992-03-14",
        "phone": "010-1234-5678"
    });

    let first_survey = create_survey(app.clone()).await;
    let response = post_json(
        app.clone(),
        &format!("/api/v1/surveys/{first_survey}/personal-info"),
        identity.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same person, second survey. Separators in the phone must not
    // defeat the duplicate check.
    let mut same_identity = identity;
    same_identity["phone"] = Value::String("01012345678".to_string());

    let second_survey = create_survey(app.clone()).await;
    let response = post_json(
        app,
        &format!("/api/v1/surveys/{second_survey}/personal-info"),
        same_identity,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}
