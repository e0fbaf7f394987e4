//! End-to-end upload validation tests.

use docgate::config::GatewayConfig;

mod common;

#[tokio::test]
async fn upload_without_identity_is_unauthorized() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response = common::client()
        .post(gateway.url("/documents/upload"))
        .header("Content-Type", "image/png")
        .body(common::png_bytes(64))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Unauthorized");
}

#[tokio::test]
async fn valid_png_upload_is_accepted_without_warnings() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response =
        common::upload(&gateway, "u1", "image/png", "scan.png", common::png_bytes(2048)).await;

    assert_eq!(response.status(), 201);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "File uploaded successfully");
    assert!(json["document"]["id"].as_str().is_some());
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn spoofed_pdf_is_rejected_with_signature_mismatch() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response = common::upload(
        &gateway,
        "u1",
        "application/pdf",
        "report.pdf",
        b"hello world".to_vec(),
    )
    .await;

    assert_eq!(response.status(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["code"], "signature_mismatch");
}

#[tokio::test]
async fn disallowed_type_is_rejected() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response = common::upload(
        &gateway,
        "u1",
        "application/x-msdownload",
        "setup.exe",
        common::png_bytes(64),
    )
    .await;

    assert_eq!(response.status(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["code"], "type_not_allowed");
}

#[tokio::test]
async fn oversized_upload_is_rejected_by_the_validator() {
    let mut config = GatewayConfig::default();
    config.validation.max_file_size_bytes = 1024;
    let gateway = common::start_gateway(config).await;

    let response =
        common::upload(&gateway, "u1", "image/png", "scan.png", common::png_bytes(2048)).await;

    assert_eq!(response.status(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["code"], "size_exceeded");
}

#[tokio::test]
async fn empty_body_is_a_bad_request() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response =
        common::upload(&gateway, "u1", "application/pdf", "report.pdf", Vec::new()).await;

    assert_eq!(response.status(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["message"], "No file uploaded");
}

#[tokio::test]
async fn traversal_filename_is_accepted_with_warning() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response = common::upload(
        &gateway,
        "u1",
        "application/pdf",
        "../../etc/passwd.pdf",
        common::pdf_bytes(),
    )
    .await;

    assert_eq!(response.status(), 201);
    let json: serde_json::Value = response.json().await.unwrap();
    let warnings = json["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w == "unsafe_filename"));
}

#[tokio::test]
async fn download_returns_original_bytes_with_hardened_headers() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;
    let payload = common::png_bytes(512);
    let id = common::upload_ok(&gateway, "u1", "image/png", "scan.png", payload.clone()).await;

    let response = common::client()
        .get(gateway.url(&format!("/documents/{id}/download")))
        .header("X-User-Id", "u1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"scan.png\""
    );
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(response.bytes().await.unwrap().to_vec(), payload);
}

#[tokio::test]
async fn stored_filename_is_sanitized_for_download() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;
    let id = common::upload_ok(
        &gateway,
        "u1",
        "application/pdf",
        "../../etc/passwd.pdf",
        common::pdf_bytes(),
    )
    .await;

    let response = common::client()
        .get(gateway.url(&format!("/documents/{id}/download")))
        .header("X-User-Id", "u1")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"passwd.pdf\""
    );
}

#[tokio::test]
async fn documents_are_not_visible_to_other_users() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;
    let id = common::upload_ok(&gateway, "alice", "image/png", "scan.png", common::png_bytes(64))
        .await;

    let response = common::client()
        .get(gateway.url(&format!("/documents/{id}/download")))
        .header("X-User-Id", "mallory")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn preview_serves_images_inline_but_refuses_word_documents() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let png_id =
        common::upload_ok(&gateway, "u1", "image/png", "scan.png", common::png_bytes(64)).await;
    let docx_id = common::upload_ok(
        &gateway,
        "u1",
        common::DOCX_TYPE,
        "notes.docx",
        common::docx_bytes(),
    )
    .await;

    let response = common::client()
        .get(gateway.url(&format!("/documents/{png_id}/preview")))
        .header("X-User-Id", "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-disposition"],
        "inline; filename=\"scan.png\""
    );

    let response = common::client()
        .get(gateway.url(&format!("/documents/{docx_id}/preview")))
        .header("X-User-Id", "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 415);
}

#[tokio::test]
async fn list_returns_own_document_metadata() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;
    common::upload_ok(&gateway, "u1", "image/png", "scan.png", common::png_bytes(64)).await;
    common::upload_ok(&gateway, "u2", "application/pdf", "other.pdf", common::pdf_bytes()).await;

    let response = common::client()
        .get(gateway.url("/documents"))
        .header("X-User-Id", "u1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    let docs = json.as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["filename"], "scan.png");
    assert_eq!(docs[0]["contentType"], "image/png");
    assert_eq!(docs[0]["size"], 64);
}

#[tokio::test]
async fn healthz_needs_no_identity() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;

    let response = common::client()
        .get(gateway.url("/healthz"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}
