//! Image upload tests for the multipart uploader.

use super::helpers::uploader_for;
use rstest::rstest;
use serde_json::json;
use taskdeck::task::ports::{ImageFile, ImageUploader, MAX_IMAGE_BYTES, UploadError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

const UPLOAD_PATH: &str = "/api/upload";

fn png(bytes: &[u8]) -> ImageFile {
    ImageFile::new("cat.png", "image/png", bytes)
}

#[tokio::test]
async fn upload_returns_asset_url_for_stored_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"cat.png\""))
        .and(body_string_contains("fake-png-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "/uploads/1717-cat.png",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = uploader_for(&server)
        .upload(&png(b"fake-png-bytes"))
        .await
        .expect("upload should succeed");

    assert_eq!(url, format!("{}/uploads/1717-cat.png", server.uri()));
}

#[tokio::test]
async fn padded_upper_case_type_is_sent_in_canonical_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(body_string_contains("image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "uploads/shout.png",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = uploader_for(&server)
        .upload(&ImageFile::new("shout.png", " IMAGE/PNG ", b"loud-bytes".as_slice()))
        .await
        .expect("normalised type should upload");

    assert_eq!(url, format!("{}/uploads/shout.png", server.uri()));
    let requests = server.received_requests().await.expect("recording enabled");
    let body = requests
        .first()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .expect("one request");
    assert!(!body.contains("IMAGE/PNG"), "raw type leaked: {body}");
}

#[rstest]
#[case("image/svg+xml")]
#[case("application/pdf")]
#[case("")]
#[tokio::test]
async fn unsupported_type_is_refused_before_sending(#[case] mime_type: &str) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = uploader_for(&server)
        .upload(&ImageFile::new("doc", mime_type, b"bytes".as_slice()))
        .await;

    assert!(
        matches!(result, Err(UploadError::UnsupportedMimeType(_))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn oversized_image_is_refused_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = uploader_for(&server)
        .upload(&png(&vec![0_u8; MAX_IMAGE_BYTES + 1]))
        .await;

    assert!(
        matches!(
            result,
            Err(UploadError::TooLarge { actual_bytes, limit_bytes })
                if actual_bytes == MAX_IMAGE_BYTES + 1 && limit_bytes == MAX_IMAGE_BYTES
        ),
        "got {result:?}"
    );
}

#[tokio::test]
async fn host_rejection_carries_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Only image files are allowed",
        })))
        .mount(&server)
        .await;

    let result = uploader_for(&server).upload(&png(b"x")).await;

    assert!(
        matches!(&result, Err(UploadError::Rejected(message)) if message == "Only image files are allowed"),
        "got {result:?}"
    );
}

#[tokio::test]
async fn host_failure_without_body_names_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = uploader_for(&server).upload(&png(b"x")).await;

    assert!(
        matches!(&result, Err(UploadError::Rejected(message)) if message.contains("500")),
        "got {result:?}"
    );
}

#[tokio::test]
async fn success_without_path_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let result = uploader_for(&server).upload(&png(b"x")).await;

    assert!(matches!(result, Err(UploadError::Rejected(_))), "got {result:?}");
}
