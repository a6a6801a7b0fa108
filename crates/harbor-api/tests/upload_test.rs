//! File upload integration tests.
//!
//! Run with: `cargo test -p harbor-api --test upload_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use helpers::fixtures::{image_part, text_part};
use helpers::setup_test_app;
use image::{GenericImageView, ImageFormat};
use serde_json::{json, Value};

const UPLOAD_URL: &str = "/server/file-upload-test";

#[tokio::test]
async fn test_upload_files_and_images() {
    let app = setup_test_app();
    let form = MultipartForm::new()
        .add_text("filename", "customFileNameTest")
        .add_part("files", text_part("first.txt", "one"))
        .add_part("files", text_part("second.txt", "two"))
        .add_part("images", image_part("a.png", "image/png", ImageFormat::Png))
        .add_part("images", image_part("b.jpg", "image/jpeg", ImageFormat::Jpeg))
        .add_part("images", image_part("c.webp", "image/webp", ImageFormat::WebP));

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully uploaded all files!");

    let files = &body["data"]["filesStatus"];
    assert_eq!(files["success"], true);
    assert_eq!(files["message"], "All files are successfully uploaded!");
    assert_eq!(files["totalFiles"], 2);
    assert_eq!(files["filesUploaded"], 2);

    let images = &body["data"]["imagesStatus"];
    assert_eq!(images["message"], "All images processed successfully!");
    assert_eq!(images["filesUploaded"], 3);

    // More than one file per group, so the requested name is not used
    let stored = app.stored_files();
    assert_eq!(stored.len(), 5);
    assert!(stored.iter().all(|name| !name.starts_with("customFileNameTest")));

    for name in images["uploadedFileNames"].as_array().unwrap() {
        let img = image::open(app.stored_path(name.as_str().unwrap())).unwrap();
        assert_eq!(img.dimensions(), (600, 250));
    }
    assert!(app.spool_is_empty());
}

#[tokio::test]
async fn test_single_file_and_image_use_requested_name() {
    let app = setup_test_app();
    let form = MultipartForm::new()
        .add_text("filename", "customFileNameTest")
        .add_part("files", text_part("notes.txt", "hello"))
        .add_part("images", image_part("photo.png", "image/png", ImageFormat::Png));

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["filesStatus"]["uploadedFileNames"],
        json!(["customFileNameTest.txt"])
    );
    assert_eq!(
        body["data"]["imagesStatus"]["uploadedFileNames"],
        json!(["customFileNameTest.png"])
    );
    assert_eq!(
        std::fs::read_to_string(app.stored_path("customFileNameTest.txt")).unwrap(),
        "hello"
    );
}

#[tokio::test]
async fn test_requested_name_is_sanitized() {
    let app = setup_test_app();
    let form = MultipartForm::new()
        .add_text("filename", "../escape:attempt")
        .add_part("files", text_part("notes.txt", "hello"));

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    let body: Value = response.json();
    assert_eq!(
        body["data"]["filesStatus"]["uploadedFileNames"],
        json!([".._escape_attempt.txt"])
    );
    assert_eq!(app.stored_files(), vec![".._escape_attempt.txt"]);
}

#[tokio::test]
async fn test_dangerous_file_is_rejected() {
    let app = setup_test_app();
    let form = MultipartForm::new().add_part(
        "files",
        axum_test::multipart::Part::text("<script></script>")
            .file_name("page.html")
            .mime_type("text/html"),
    );

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Some error has occured!");
    assert_eq!(
        body["data"]["filesStatus"],
        json!({
            "success": false,
            "message": "File type is not allowed!",
            "totalFiles": 0,
            "filesUploaded": 0,
            "uploadedFileNames": []
        })
    );
    assert_eq!(body["data"]["imagesStatus"]["message"], "No files to upload!");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_too_many_files() {
    let app = setup_test_app();
    let form = (0..4).fold(MultipartForm::new(), |form, i| {
        form.add_part("files", text_part(&format!("{}.txt", i), "x"))
    });

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    let body: Value = response.json();
    assert_eq!(
        body["data"]["filesStatus"]["message"],
        "Maximum number of files reached! The limit is 3"
    );
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_text_file_in_images_field_is_invalid_format() {
    let app = setup_test_app();
    let form = MultipartForm::new().add_part("images", text_part("notes.txt", "not an image"));

    let response = app.client().post(UPLOAD_URL).multipart(form).await;

    let body: Value = response.json();
    assert_eq!(body["data"]["imagesStatus"]["message"], "Invalid file format!");
}

#[tokio::test]
async fn test_non_multipart_request_is_an_internal_error() {
    let app = setup_test_app();

    let response = app
        .client()
        .post(UPLOAD_URL)
        .json(&json!({ "files": [] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "success": false,
        "message": "An error occurred",
        "data": null
    }));
}
