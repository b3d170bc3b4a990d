//! Integration tests for movie attachments.

mod helpers;

use axum::http::{StatusCode, header};

#[tokio::test]
async fn test_upload_requires_authentication() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;

    let response = app.upload(movie_id, "notes.txt", b"hello", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.stored_file_count(movie_id), 0);
}

#[tokio::test]
async fn test_upload_and_download_round_trip() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;

    let uploaded = app
        .upload(movie_id, "notes.txt", b"hello", Some(&token))
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    assert_eq!(uploaded.body["data"]["file_name"], "notes.txt");
    assert_eq!(uploaded.body["data"]["file_size"], 5);
    assert!(uploaded.body["data"].get("storage_path").is_none());

    let stored = app
        .upload_dir
        .path()
        .join(format!("movie_{movie_id}"))
        .join("2cf24dba5fb0.txt");
    assert!(stored.exists());

    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();
    let download = app
        .get_raw(
            &format!("/api/v1/movies/{movie_id}/files/{file_id}"),
            Some(&token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.body[..], b"hello");
    assert_eq!(download.headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(download.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(
        download.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"notes.txt\""
    );
}

#[tokio::test]
async fn test_traversal_name_stays_in_movie_directory() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;

    let uploaded = app
        .upload(movie_id, "../../etc/passwd", b"root:x:0:0", Some(&token))
        .await;

    assert_eq!(uploaded.status, StatusCode::CREATED);
    assert_eq!(uploaded.body["data"]["file_name"], "passwd");
    assert_eq!(app.stored_file_count(movie_id), 1);
    assert!(!app.upload_dir.path().join("etc").exists());
}

#[tokio::test]
async fn test_identical_uploads_share_content_until_last_delete() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;

    let first = app
        .upload(movie_id, "cut-a.txt", b"same bytes", Some(&token))
        .await;
    let second = app
        .upload(movie_id, "cut-b.txt", b"same bytes", Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(app.stored_file_count(movie_id), 1);

    let first_id = first.body["data"]["id"].as_i64().unwrap();
    let second_id = second.body["data"]["id"].as_i64().unwrap();

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/movies/{movie_id}/files/{first_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.stored_file_count(movie_id), 1);

    let download = app
        .get_raw(
            &format!("/api/v1/movies/{movie_id}/files/{second_id}"),
            Some(&token),
        )
        .await;
    assert_eq!(&download.body[..], b"same bytes");

    app.request(
        "DELETE",
        &format!("/api/v1/movies/{movie_id}/files/{second_id}"),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(app.stored_file_count(movie_id), 0);
}

#[tokio::test]
async fn test_different_content_gets_distinct_files() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;

    app.upload(movie_id, "a.txt", b"first", Some(&token)).await;
    app.upload(movie_id, "b.txt", b"second", Some(&token)).await;

    assert_eq!(app.stored_file_count(movie_id), 2);
}

#[tokio::test]
async fn test_upload_to_missing_movie_is_not_found() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;

    let response = app.upload(9999, "a.txt", b"orphan", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.stored_file_count(9999), 0);
}

#[tokio::test]
async fn test_deleted_file_cannot_be_downloaded() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;
    let uploaded = app.upload(movie_id, "a.txt", b"gone soon", Some(&token)).await;
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();
    let path = format!("/api/v1/movies/{movie_id}/files/{file_id}");

    app.request("DELETE", &path, None, Some(&token)).await;

    let download = app.get_raw(&path, Some(&token)).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_files_of_deleted_movie_are_not_served() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("uploader").await;
    let movie_id = app.create_movie(&token, "Heat").await;
    let uploaded = app.upload(movie_id, "n.txt", b"hello", Some(&token)).await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    let file_id = uploaded.body["data"]["id"].as_i64().unwrap();

    let deleted = app
        .request("DELETE", &format!("/api/v1/movies/{movie_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let download = app
        .get_raw(&format!("/api/v1/movies/{movie_id}/files/{file_id}"), Some(&token))
        .await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
    assert_ne!(&download.body[..], b"hello");
}
