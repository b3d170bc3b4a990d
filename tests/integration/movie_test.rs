//! Integration tests for the movie catalog.

mod helpers;

use axum::http::StatusCode;

fn movie_with_media() -> serde_json::Value {
    serde_json::json!({
        "title": "Spirited Away",
        "director": "Hayao Miyazaki",
        "year": 2001,
        "plot": "A girl wanders into the spirit world.",
        "genre": "Animation",
        "rating": 8.6,
        "duration_minutes": 125,
        "media_files": [
            { "type": "poster", "url": "https://img.example.com/poster.jpg", "is_main": true },
            { "type": "trailer", "url": "https://video.example.com/trailer.mp4" }
        ],
        "metadata": {
            "language": "ja",
            "country": "Japan",
            "awards": "Academy Award for Best Animated Feature",
            "cast": "Rumi Hiiragi, Miyu Irino"
        }
    })
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/v1/movies", Some(movie_with_media()), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_read_movie_publicly() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("curator").await;

    let created = app
        .request("POST", "/api/v1/movies", Some(movie_with_media()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_i64().unwrap();
    assert_eq!(created.body["data"]["media_files"].as_array().unwrap().len(), 2);
    assert_eq!(created.body["data"]["metadata"]["cast"], "Rumi Hiiragi, Miyu Irino");

    let fetched = app
        .request("GET", &format!("/api/v1/movies/{id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["title"], "Spirited Away");

    let listed = app.request("GET", "/api/v1/movies", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_movie_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("curator").await;

    let mut body = movie_with_media();
    body["year"] = serde_json::json!(1700);

    let response = app
        .request("POST", "/api/v1/movies", Some(body), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_media_can_be_filtered_by_type() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("curator").await;
    let created = app
        .request("POST", "/api/v1/movies", Some(movie_with_media()), Some(&token))
        .await;
    let id = created.body["data"]["id"].as_i64().unwrap();

    let all = app
        .request("GET", &format!("/api/v1/movies/{id}/media"), None, None)
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"].as_array().unwrap().len(), 2);

    let posters = app
        .request("GET", &format!("/api/v1/movies/{id}/media?type=poster"), None, None)
        .await;
    let posters = posters.body["data"].as_array().unwrap().clone();
    assert_eq!(posters.len(), 1);
    assert_eq!(posters[0]["type"], "poster");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("curator").await;
    let created = app
        .request("POST", "/api/v1/movies", Some(movie_with_media()), Some(&token))
        .await;
    let id = created.body["data"]["id"].as_i64().unwrap();

    let updated = app
        .request(
            "PUT",
            &format!("/api/v1/movies/{id}"),
            Some(serde_json::json!({ "rating": 9.1 })),
            Some(&token),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["rating"], 9.1);
    assert_eq!(updated.body["data"]["title"], "Spirited Away");
    assert_eq!(updated.body["data"]["media_files"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleted_movie_disappears() {
    let app = helpers::TestApp::new().await;
    let token = app.access_token("curator").await;
    let id = app.create_movie(&token, "Short Lived").await;

    let deleted = app
        .request("DELETE", &format!("/api/v1/movies/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let fetched = app
        .request("GET", &format!("/api/v1/movies/{id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", &format!("/api/v1/movies/{id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
