use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, User};
use tower::ServiceExt;

const AUTH: &str = "Bearer test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(String::new())
        .unwrap()
}

fn gql_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/gql")
        .header(http::header::AUTHORIZATION, AUTH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_bearer_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/users").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn non_bearer_scheme_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gql_requires_bearer_too() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/gql")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"query":"{ event(id: 7) { title } }"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- users ---

#[tokio::test]
async fn list_users_in_seed_order() {
    let resp = app().oneshot(get_request("/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn get_user_found() {
    let resp = app().oneshot(get_request("/users/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.name, "Alan Turing");
    assert_eq!(user.email, "alan@example.com");
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(get_request("/users/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app().oneshot(get_request("/users/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- gql ---

#[tokio::test]
async fn gql_resolves_id_from_query_text() {
    let resp = app()
        .oneshot(gql_request(
            r#"{"query":"{ event(id: 42) { title eventType } }","variables":{"eventId":42}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["data"]["title"], "Systems Summit");
    assert_eq!(body["data"]["eventType"], 2);
    assert_eq!(body["data"]["speakerDetails"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn gql_query_text_wins_over_variables() {
    let resp = app()
        .oneshot(gql_request(
            r#"{"query":"{ event(id: 7) { title } }","variables":{"eventId":42}}"#,
        ))
        .await
        .unwrap();

    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["data"]["title"], "Compilers at Scale");
}

#[tokio::test]
async fn gql_falls_back_to_variables() {
    let resp = app()
        .oneshot(gql_request(
            r#"{"query":"query($eventId: Int!) { event(id: $eventId) { title } }","variables":{"eventId":7}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["data"]["eventType"], 0);
}

#[tokio::test]
async fn gql_unknown_event_returns_errors_payload() {
    let resp = app()
        .oneshot(gql_request(r#"{"query":"{ event(id: 999) { title } }"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["data"].is_null());
    assert_eq!(body["errors"][0]["message"], "event 999 not found");
}

#[tokio::test]
async fn gql_without_any_id_returns_400() {
    let resp = app()
        .oneshot(gql_request(r#"{"query":"{ events { title } }"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn gql_malformed_json_returns_422() {
    let resp = app()
        .oneshot(gql_request(r#"{"not_query":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
