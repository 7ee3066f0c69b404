use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
}

/// `event_type` is the ordinal the API puts on the wire: 0 online,
/// 1 physical, 2 hybrid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreEventDetails {
    pub title: String,
    pub event_type: u8,
    pub description: String,
    pub date_time: String,
    pub speaker_details: Vec<Person>,
    pub host: Person,
}

#[derive(Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Variables>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variables {
    pub event_id: Option<i64>,
}

/// Read-only seed data. Users keep insertion order.
pub struct Store {
    pub users: Vec<User>,
    pub events: HashMap<i64, PreEventDetails>,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let db: Db = Arc::new(seed());
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/gql", post(graphql))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

static EVENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"event\(\s*id\s*:\s*(-?\d+)\s*\)").unwrap());

/// Pull the id out of `event(id: N)` in a GraphQL document.
pub fn event_id_from_query(query: &str) -> Option<i64> {
    EVENT_ID_PATTERN
        .captures(query)
        .and_then(|caps| caps[1].parse().ok())
}

fn seed() -> Store {
    let users = vec![
        User {
            id: 1,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Alan Turing".to_string(),
            email: "alan@example.com".to_string(),
        },
        User {
            id: 3,
            name: "Barbara Liskov".to_string(),
            email: "barbara@example.com".to_string(),
        },
    ];

    let mut events = HashMap::new();
    events.insert(
        7,
        PreEventDetails {
            title: "Compilers at Scale".to_string(),
            event_type: 0,
            description: "A remote session on production compiler pipelines.".to_string(),
            date_time: "2024-05-14T16:00:00Z".to_string(),
            speaker_details: vec![Person {
                name: "Frances Allen".to_string(),
            }],
            host: Person {
                name: "Grace Hopper".to_string(),
            },
        },
    );
    events.insert(
        42,
        PreEventDetails {
            title: "Systems Summit".to_string(),
            event_type: 2,
            description: "Talks in the hall and on the stream.".to_string(),
            date_time: "2024-09-02T09:30:00+02:00".to_string(),
            speaker_details: vec![
                Person {
                    name: "Ken Thompson".to_string(),
                },
                Person {
                    name: "Dennis Ritchie".to_string(),
                },
            ],
            host: Person {
                name: "Margaret Hamilton".to_string(),
            },
        },
    );

    Store { users, events }
}

async fn require_bearer(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.users.clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    db.users
        .iter()
        .find(|user| user.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Resolves `event(id: N)` from the query text first and only falls back to
/// `variables.eventId` when the text carries no id.
async fn graphql(
    State(db): State<Db>,
    Json(request): Json<GraphQlRequest>,
) -> Result<Json<Value>, StatusCode> {
    let event_id = event_id_from_query(&request.query)
        .or_else(|| request.variables.and_then(|v| v.event_id))
        .ok_or(StatusCode::BAD_REQUEST)?;

    let body = match db.events.get(&event_id) {
        Some(details) => json!({ "data": details }),
        None => json!({
            "data": null,
            "errors": [{ "message": format!("event {event_id} not found") }],
        }),
    };
    Ok(Json(body))
}
