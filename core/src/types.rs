//! Domain DTOs and the response envelope for the events API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Decoding trusts the
//! wire shape: unknown fields are ignored and nothing beyond the field types
//! is validated (`date_time` stays an opaque string).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base address and bearer token a client is constructed with.
///
/// Held for the client's lifetime and never refreshed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub base_url: String,
    pub token: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A user returned by `GET /users` and `GET /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// How an event is attended. Travels over the wire as its ordinal
/// (`ONLINE = 0`, `PHYSICAL = 1`, `HYBRID = 2`), never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EventType {
    Online = 0,
    Physical = 1,
    Hybrid = 2,
}

/// An ordinal that does not name an `EventType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type ordinal {0}")]
pub struct UnknownEventType(pub u8);

impl From<EventType> for u8 {
    fn from(event_type: EventType) -> Self {
        event_type as u8
    }
}

impl TryFrom<u8> for EventType {
    type Error = UnknownEventType;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(EventType::Online),
            1 => Ok(EventType::Physical),
            2 => Ok(EventType::Hybrid),
            other => Err(UnknownEventType(other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Host {
    pub name: String,
}

/// Details shown before an event starts, fetched through `POST /gql`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreEventDetails {
    pub title: String,
    pub event_type: EventType,
    pub description: String,
    /// ISO-8601 expected, not checked.
    pub date_time: String,
    pub speaker_details: Vec<Speaker>,
    pub host: Host,
}

/// Envelope every client operation returns: the decoded body plus the HTTP
/// status line it arrived with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub status_text: String,
}

/// Body of the `POST /gql` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: PreEventVariables,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreEventVariables {
    pub event_id: i64,
}

/// Body of a `POST /gql` response. Only `data` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: T,
}
