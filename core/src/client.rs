//! Stateless HTTP request builder and response parser for the events API.
//!
//! # Design
//! `EventsClient` holds only its `Credential` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `ApiClient` runs a `Transport` in between; callers that
//! bring their own I/O can use this type directly.
//!
//! `parse_*` never inspects the status code. The body is decoded and wrapped
//! in an `ApiResponse` together with the status line, whatever it says.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ApiResponse, Credential, GraphQlRequest, GraphQlResponse, PreEventDetails, PreEventVariables,
    User,
};

/// Synchronous, stateless client for the events API.
///
/// Every request it builds carries `authorization: Bearer <token>` for the
/// token it was constructed with.
#[derive(Debug, Clone)]
pub struct EventsClient {
    credential: Credential,
}

impl EventsClient {
    /// No validation: an empty or malformed `base_url` only fails once a
    /// transport tries to send a request to it.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            credential: Credential {
                base_url: base_url.trim_end_matches('/').to_string(),
                token: token.to_string(),
            },
        }
    }

    pub fn from_credential(credential: Credential) -> Self {
        Self::new(&credential.base_url, &credential.token)
    }

    pub fn base_url(&self) -> &str {
        &self.credential.base_url
    }

    pub fn build_get_user(&self, user_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/users/{user_id}", self.credential.base_url),
            headers: vec![self.authorization()],
            body: None,
        }
    }

    pub fn build_get_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/users", self.credential.base_url),
            headers: vec![self.authorization()],
            body: None,
        }
    }

    /// The id goes out twice: interpolated into the query text and as
    /// `variables.eventId`. Resolvers that ignore `variables` still see it.
    pub fn build_get_pre_event_details(&self, event_id: i64) -> Result<HttpRequest, ApiError> {
        let payload = GraphQlRequest {
            query: pre_event_details_query(event_id),
            variables: PreEventVariables { event_id },
        };
        let body = serde_json::to_string(&payload).map_err(ApiError::Serialization)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/gql", self.credential.base_url),
            headers: vec![
                self.authorization(),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<ApiResponse<User>, ApiError> {
        envelope(response)
    }

    pub fn parse_get_users(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<Vec<User>>, ApiError> {
        envelope(response)
    }

    /// Unwraps the GraphQL `{ "data": ... }` layer, unlike the REST parsers
    /// which hand back the body as-is.
    pub fn parse_get_pre_event_details(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<PreEventDetails>, ApiError> {
        let ApiResponse {
            data,
            status,
            status_text,
        } = envelope::<GraphQlResponse<PreEventDetails>>(response)?;
        Ok(ApiResponse {
            data: data.data,
            status,
            status_text,
        })
    }

    fn authorization(&self) -> (String, String) {
        (
            "authorization".to_string(),
            format!("Bearer {}", self.credential.token),
        )
    }
}

/// GraphQL document selecting the pre-event fields of one event.
pub fn pre_event_details_query(event_id: i64) -> String {
    format!(
        r#"{{
    event(id: {event_id}) {{
        title
        eventType
        description
        dateTime
        speakerDetails {{
            name
        }}
        host {{
            name
        }}
    }}
}}"#
    )
}

fn envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    let data = serde_json::from_str(&response.body).map_err(ApiError::Deserialization)?;
    Ok(ApiResponse {
        data,
        status: response.status,
        status_text: response.status_text,
    })
}
