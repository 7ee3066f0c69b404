//! Async facade over the events API.
//!
//! # Design
//! `ApiClient` pairs an `EventsClient` (request building and response
//! parsing) with a `Transport` (I/O). Each operation is one round trip:
//! build, execute, parse. Nothing is mutated after construction, so a shared
//! `&ApiClient` can serve concurrent tasks without locking.

use tracing::{debug, error};

use crate::client::EventsClient;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ApiResponse, Credential, PreEventDetails, User};

/// Typed client for the users REST endpoints and the pre-event GraphQL query.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    client: EventsClient,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    /// Client using the default `ReqwestTransport`, which raises on non-2xx.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self::with_transport(base_url, token, ReqwestTransport::new())
    }

    pub fn from_credential(credential: Credential) -> Self {
        Self::new(&credential.base_url, &credential.token)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, token: &str, transport: T) -> Self {
        Self {
            client: EventsClient::new(base_url, token),
            transport,
        }
    }

    /// `GET /users/{user_id}`.
    pub async fn get_user(&self, user_id: i64) -> Result<ApiResponse<User>, ApiError> {
        let response = self.send(self.client.build_get_user(user_id)).await?;
        self.client.parse_get_user(response)
    }

    /// `GET /users`. Users come back in the order the server sent them.
    pub async fn get_users(&self) -> Result<ApiResponse<Vec<User>>, ApiError> {
        let response = self.send(self.client.build_get_users()).await?;
        self.client.parse_get_users(response)
    }

    /// `POST /gql` for one event's pre-event details.
    ///
    /// Any failure is logged once at error level and then returned unchanged.
    pub async fn get_pre_event_details(
        &self,
        event_id: i64,
    ) -> Result<ApiResponse<PreEventDetails>, ApiError> {
        let result = self.fetch_pre_event_details(event_id).await;
        if let Err(err) = &result {
            error!(event_id, error = %err, "error fetching pre-event details");
        }
        result
    }

    async fn fetch_pre_event_details(
        &self,
        event_id: i64,
    ) -> Result<ApiResponse<PreEventDetails>, ApiError> {
        let request = self.client.build_get_pre_event_details(event_id)?;
        let response = self.send(request).await?;
        self.client.parse_get_pre_event_details(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.transport.execute(request).await
    }
}
