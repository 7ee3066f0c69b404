//! Typed async client for the events service.
//!
//! # Overview
//! Three read operations: fetch one user, fetch the user list, and fetch an
//! event's pre-event details through a GraphQL query. Every call is a single
//! request/response round trip whose result comes back as an `ApiResponse`
//! envelope (decoded body, HTTP status, status text).
//!
//! # Design
//! - `EventsClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - `Transport` executes requests; `ReqwestTransport` is the default.
//! - `ApiClient` joins the two and is what most callers want.
//! - Errors pass through untranslated. Only the GraphQL operation logs before
//!   returning its error.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use client::{pre_event_details_query, EventsClient};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    ApiResponse, Credential, EventType, GraphQlRequest, GraphQlResponse, Host, PreEventDetails,
    PreEventVariables, Speaker, UnknownEventType, User,
};
