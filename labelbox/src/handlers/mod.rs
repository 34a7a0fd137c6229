//! HTTP handler plumbing for group-scoped REST resources
//!
//! Resource modules describe *what* an endpoint does; this module owns *how*
//! it is spoken over HTTP:
//!
//! - **Adapters**: [`action`] and [`action_id`] decode a JSON body (and an
//!   optional path identifier), call a domain function and write its result
//! - **Dispatch**: [`resource`] serves `GET`/`PUT`/`DELETE` on an entity path
//!   against any [`GroupScopedRepository`](crate::repository::GroupScopedRepository)
//! - **Responses**: [`respond`] and the [`Results`] collection envelope
//! - **Errors**: [`ApiError`] with automatic HTTP status code mapping
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{http::StatusCode, routing::{any, post}, Router};
//! use labelbox::handlers::{action, resource};
//!
//! let router = Router::new()
//!     .route("/labels", post(action(create_label, StatusCode::CREATED)))
//!     .route("/labels/{id}", any(resource(repo, "id")));
//! ```

mod adapters;
mod dispatch;
mod error;
mod response;

pub use adapters::{action, action_id, decode, route_id, HandlerFuture};
pub use dispatch::{resource, RESOURCE_METHODS};
pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation};
pub use response::{respond, Results};
