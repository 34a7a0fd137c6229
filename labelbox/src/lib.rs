//! # labelbox
//!
//! Versioned HTTP API for labels owned by a tenant group.
//!
//! The interesting part is the request-adapter layer in [`handlers`]: generic
//! functions that decode a payload, parse a path identifier, call a domain
//! function and write the result, plus a single-route dispatcher serving
//! `GET`/`PUT`/`DELETE` for any [`repository::GroupScopedRepository`].
//!
//! ## Features
//!
//! - **Group scoping**: the group comes from authenticated [`middleware::Claims`], never input
//! - **Middleware stack**: bearer token auth, request tracking, panic recovery, body size limits
//! - **Versioning**: every business route lives under `/api/v{n}`
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use labelbox::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let auth = TokenAuth::new(StaticTokenValidator::from_config(&config.auth)?);
//!     let repo = Arc::new(InMemoryLabelRepository::new());
//!
//!     ServiceBuilder::new()
//!         .with_config(config)
//!         .with_routes(labels::versioned_routes(repo))
//!         .with_auth(auth)
//!         .build()
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod labels;
pub mod middleware;
pub mod observability;
pub mod repository;
pub mod server;
pub mod service_builder;
pub mod state;
pub mod versioning;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AuthConfig, Config, TokenGrant};
    pub use crate::context::RequestContext;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        action, action_id, resource, respond, ApiError, ApiErrorKind, ApiOperation, Results,
    };
    pub use crate::health::{health, readiness};
    pub use crate::ids::{GroupId, LabelId, MakeTypedRequestId, RequestId};
    pub use crate::labels::{self, InMemoryLabelRepository, LabelRepository};
    pub use crate::middleware::{Claims, StaticTokenValidator, TokenAuth, TokenValidator};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        GroupScopedRepository, Identified, RepositoryError, RepositoryErrorKind,
        RepositoryOperation, RepositoryResult,
    };
    pub use crate::server::Server;
    pub use crate::service_builder::{LabelboxService, ServiceBuilder, VersionedRoutes};
    pub use crate::state::AppState;
    pub use crate::versioning::{ApiVersion, DeprecationInfo, VersionedApiBuilder};

    pub use axum::{
        http::{Method, StatusCode},
        response::{IntoResponse, Response},
        Router,
    };
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, warn};
}
