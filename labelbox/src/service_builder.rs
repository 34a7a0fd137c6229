//! Service builder that only accepts versioned routes
//!
//! Business routes reach the service through [`VersionedRoutes`], which only
//! [`VersionedApiBuilder::build_routes`] can create, so nothing can be served
//! outside a version path. Health and readiness are added automatically and
//! stay outside authentication.
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = Config::load()?;
//! let auth = TokenAuth::new(StaticTokenValidator::from_config(&config.auth)?);
//!
//! ServiceBuilder::new()
//!     .with_config(config)
//!     .with_routes(labels::versioned_routes(Arc::new(InMemoryLabelRepository::new())))
//!     .with_auth(auth)
//!     .build()
//!     .serve()
//!     .await?;
//! ```
//!
//! [`VersionedApiBuilder::build_routes`]: crate::versioning::VersionedApiBuilder::build_routes

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::{
    config::Config,
    error::Result,
    handlers::{ApiError, ApiErrorKind, ApiOperation},
    health,
    middleware::TokenAuth,
    server::Server,
    state::AppState,
};

/// Opaque wrapper around versioned business routes
#[derive(Debug)]
pub struct VersionedRoutes(Router);

impl VersionedRoutes {
    pub(crate) fn from_router(router: Router) -> Self {
        Self(router)
    }
}

/// Builder for [`LabelboxService`]
///
/// Unset fields fall back to defaults: `Config::default()`, no business
/// routes and no authentication.
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    config: Option<Config>,
    routes: Option<VersionedRoutes>,
    auth: Option<TokenAuth>,
}

impl ServiceBuilder {
    /// Create a new service builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Add versioned routes to the service
    #[must_use]
    pub fn with_routes(mut self, routes: VersionedRoutes) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Put the versioned routes behind bearer token authentication
    #[must_use]
    pub fn with_auth(mut self, auth: TokenAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Assemble health endpoints, versioned routes and authentication
    pub fn build(self) -> LabelboxService {
        let config = self.config.unwrap_or_default();
        let auth_enabled = self.auth.is_some();

        let api = self
            .routes
            .map(|VersionedRoutes(routes)| routes)
            .unwrap_or_default();

        let api = match self.auth {
            Some(auth) if api.has_routes() => {
                api.route_layer(from_fn_with_state(auth, TokenAuth::middleware))
            }
            Some(_) => api,
            None => {
                tracing::warn!(
                    "Service built without authentication; API requests carry no caller"
                );
                api
            }
        };

        let state = AppState::new(config.clone()).with_auth_enabled(auth_enabled);
        let router = Router::new()
            .route("/health", get(health::health))
            .route("/ready", get(health::readiness))
            .with_state(state)
            .merge(api)
            .fallback(route_not_found);

        LabelboxService { config, router }
    }
}

async fn route_not_found() -> ApiError {
    ApiError::new(
        ApiOperation::Dispatch,
        ApiErrorKind::NotFound,
        "No route matches this path",
    )
}

/// Assembled service, ready to serve
#[derive(Debug)]
pub struct LabelboxService {
    config: Config,
    router: Router,
}

impl LabelboxService {
    /// The complete application with the middleware stack applied
    ///
    /// This is exactly what [`serve`](Self::serve) runs, which makes it the
    /// entry point for in-process tests.
    pub fn router(&self) -> Router {
        Server::new(self.config.clone()).apply_middleware(self.router.clone())
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn serve(self) -> Result<()> {
        Server::new(self.config).serve(self.router).await
    }

    /// Get a reference to the service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
