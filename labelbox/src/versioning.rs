//! URL path versioning for the label API
//!
//! Every business route is mounted under a version segment, e.g.
//! `/api/v1/labels`. A version can be marked deprecated, in which case every
//! response from it carries `Deprecation`, `Sunset`, `Link` and `Warning`
//! headers (RFC 8594) pointing at its successor.
//!
//! ```rust,ignore
//! let routes = VersionedApiBuilder::new()
//!     .with_base_path("/api")
//!     .add_version(ApiVersion::V1, |router| router.merge(labels::routes(repo)))
//!     .build_routes();
//! ```

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::{self, Next},
    Router,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::service_builder::VersionedRoutes;

/// API version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// API Version 1
    V1,
    /// API Version 2
    V2,
}

impl ApiVersion {
    /// Get the version as a path segment (e.g., "v1")
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

/// Deprecation information for an API version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeprecationInfo {
    /// The recommended replacement version
    pub replacement: ApiVersion,
    /// Sunset date in RFC 3339 format
    pub sunset_date: Option<String>,
    /// Extra text appended to the `Warning` header
    pub message: Option<String>,
}

impl DeprecationInfo {
    /// Deprecate in favour of `replacement`
    pub fn new(replacement: ApiVersion) -> Self {
        Self {
            replacement,
            sunset_date: None,
            message: None,
        }
    }

    /// Set the sunset date (RFC 3339 format)
    #[must_use]
    pub fn with_sunset_date(mut self, date: impl Into<String>) -> Self {
        self.sunset_date = Some(date.into());
        self
    }

    /// Set a custom deprecation message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn warning(&self, version: ApiVersion) -> String {
        let mut warning = format!(
            "299 - \"API version {} is deprecated. Please migrate to version {}.",
            version, self.replacement
        );
        if let Some(message) = &self.message {
            warning.push(' ');
            warning.push_str(message);
        }
        warning.push('"');
        warning
    }
}

/// Builder that mounts each version's routes under `{base}/{version}`
#[derive(Default)]
pub struct VersionedApiBuilder {
    versions: Vec<(ApiVersion, Router, Option<DeprecationInfo>)>,
    base_path: String,
}

impl VersionedApiBuilder {
    /// Create a new versioned API builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base path for all versioned routes (e.g., "/api")
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    /// Add a current API version
    #[must_use]
    pub fn add_version<F>(mut self, version: ApiVersion, routes: F) -> Self
    where
        F: FnOnce(Router) -> Router,
    {
        self.versions.push((version, routes(Router::new()), None));
        self
    }

    /// Add a deprecated API version
    #[must_use]
    pub fn add_version_deprecated<F>(
        mut self,
        version: ApiVersion,
        routes: F,
        deprecation: DeprecationInfo,
    ) -> Self
    where
        F: FnOnce(Router) -> Router,
    {
        self.versions
            .push((version, routes(Router::new()), Some(deprecation)));
        self
    }

    fn version_path(&self, version: ApiVersion) -> String {
        format!("{}/{}", self.base_path, version.as_path_segment())
    }

    /// Build a plain router with every version nested under its path
    pub fn build(self) -> Router {
        let paths: Vec<String> = self
            .versions
            .iter()
            .map(|(version, _, _)| self.version_path(*version))
            .collect();

        let mut router = Router::new();
        for ((version, routes, deprecation), path) in self.versions.into_iter().zip(paths) {
            let routes = match deprecation {
                Some(info) => {
                    let successor = format!(
                        "{}/{}/",
                        self.base_path,
                        info.replacement.as_path_segment()
                    );
                    tracing::info!(
                        %version,
                        replacement = %info.replacement,
                        "Serving deprecated API version"
                    );
                    with_deprecation_headers(routes, version, info, successor)
                }
                None => routes,
            };
            router = router.nest(&path, routes);
        }
        router
    }

    /// Build the routes for [`ServiceBuilder::with_routes`]
    ///
    /// [`ServiceBuilder::with_routes`]: crate::service_builder::ServiceBuilder::with_routes
    pub fn build_routes(self) -> VersionedRoutes {
        VersionedRoutes::from_router(self.build())
    }
}

fn with_deprecation_headers(
    routes: Router,
    version: ApiVersion,
    info: DeprecationInfo,
    successor: String,
) -> Router {
    let deprecation = HeaderValue::from_str(&format!("version=\"{}\"", version)).ok();
    let sunset = info
        .sunset_date
        .as_deref()
        .and_then(|date| HeaderValue::from_str(date).ok());
    let link =
        HeaderValue::from_str(&format!("<{}>; rel=\"successor-version\"", successor)).ok();
    let warning = HeaderValue::from_str(&info.warning(version)).ok();

    routes.layer(middleware::from_fn(move |request: Request, next: Next| {
        let (deprecation, sunset, link) = (deprecation.clone(), sunset.clone(), link.clone());
        let warning = warning.clone();
        async move {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            if let Some(value) = deprecation {
                headers.insert("deprecation", value);
            }
            if let Some(value) = sunset {
                headers.insert("sunset", value);
            }
            if let Some(value) = link {
                headers.insert(header::LINK, value);
            }
            if let Some(value) = warning {
                headers.insert(header::WARNING, value);
            }
            response
        }
    }))
}
