//! HTTP routes for labels

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Response,
    routing::{any, get},
    Router,
};

use super::{model::LabelCreate, repository::LabelRepository};
use crate::{
    context::RequestContext,
    handlers::{action, resource, respond, ApiError, ApiOperation, Results},
    service_builder::VersionedRoutes,
    versioning::{ApiVersion, VersionedApiBuilder},
};

/// Methods served on the label collection
pub const COLLECTION_METHODS: &str = "GET, POST";

/// Label routes relative to the version prefix
///
/// - `GET /labels`, `POST /labels`
/// - `GET | PUT | DELETE /labels/{id}`
///
/// Any other method on either path is a 405 with an `Allow` header.
pub fn routes<R: LabelRepository>(repo: Arc<R>) -> Router {
    let create = {
        let repo = Arc::clone(&repo);
        move |ctx: RequestContext, data: LabelCreate| {
            let repo = Arc::clone(&repo);
            async move {
                let group = ctx.group()?;
                let label = repo
                    .create(group, data)
                    .await
                    .map_err(|err| ApiError::from(err).with_operation(ApiOperation::Create))?;
                tracing::debug!(
                    request_id = ctx.request_id().unwrap_or_default(),
                    label = %label.id,
                    %group,
                    "Label created"
                );
                Ok::<_, ApiError>(label)
            }
        }
    };

    Router::new()
        .route(
            "/labels",
            get(get_all::<R>)
                .post(action(create, StatusCode::CREATED))
                .fallback(|method: Method| async move {
                    ApiError::method_not_allowed(&method, COLLECTION_METHODS)
                }),
        )
        .route("/labels/{id}", any(resource(Arc::clone(&repo), "id")))
        .with_state(repo)
}

/// Label routes mounted under `/api/v1`
pub fn versioned_routes<R: LabelRepository>(repo: Arc<R>) -> VersionedRoutes {
    VersionedApiBuilder::new()
        .with_base_path("/api")
        .add_version(ApiVersion::V1, |router| router.merge(routes(repo)))
        .build_routes()
}

async fn get_all<R: LabelRepository>(
    State(repo): State<Arc<R>>,
    ctx: RequestContext,
) -> Result<Response, ApiError> {
    let group = ctx.group()?;
    let labels = repo
        .get_all(group)
        .await
        .map_err(|err| ApiError::from(err).with_operation(ApiOperation::List))?;

    Ok(respond(StatusCode::OK, Results::new(labels)))
}
