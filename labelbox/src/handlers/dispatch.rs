//! Method dispatch for group-scoped resources
//!
//! [`resource`] serves `GET`, `PUT` and `DELETE` on a single entity path such
//! as `/labels/{id}` against any [`GroupScopedRepository`]. Mount it with
//! [`axum::routing::any`] so unsupported methods reach the dispatcher and get
//! an explicit `405` with an `Allow` header.

use std::{fmt::Display, str::FromStr, sync::Arc};

use axum::{
    extract::Request,
    http::{Method, StatusCode},
};
use futures::FutureExt;
use serde::{de::DeserializeOwned, Serialize};

use super::{
    adapters::{decode, route_id, HandlerFuture},
    error::{ApiError, ApiOperation},
    response::respond,
};
use crate::{
    context::RequestContext,
    repository::{GroupScopedRepository, Identified, RepositoryError},
};

/// Methods served by [`resource`]
pub const RESOURCE_METHODS: &str = "GET, PUT, DELETE";

/// Build the handler for an entity path whose identifier is path parameter `param`
///
/// The identifier is parsed first, then the caller's group is taken from the
/// request context. For `PUT` the identifier from the path is stamped onto the
/// decoded payload, overriding anything the body carried.
pub fn resource<R>(
    repo: Arc<R>,
    param: &'static str,
) -> impl Fn(Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    R: GroupScopedRepository,
    R::Id: FromStr + Display + Clone + 'static,
    <R::Id as FromStr>::Err: Display,
    R::Detail: Serialize,
    R::Update: DeserializeOwned + 'static,
{
    move |request: Request| {
        let repo = Arc::clone(&repo);
        async move {
            let (mut parts, body) = request.into_parts();
            let id = route_id::<R::Id>(&mut parts, param).await?;
            let group = RequestContext::from_parts(&parts).group()?;
            let method = parts.method.clone();

            match method {
                Method::GET => {
                    let detail = repo
                        .get_one_by_group(group, id.clone())
                        .await
                        .map_err(|err| repository_failure::<R>(err, ApiOperation::Get, &id))?;
                    Ok(respond(StatusCode::OK, detail))
                }
                Method::PUT => {
                    let mut data = decode::<R::Update>(parts, body).await?;
                    data.set_id(id.clone());
                    let detail = repo
                        .update_by_group(group, data)
                        .await
                        .map_err(|err| repository_failure::<R>(err, ApiOperation::Update, &id))?;
                    Ok(respond(StatusCode::OK, detail))
                }
                Method::DELETE => {
                    repo.delete_by_group(group, id.clone())
                        .await
                        .map_err(|err| repository_failure::<R>(err, ApiOperation::Delete, &id))?;
                    Ok(respond(StatusCode::NO_CONTENT, ()))
                }
                other => Err(ApiError::method_not_allowed(&other, RESOURCE_METHODS)),
            }
        }
        .boxed()
    }
}

/// Tag a repository failure with the request's operation and entity
///
/// Server-side failures are logged once, when the error is rendered.
fn repository_failure<R: GroupScopedRepository>(
    err: RepositoryError,
    operation: ApiOperation,
    id: &impl Display,
) -> ApiError {
    ApiError::from(err)
        .with_operation(operation)
        .with_entity(R::ENTITY, id.to_string())
}
