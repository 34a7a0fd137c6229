//! Generic action adapters
//!
//! [`action`] and [`action_id`] turn a plain async domain function into an
//! axum handler. They own the decode, invoke and respond steps so resource
//! modules only write the function in the middle.
//!
//! ```rust,ignore
//! let create = action(
//!     move |ctx: RequestContext, data: LabelCreate| {
//!         let repo = Arc::clone(&repo);
//!         async move { repo.create(ctx.group()?, data).await.map_err(ApiError::from) }
//!     },
//!     StatusCode::CREATED,
//! );
//! let router = Router::new().route("/labels", post(create));
//! ```
//!
//! Failures before the domain function runs are [`ApiOperation::Decode`]
//! errors, which keeps them apart from anything the function itself returns.
//!
//! [`ApiOperation::Decode`]: super::ApiOperation::Decode

use std::{fmt::Display, future::Future, str::FromStr};

use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{request::Parts, StatusCode},
    response::Response,
    Json,
};
use futures::future::{BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Serialize};

use super::{error::ApiError, response::respond};
use crate::context::RequestContext;

/// Future returned by every adapter-built handler
pub type HandlerFuture = BoxFuture<'static, Result<Response, ApiError>>;

/// Wrap `f(ctx, payload)` into a handler that decodes `T` from the JSON body
///
/// A body that does not decode fails with a client error and `f` is never
/// called. Errors from `f` are returned unchanged. On success the result is
/// written with `success`.
pub fn action<T, Y, F, Fut>(
    f: F,
    success: StatusCode,
) -> impl Fn(Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    T: DeserializeOwned + Send + 'static,
    Y: Serialize,
    F: Fn(RequestContext, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Y, ApiError>> + Send + 'static,
{
    move |request: Request| {
        let f = f.clone();
        async move {
            let (parts, body) = request.into_parts();
            let ctx = RequestContext::from_parts(&parts);
            let payload = decode::<T>(parts, body).await?;
            let result = f(ctx, payload).await?;
            Ok(respond(success, result))
        }
        .boxed()
    }
}

/// Like [`action`], with an identifier parsed from path parameter `param`
///
/// The identifier is parsed before the body is touched. A malformed
/// identifier fails with 400 and leaves the body stream unread.
pub fn action_id<I, T, Y, F, Fut>(
    param: &'static str,
    f: F,
    success: StatusCode,
) -> impl Fn(Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    I: FromStr + Send + 'static,
    I::Err: Display,
    T: DeserializeOwned + Send + 'static,
    Y: Serialize,
    F: Fn(RequestContext, I, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Y, ApiError>> + Send + 'static,
{
    move |request: Request| {
        let f = f.clone();
        async move {
            let (mut parts, body) = request.into_parts();
            let id = route_id::<I>(&mut parts, param).await?;
            let ctx = RequestContext::from_parts(&parts);
            let payload = decode::<T>(parts, body).await?;
            let result = f(ctx, id, payload).await?;
            Ok(respond(success, result))
        }
        .boxed()
    }
}

/// Parse path parameter `param` as `I`
///
/// A parameter missing from the matched route is a wiring bug and reported
/// as an internal error; a value that fails to parse is the client's fault.
pub async fn route_id<I>(parts: &mut Parts, param: &str) -> Result<I, ApiError>
where
    I: FromStr,
    I::Err: Display,
{
    let params = RawPathParams::from_request_parts(parts, &())
        .await
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let Some((_, raw)) = params.iter().find(|(name, _)| *name == param) else {
        tracing::error!(param, path = %parts.uri.path(), "Route has no such path parameter");
        return Err(ApiError::internal("An internal error occurred"));
    };

    raw.parse::<I>()
        .map_err(|e| ApiError::bad_request(format!("Invalid {} '{}': {}", param, raw, e)))
}

/// Decode the JSON body of a request split by [`Request::into_parts`]
pub async fn decode<T>(parts: Parts, body: Body) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let request = Request::from_parts(parts, body);
    let Json(payload) = Json::<T>::from_request(request, &()).await?;
    Ok(payload)
}
