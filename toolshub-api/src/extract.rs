/// Request extractors that reject with `ApiError`
///
/// Drop-in replacements for axum's `Json`, `Path` and `Query`. A body that is
/// not JSON, a field of the wrong type, a non-UUID id or an unknown query value
/// all become a 400 with the usual `{error, message, details}` body.
///
/// # Example
///
/// ```no_run
/// use toolshub_api::{error::ApiResult, extract::{ApiJson, ApiPath}};
/// use uuid::Uuid;
///
/// async fn handler(ApiPath(id): ApiPath<Uuid>, ApiJson(body): ApiJson<serde_json::Value>) -> ApiResult<()> {
///     Ok(())
/// }
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
