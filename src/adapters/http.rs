//! HTTP boundary: an axum router over [`HoursService`]. Status codes and the
//! error body shape exist only in this module.
//!
//! | Method & path                      | Operation          |
//! |------------------------------------|--------------------|
//! | `GET    {base}`                    | list all names     |
//! | `GET    {base}/findActive`         | list active names  |
//! | `GET    {base}/findByName/:name`   | fetch one set      |
//! | `PUT    {base}`                    | create or replace  |
//! | `DELETE {base}/findByName/:name`   | delete one set     |

use crate::core::service::HoursService;
use crate::domain::model::{HoursNamesResponse, HoursSet, NamedHoursSet, WriteOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{ErrorKind, HoursError, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;
use uuid::Uuid;

pub const DEFAULT_BASE_PATH: &str = "/hours";

const NO_HOURS_FOUND_MSG: &str = "No hours were found on the server.";

fn not_found_detail(path: &str) -> String {
    format!(r#"The requested URL "{}" was not found on this server."#, path)
}

fn internal_detail(path: &str) -> String {
    format!(
        r#"The requested URL "{}" generated an internal server error."#,
        path
    )
}

fn parse_detail(path: &str) -> String {
    format!(
        r#"The requested URL "{}" generated an JSON unmarshaling internal server error."#,
        path
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContent {
    pub id: Uuid,
    pub status: u16,
    pub detail: String,
    pub url: String,
}

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: ErrorContent,
}

impl ErrorBody {
    pub fn new(status: StatusCode, detail: impl Into<String>, url: &str) -> Self {
        Self {
            error: ErrorContent {
                id: Uuid::new_v4(),
                status: status.as_u16(),
                detail: detail.into(),
                url: url.to_string(),
            },
        }
    }
}

/// A failure on its way out of the router. Logged with its generated id when
/// it is turned into a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
    url: String,
    cause: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>, url: &str) -> Self {
        Self {
            status,
            detail: detail.into(),
            url: url.to_string(),
            cause: None,
        }
    }

    pub fn from_hours(err: &HoursError, url: &str) -> Self {
        let (status, detail) = match (err.kind(), err) {
            (ErrorKind::NotFound, HoursError::NoHours) => {
                (StatusCode::NOT_FOUND, NO_HOURS_FOUND_MSG.to_string())
            }
            (ErrorKind::NotFound, _) => (StatusCode::NOT_FOUND, not_found_detail(url)),
            (ErrorKind::BadRequest, _) => (StatusCode::BAD_REQUEST, err.to_string()),
            (ErrorKind::Parse, _) => (StatusCode::INTERNAL_SERVER_ERROR, parse_detail(url)),
            (ErrorKind::Io | ErrorKind::Internal | ErrorKind::Config, _) => {
                (StatusCode::INTERNAL_SERVER_ERROR, internal_detail(url))
            }
        };

        Self {
            cause: Some(err.to_string()),
            ..Self::new(status, detail, url)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.status, self.detail, &self.url);
        let cause = self.cause.as_deref().unwrap_or("-");

        if self.status.is_server_error() {
            tracing::error!(
                error_id = %body.error.id,
                status = body.error.status,
                url = %body.error.url,
                "{}",
                cause
            );
        } else {
            tracing::warn!(
                error_id = %body.error.id,
                status = body.error.status,
                url = %body.error.url,
                "{}",
                cause
            );
        }

        (self.status, Json(body)).into_response()
    }
}

/// Path under which a stored set can be fetched, with the name
/// percent-encoded as a single path segment.
pub fn location_for(base_path: &str, name: &str) -> Result<String> {
    let mut url =
        Url::parse("http://localhost/").map_err(|e| HoursError::internal(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| HoursError::internal("location URL cannot carry a path"))?
        .clear()
        .extend(base_path.split('/').filter(|segment| !segment.is_empty()))
        .push("findByName")
        .push(name);
    Ok(url.path().to_string())
}

pub struct ApiState<S: Storage> {
    service: Arc<HoursService<S>>,
    base_path: Arc<str>,
}

impl<S: Storage> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            base_path: Arc::clone(&self.base_path),
        }
    }
}

/// Builds the hours router with permissive CORS (`Access-Control-Allow-Origin: *`).
pub fn hours_router<S: Storage + 'static>(service: HoursService<S>, base_path: &str) -> Router {
    let base = base_path.trim_end_matches('/');
    let collection = if base.is_empty() { "/" } else { base };

    let state = ApiState {
        service: Arc::new(service),
        base_path: Arc::from(base),
    };

    Router::new()
        .route(
            collection,
            get(list_all::<S>)
                .put(put_hours::<S>)
                .fallback(method_not_allowed),
        )
        .route(
            &format!("{}/findActive", base),
            get(list_active::<S>).fallback(method_not_allowed),
        )
        .route(
            &format!("{}/findByName/:name", base),
            get(get_by_name::<S>)
                .delete(delete_by_name::<S>)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

async fn list_all<S: Storage + 'static>(
    State(state): State<ApiState<S>>,
    uri: Uri,
) -> std::result::Result<Json<HoursNamesResponse>, ApiError> {
    let hours_names = state
        .service
        .list_all_names()
        .await
        .map_err(|e| ApiError::from_hours(&e, uri.path()))?;
    Ok(Json(HoursNamesResponse { hours_names }))
}

async fn list_active<S: Storage + 'static>(
    State(state): State<ApiState<S>>,
    uri: Uri,
) -> std::result::Result<Json<HoursNamesResponse>, ApiError> {
    let hours_names = state
        .service
        .list_active_names()
        .await
        .map_err(|e| ApiError::from_hours(&e, uri.path()))?;
    Ok(Json(HoursNamesResponse { hours_names }))
}

async fn get_by_name<S: Storage + 'static>(
    State(state): State<ApiState<S>>,
    uri: Uri,
    Path(name): Path<String>,
) -> std::result::Result<Json<HoursSet>, ApiError> {
    let set = state
        .service
        .get_by_name(&name)
        .await
        .map_err(|e| ApiError::from_hours(&e, uri.path()))?;
    Ok(Json(set))
}

async fn put_hours<S: Storage + 'static>(
    State(state): State<ApiState<S>>,
    uri: Uri,
    payload: std::result::Result<Json<NamedHoursSet>, JsonRejection>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let Json(named) = payload.map_err(|rejection| {
        let err = HoursError::BadRequest {
            message: rejection.body_text(),
        };
        ApiError::from_hours(&err, uri.path())
    })?;

    let to_api_error = |e: HoursError| ApiError::from_hours(&e, uri.path());
    let outcome = state
        .service
        .upsert(&named.name, &named.set)
        .await
        .map_err(to_api_error)?;
    let location = location_for(&state.base_path, &named.name).map_err(to_api_error)?;

    let status = match outcome {
        WriteOutcome::Created => StatusCode::CREATED,
        WriteOutcome::Replaced => StatusCode::OK,
    };
    Ok((status, [(header::LOCATION, location)]))
}

async fn delete_by_name<S: Storage + 'static>(
    State(state): State<ApiState<S>>,
    uri: Uri,
    Path(name): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    state
        .service
        .delete_by_name(&name)
        .await
        .map_err(|e| ApiError::from_hours(&e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, not_found_detail(uri.path()), uri.path())
}

async fn method_not_allowed(uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!(r#"The requested method is not allowed for "{}"."#, uri.path()),
        uri.path(),
    )
}
