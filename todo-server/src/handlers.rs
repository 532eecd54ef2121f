//! HTTP handlers.
//!
//! Each resource handler runs the access guard first, then unpacks the path
//! id and body. Extractor rejections are taken as `Result`s so that a
//! malformed request still gets an envelope, and only after the token check.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use todo_proto::auth::{LoginRequest, TokenPair};
use todo_proto::envelope::Envelope;
use todo_proto::label::{Label, LabelDraft, LabelId};
use todo_proto::task::{Task, TaskDraft, TaskId};

use crate::error::ApiError;
use crate::server::AppState;

/// Confirmation payload of `POST /api/v1/task`.
pub const TASK_CREATED: &str = "Task created";
/// Confirmation payload of `DELETE /api/v1/task/{id}`.
pub const TASK_DELETED: &str = "Task deleted";
/// Confirmation payload of `POST /api/v1/label`.
pub const LABEL_CREATED: &str = "Label created";
/// Message for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Handler result: a success envelope or an [`ApiError`].
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

type Id = Result<Path<u32>, PathRejection>;
type Body<T> = Result<Json<T>, JsonRejection>;

#[allow(clippy::unnecessary_wraps)]
fn ok<T>(payload: T) -> ApiResult<T> {
    Ok(Json(Envelope::ok(payload)))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// Fallback for paths with no route.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND.to_string())
}

/// Fallback for a routed path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `POST /api/v1/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Body<LoginRequest>,
) -> ApiResult<TokenPair> {
    let Json(request) = body?;
    state
        .auth
        .login(&request)
        .map_or(Err(ApiError::InvalidCredentials), ok)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// `GET /api/v1/task`
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<Task>> {
    state.authorize(&headers)?;
    let tasks = state.tasks.list_all();
    tracing::debug!(count = tasks.len(), "listing tasks");
    ok(tasks)
}

/// `GET /api/v1/task/{id}`
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Id,
) -> ApiResult<Task> {
    state.authorize(&headers)?;
    let Path(id) = id?;
    ok(state.tasks.get_by_id(TaskId::new(id))?)
}

/// `POST /api/v1/task`
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body<TaskDraft>,
) -> ApiResult<&'static str> {
    state.authorize(&headers)?;
    let Json(draft) = body?;
    state.tasks.create(draft)?;
    ok(TASK_CREATED)
}

/// `PUT /api/v1/task/{id}`
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Id,
    body: Body<TaskDraft>,
) -> ApiResult<Task> {
    state.authorize(&headers)?;
    let Path(id) = id?;
    let Json(draft) = body?;
    ok(state.tasks.update_by_id(TaskId::new(id), draft)?)
}

/// `DELETE /api/v1/task/{id}`
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Id,
) -> ApiResult<&'static str> {
    state.authorize(&headers)?;
    let Path(id) = id?;
    state.tasks.delete_by_id(TaskId::new(id))?;
    ok(TASK_DELETED)
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// `GET /api/v1/label`
pub async fn list_labels(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<Label>> {
    state.authorize(&headers)?;
    ok(state.labels.list_all())
}

/// `GET /api/v1/label/{id}`
pub async fn get_label(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Id,
) -> ApiResult<Label> {
    state.authorize(&headers)?;
    let Path(id) = id?;
    ok(state.labels.get_by_id(LabelId::new(id))?)
}

/// `POST /api/v1/label`
pub async fn create_label(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body<LabelDraft>,
) -> ApiResult<&'static str> {
    state.authorize(&headers)?;
    let Json(draft) = body?;
    state.labels.create(draft)?;
    ok(LABEL_CREATED)
}

/// `PUT /api/v1/label/{id}`
pub async fn update_label(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Id,
    body: Body<LabelDraft>,
) -> ApiResult<Label> {
    state.authorize(&headers)?;
    let Path(id) = id?;
    let Json(draft) = body?;
    ok(state.labels.update_by_id(LabelId::new(id), draft)?)
}
