use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use chrono::{NaiveDateTime, Utc};
use http::header;
use tracing::{debug, info};

use crate::{
    AppState,
    auth::verify_token,
    classifier::{build_board, countdown, is_imminent, is_in_progress},
    error::ApiError,
    models::{ClassifyRequest, MeetingBoard, MeetingView},
    validation::validate_now,
    view_state::filter_meetings,
};

#[derive(Debug, serde::Deserialize)]
pub struct BoardQuery {
    pub now: Option<String>,
    pub q: Option<String>,
    pub token: Option<String>,
}

impl AppState {
    fn resolve_now(&self, raw: Option<&str>) -> Result<NaiveDateTime, ApiError> {
        match raw {
            Some(value) => validate_now(value),
            None => Ok(Utc::now().with_timezone(&self.tz).naive_local()),
        }
    }
}

#[utoipa::path(get, path = "/", tag = "meetings")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Meeting Board API",
        "endpoints": {
            "/meetings": "Meetings grouped into past, up next and later",
            "/meetings/{id}": "Countdown for a single meeting",
            "/meetings/classify": "Classify a supplied meeting list",
            "/meetings.ical": "Download meetings as iCal file"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "meetings")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "meetings")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/meetings",
    params(
        ("now" = Option<String>, Query, description = "Reference time, YYYY-MM-DDTHH:MM[:SS]; defaults to the current time"),
        ("q" = Option<String>, Query, description = "Search text matched against title, attendees and platform"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Classified meetings", body = MeetingBoard),
        (status = 400, description = "Invalid reference time"),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "meetings"
)]
pub async fn get_board(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<MeetingBoard>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;
    let now = state.resolve_now(query.now.as_deref())?;

    let meetings = filter_meetings(state.store.meetings(), query.q.as_deref().unwrap_or(""));
    let board = build_board(&meetings, now);
    debug!(
        %now,
        meetings = meetings.len(),
        rejected = board.rejected.len(),
        "built meeting board"
    );
    Ok(Json(board))
}

#[utoipa::path(
    get,
    path = "/meetings/{id}",
    params(
        ("id" = String, Path, description = "Meeting id"),
        ("now" = Option<String>, Query, description = "Reference time, YYYY-MM-DDTHH:MM[:SS]; defaults to the current time"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Meeting with countdown", body = MeetingView),
        (status = 400, description = "Invalid reference time or start time"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "Unknown meeting")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "meetings"
)]
pub async fn get_meeting(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(id): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<MeetingView>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;
    let now = state.resolve_now(query.now.as_deref())?;

    let meeting = state
        .store
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("No meeting with id {id}")))?;

    Ok(Json(MeetingView {
        countdown: countdown(meeting, now)?,
        imminent: is_imminent(meeting, now)?,
        in_progress: is_in_progress(meeting, now)?,
        meeting: meeting.clone(),
    }))
}

#[utoipa::path(
    post,
    path = "/meetings/classify",
    params(
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classified meetings", body = MeetingBoard),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "meetings"
)]
pub async fn classify_meetings(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<BoardQuery>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<MeetingBoard>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let board = build_board(&request.meetings, request.now);
    if !board.rejected.is_empty() {
        info!(rejected = board.rejected.len(), "meetings with unreadable start times");
    }
    Ok(Json(board))
}

#[utoipa::path(
    get,
    path = "/meetings.ical",
    params(
        ("q" = Option<String>, Query, description = "Search text matched against title, attendees and platform"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No meetings found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "meetings"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<BoardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let meetings = filter_meetings(state.store.meetings(), query.q.as_deref().unwrap_or(""));
    let body = state.exporter.generate(&meetings);
    if body.is_empty() {
        return Err(ApiError::NotFound("No meetings found".into()));
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/calendar"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=meetings.ics",
            ),
        ],
        body,
    ))
}
