use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::handlers::conferences::{load_conference, parse_key};
use crate::models::{CreateSession, Session, SessionQuery, SessionType};
use crate::tasks::Task;

/// Shared SELECT for session rows.
pub(crate) const SESSION_SELECT: &str =
    "SELECT id, conference_id, name, description, speaker, type_of_session, \
            session_date, start_time, highlights, created_at, updated_at \
     FROM sessions";

/// Load a session by key.
pub(crate) async fn load_session(pool: &SqlitePool, id: Uuid) -> Result<Session> {
    let sql = format!("{} WHERE id = ?", SESSION_SELECT);
    sqlx::query_as::<_, Session>(&sql)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No session found with key: {}", id)))
}

#[utoipa::path(
    post,
    path = "/conferences/{id}/sessions",
    tag = "sessions",
    params(("id" = String, Path, description = "Conference key")),
    request_body = CreateSession,
    responses(
        (status = 201, description = "Session created", body = Session),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the organizer"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(new_session): Json<CreateSession>,
) -> Result<(StatusCode, Json<Session>)> {
    let conference_id = parse_key(&id)?;

    if new_session.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Session 'name' field required".to_string(),
        ));
    }
    if new_session.speaker.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Session 'speaker' field required".to_string(),
        ));
    }

    let conference = load_conference(&state.pool, conference_id).await?;
    if conference.organizer_user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "Only the organizer can add sessions to the conference.".to_string(),
        ));
    }

    let type_of_session = new_session
        .type_of_session
        .unwrap_or(SessionType::NotSpecified);
    let highlights = new_session.highlights.unwrap_or_default();

    let session_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO sessions \
         (id, conference_id, name, description, speaker, type_of_session, \
          session_date, start_time, highlights) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(session_id.to_string())
    .bind(conference_id.to_string())
    .bind(&new_session.name)
    .bind(&new_session.description)
    .bind(&new_session.speaker)
    .bind(type_of_session)
    .bind(new_session.session_date)
    .bind(new_session.start_time)
    .bind(sqlx::types::Json(&highlights))
    .execute(&state.pool)
    .await?;

    let session = load_session(&state.pool, session_id).await?;

    state.tasks.dispatch(Task::SetFeaturedSpeaker {
        conference_id,
        session_id,
    });

    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    get,
    path = "/conferences/{id}/sessions",
    tag = "sessions",
    params(("id" = String, Path, description = "Conference key")),
    responses(
        (status = 200, description = "Sessions of the conference", body = Vec<Session>),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn get_conference_sessions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Session>>> {
    let conference_id = parse_key(&id)?;
    load_conference(&state.pool, conference_id).await?;

    let sql = format!(
        "{} WHERE conference_id = ? ORDER BY created_at, rowid",
        SESSION_SELECT
    );
    let sessions = sqlx::query_as::<_, Session>(&sql)
        .bind(conference_id.to_string())
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    get,
    path = "/conferences/{id}/sessions/type/{type}",
    tag = "sessions",
    params(
        ("id" = String, Path, description = "Conference key"),
        ("type" = SessionType, Path, description = "Session type to match")
    ),
    responses(
        (status = 200, description = "Matching sessions", body = Vec<Session>),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn get_conference_sessions_by_type(
    State(state): State<AppState>,
    Path((id, type_of_session)): Path<(String, SessionType)>,
) -> Result<Json<Vec<Session>>> {
    let conference_id = parse_key(&id)?;
    load_conference(&state.pool, conference_id).await?;

    let sql = format!(
        "{} WHERE conference_id = ? AND type_of_session = ? ORDER BY created_at, rowid",
        SESSION_SELECT
    );
    let sessions = sqlx::query_as::<_, Session>(&sql)
        .bind(conference_id.to_string())
        .bind(type_of_session)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    get,
    path = "/sessions/speaker/{speaker}",
    tag = "sessions",
    params(("speaker" = String, Path, description = "Speaker name")),
    responses(
        (status = 200, description = "Sessions given by the speaker, across all conferences", body = Vec<Session>)
    )
)]
pub async fn get_sessions_by_speaker(
    State(state): State<AppState>,
    Path(speaker): Path<String>,
) -> Result<Json<Vec<Session>>> {
    let sql = format!("{} WHERE speaker = ? ORDER BY created_at, rowid", SESSION_SELECT);
    let sessions = sqlx::query_as::<_, Session>(&sql)
        .bind(speaker)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    get,
    path = "/sessions",
    tag = "sessions",
    params(SessionQuery),
    responses(
        (status = 200, description = "All sessions matching the optional filters", body = Vec<Session>)
    )
)]
pub async fn query_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<Session>>> {
    let mut conditions = Vec::new();
    if query.speaker.is_some() {
        conditions.push("speaker = ?");
    }
    if query.type_of_session.is_some() {
        conditions.push("type_of_session = ?");
    }

    let mut sql = SESSION_SELECT.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at, rowid");

    let mut q = sqlx::query_as::<_, Session>(&sql);
    if let Some(speaker) = &query.speaker {
        q = q.bind(speaker.clone());
    }
    if let Some(type_of_session) = query.type_of_session {
        q = q.bind(type_of_session);
    }

    let sessions = q.fetch_all(&state.pool).await?;
    Ok(Json(sessions))
}
