use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::handlers::profiles::get_or_create_profile;
use crate::models::{Conference, ConferenceQueryForm, CreateConference, UpdateConference};
use crate::tasks::Task;
use crate::utils::filters::{build_conference_query, FilterValue};

/// Shared SELECT: conference columns plus the organizer's display name.
pub(crate) const CONFERENCE_SELECT: &str =
    "SELECT c.id, c.organizer_user_id, p.display_name AS organizer_display_name, \
            c.name, c.description, c.city, c.topics, c.start_date, c.end_date, \
            c.month, c.max_attendees, c.seats_available, c.created_at, c.updated_at \
     FROM conferences c \
     LEFT JOIN profiles p ON p.user_id = c.organizer_user_id";

/// Parse a websafe entity key (canonical UUID string).
pub(crate) fn parse_key(key: &str) -> Result<Uuid> {
    Uuid::parse_str(key).map_err(|_| ApiError::BadRequest(format!("Invalid key: {}", key)))
}

/// Load a conference by key, including the organizer's display name.
pub(crate) async fn load_conference(pool: &SqlitePool, id: Uuid) -> Result<Conference> {
    let sql = format!("{} WHERE c.id = ?", CONFERENCE_SELECT);
    sqlx::query_as::<_, Conference>(&sql)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No conference found with key: {}", id)))
}

#[utoipa::path(
    post,
    path = "/conferences",
    tag = "conferences",
    request_body = CreateConference,
    responses(
        (status = 201, description = "Conference created", body = Conference),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_conference(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(new_conference): Json<CreateConference>,
) -> Result<(StatusCode, Json<Conference>)> {
    if new_conference.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Conference 'name' field required".to_string(),
        ));
    }

    let max_attendees = new_conference.max_attendees.unwrap_or(0);
    if max_attendees < 0 {
        return Err(ApiError::BadRequest(
            "Conference 'max_attendees' must not be negative".to_string(),
        ));
    }

    // The organizer profile must exist before the conference can reference it.
    get_or_create_profile(&state.pool, &user).await?;

    let city = new_conference
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "Default City".to_string());
    let topics = new_conference
        .topics
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| vec!["Default".to_string(), "Topic".to_string()]);

    // Month is derived from the start date so queries can filter on it.
    let month = new_conference
        .start_date
        .map(|d| d.month() as i64)
        .unwrap_or(0);

    // All seats start available.
    let seats_available = max_attendees;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO conferences \
         (id, organizer_user_id, name, description, city, topics, \
          start_date, end_date, month, max_attendees, seats_available) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(&user.user_id)
    .bind(&new_conference.name)
    .bind(&new_conference.description)
    .bind(&city)
    .bind(sqlx::types::Json(&topics))
    .bind(new_conference.start_date)
    .bind(new_conference.end_date)
    .bind(month)
    .bind(max_attendees)
    .bind(seats_available)
    .execute(&state.pool)
    .await?;

    let conference = load_conference(&state.pool, id).await?;

    state.tasks.dispatch(Task::SendConfirmationEmail {
        email: user.email,
        conference_name: conference.name.clone(),
    });

    Ok((StatusCode::CREATED, Json(conference)))
}

#[utoipa::path(
    put,
    path = "/conferences/{id}",
    tag = "conferences",
    params(("id" = String, Path, description = "Conference key")),
    request_body = UpdateConference,
    responses(
        (status = 200, description = "Conference updated", body = Conference),
        (status = 400, description = "Invalid key or field"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the organizer"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn update_conference(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateConference>,
) -> Result<Json<Conference>> {
    let id = parse_key(&id)?;
    let existing = load_conference(&state.pool, id).await?;

    if existing.organizer_user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "Only the owner can update the conference.".to_string(),
        ));
    }

    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Conference 'name' field required".to_string(),
            ));
        }
    }

    let max_attendees = update.max_attendees.unwrap_or(existing.max_attendees);
    if max_attendees < 0 {
        return Err(ApiError::BadRequest(
            "Conference 'max_attendees' must not be negative".to_string(),
        ));
    }

    // A new start date re-derives the stored month.
    let start_date = update.start_date.or(existing.start_date);
    let month = match update.start_date {
        Some(d) => d.month() as i64,
        None => existing.month,
    };

    sqlx::query(
        "UPDATE conferences \
         SET name = ?, description = ?, city = ?, topics = ?, \
             start_date = ?, end_date = ?, month = ?, max_attendees = ?, \
             updated_at = CURRENT_TIMESTAMP \
         WHERE id = ?",
    )
    .bind(update.name.unwrap_or(existing.name))
    .bind(update.description.or(existing.description))
    .bind(update.city.unwrap_or(existing.city))
    .bind(sqlx::types::Json(update.topics.unwrap_or(existing.topics)))
    .bind(start_date)
    .bind(update.end_date.or(existing.end_date))
    .bind(month)
    .bind(max_attendees)
    .bind(id.to_string())
    .execute(&state.pool)
    .await?;

    Ok(Json(load_conference(&state.pool, id).await?))
}

#[utoipa::path(
    get,
    path = "/conferences/{id}",
    tag = "conferences",
    params(("id" = String, Path, description = "Conference key")),
    responses(
        (status = 200, description = "Conference found", body = Conference),
        (status = 400, description = "Invalid key format"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn get_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conference>> {
    let id = parse_key(&id)?;
    Ok(Json(load_conference(&state.pool, id).await?))
}

#[utoipa::path(
    get,
    path = "/conferences/created",
    tag = "conferences",
    responses(
        (status = 200, description = "Conferences organized by the caller", body = Vec<Conference>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_conferences_created(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Conference>>> {
    let sql = format!(
        "{} WHERE c.organizer_user_id = ? ORDER BY c.name",
        CONFERENCE_SELECT
    );
    let conferences = sqlx::query_as::<_, Conference>(&sql)
        .bind(&user.user_id)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(conferences))
}

#[utoipa::path(
    get,
    path = "/conferences/attending",
    tag = "conferences",
    responses(
        (status = 200, description = "Conferences the caller is registered for", body = Vec<Conference>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_conferences_to_attend(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Conference>>> {
    let sql = format!(
        "{} JOIN registrations r ON r.conference_id = c.id \
         WHERE r.user_id = ? ORDER BY r.created_at, r.rowid",
        CONFERENCE_SELECT
    );
    let conferences = sqlx::query_as::<_, Conference>(&sql)
        .bind(&user.user_id)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(conferences))
}

#[utoipa::path(
    post,
    path = "/conferences/query",
    tag = "conferences",
    request_body = ConferenceQueryForm,
    responses(
        (status = 200, description = "Matching conferences", body = Vec<Conference>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn query_conferences(
    State(state): State<AppState>,
    Json(form): Json<ConferenceQueryForm>,
) -> Result<Json<Vec<Conference>>> {
    let query = build_conference_query(&form.filters)?;

    let sql = format!(
        "{} {} {}",
        CONFERENCE_SELECT, query.where_sql, query.order_sql
    );

    let mut q = sqlx::query_as::<_, Conference>(&sql);
    for value in &query.binds {
        q = match value {
            FilterValue::Text(s) => q.bind(s.clone()),
            FilterValue::Int(n) => q.bind(*n),
        };
    }

    let conferences = q.fetch_all(&state.pool).await?;
    Ok(Json(conferences))
}
