use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::handlers::conferences::parse_key;
use crate::handlers::profiles::get_or_create_profile;
use crate::models::BooleanMessage;
use crate::tasks::Task;

#[utoipa::path(
    post,
    path = "/conferences/{id}/registration",
    tag = "registration",
    params(("id" = String, Path, description = "Conference key")),
    responses(
        (status = 200, description = "Registered", body = BooleanMessage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Conference not found"),
        (status = 409, description = "Already registered or no seats available")
    )
)]
pub async fn register_for_conference(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<BooleanMessage>> {
    let conference_id = parse_key(&id)?;
    get_or_create_profile(&state.pool, &user).await?;

    // The seat decrement and the membership insert must apply together or
    // not at all.
    let mut tx = state.pool.begin().await?;

    let seats: Option<i64> =
        sqlx::query_scalar("SELECT seats_available FROM conferences WHERE id = ?")
            .bind(conference_id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
    let Some(seats) = seats else {
        return Err(ApiError::NotFound(format!(
            "No conference found with key: {}",
            conference_id
        )));
    };

    let already_registered: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM registrations WHERE user_id = ? AND conference_id = ?)",
    )
    .bind(&user.user_id)
    .bind(conference_id.to_string())
    .fetch_one(&mut *tx)
    .await?;

    if already_registered {
        return Err(ApiError::Conflict(
            "You have already registered for this conference".to_string(),
        ));
    }
    if seats <= 0 {
        return Err(ApiError::Conflict(
            "There are no seats available.".to_string(),
        ));
    }

    sqlx::query("INSERT INTO registrations (user_id, conference_id) VALUES (?, ?)")
        .bind(&user.user_id)
        .bind(conference_id.to_string())
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "UPDATE conferences \
         SET seats_available = seats_available - 1, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ?",
    )
    .bind(conference_id.to_string())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    // Seat count moved; the sold-out-soon announcement may have changed.
    state.tasks.dispatch(Task::RefreshAnnouncement);

    Ok(Json(BooleanMessage { data: true }))
}

#[utoipa::path(
    delete,
    path = "/conferences/{id}/registration",
    tag = "registration",
    params(("id" = String, Path, description = "Conference key")),
    responses(
        (status = 200, description = "Unregistered (data=false when not registered)", body = BooleanMessage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Conference not found")
    )
)]
pub async fn unregister_from_conference(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<BooleanMessage>> {
    let conference_id = parse_key(&id)?;
    get_or_create_profile(&state.pool, &user).await?;

    let mut tx = state.pool.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM conferences WHERE id = ?)")
        .bind(conference_id.to_string())
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(ApiError::NotFound(format!(
            "No conference found with key: {}",
            conference_id
        )));
    }

    let removed = sqlx::query("DELETE FROM registrations WHERE user_id = ? AND conference_id = ?")
        .bind(&user.user_id)
        .bind(conference_id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    // Not registered: a no-op result, not an error.
    if removed == 0 {
        return Ok(Json(BooleanMessage { data: false }));
    }

    sqlx::query(
        "UPDATE conferences \
         SET seats_available = seats_available + 1, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ?",
    )
    .bind(conference_id.to_string())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    state.tasks.dispatch(Task::RefreshAnnouncement);

    Ok(Json(BooleanMessage { data: true }))
}
