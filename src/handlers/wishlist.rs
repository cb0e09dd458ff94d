use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::handlers::conferences::parse_key;
use crate::handlers::profiles::{get_or_create_profile, profile_response};
use crate::handlers::sessions::load_session;
use crate::models::{BooleanMessage, ProfileResponse, Session};

#[utoipa::path(
    post,
    path = "/sessions/{id}/wishlist",
    tag = "wishlist",
    params(("id" = String, Path, description = "Session key")),
    responses(
        (status = 200, description = "Updated profile (idempotent add)", body = ProfileResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn add_session_to_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let session_id = parse_key(&id)?;
    load_session(&state.pool, session_id).await?;

    let profile = get_or_create_profile(&state.pool, &user).await?;

    // Adding twice leaves one entry; the composite key absorbs duplicates.
    sqlx::query("INSERT OR IGNORE INTO wishlist_entries (user_id, session_id) VALUES (?, ?)")
        .bind(&user.user_id)
        .bind(session_id.to_string())
        .execute(&state.pool)
        .await?;

    Ok(Json(profile_response(&state.pool, profile).await?))
}

#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "wishlist",
    responses(
        (status = 200, description = "Sessions on the caller's wishlist", body = Vec<Session>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_sessions_in_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Session>>> {
    let sessions = sqlx::query_as::<_, Session>(
        "SELECT s.id, s.conference_id, s.name, s.description, s.speaker, \
                s.type_of_session, s.session_date, s.start_time, s.highlights, \
                s.created_at, s.updated_at \
         FROM sessions s \
         JOIN wishlist_entries w ON w.session_id = s.id \
         WHERE w.user_id = ? \
         ORDER BY w.created_at, w.rowid",
    )
    .bind(&user.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(sessions))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}/wishlist",
    tag = "wishlist",
    params(("id" = String, Path, description = "Session key")),
    responses(
        (status = 200, description = "Removed (data=false when not on the wishlist)", body = BooleanMessage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn delete_session_in_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<BooleanMessage>> {
    let session_id = parse_key(&id)?;

    let removed = sqlx::query("DELETE FROM wishlist_entries WHERE user_id = ? AND session_id = ?")
        .bind(&user.user_id)
        .bind(session_id.to_string())
        .execute(&state.pool)
        .await?
        .rows_affected();

    Ok(Json(BooleanMessage { data: removed > 0 }))
}
