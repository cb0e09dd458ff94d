use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::models::{Profile, ProfileResponse, UpdateProfile};

/// Fetch the caller's profile, creating it on first use.
///
/// INSERT OR IGNORE handles two requests racing on first contact; both end
/// up reading the same row.
pub(crate) async fn get_or_create_profile(
    pool: &SqlitePool,
    user: &CurrentUser,
) -> Result<Profile> {
    sqlx::query(
        "INSERT OR IGNORE INTO profiles (user_id, display_name, main_email) VALUES (?, ?, ?)",
    )
    .bind(&user.user_id)
    .bind(user.default_display_name())
    .bind(&user.email)
    .execute(pool)
    .await?;

    let profile = sqlx::query_as::<_, Profile>(
        "SELECT user_id, display_name, main_email, tee_shirt_size, created_at, updated_at \
         FROM profiles WHERE user_id = ?",
    )
    .bind(&user.user_id)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Assemble the profile response with the caller's registration and wishlist
/// keys.
pub(crate) async fn profile_response(
    pool: &SqlitePool,
    profile: Profile,
) -> Result<ProfileResponse> {
    let conference_keys: Vec<(String,)> = sqlx::query_as(
        "SELECT conference_id FROM registrations WHERE user_id = ? ORDER BY created_at, rowid",
    )
    .bind(&profile.user_id)
    .fetch_all(pool)
    .await?;

    let session_keys: Vec<(String,)> = sqlx::query_as(
        "SELECT session_id FROM wishlist_entries WHERE user_id = ? ORDER BY created_at, rowid",
    )
    .bind(&profile.user_id)
    .fetch_all(pool)
    .await?;

    Ok(ProfileResponse::from_parts(
        profile,
        conference_keys.into_iter().map(|(k,)| k).collect(),
        session_keys.into_iter().map(|(k,)| k).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "profiles",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>> {
    let profile = get_or_create_profile(&state.pool, &user).await?;
    Ok(Json(profile_response(&state.pool, profile).await?))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "profiles",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Empty display name"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn save_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(update): Json<UpdateProfile>,
) -> Result<Json<ProfileResponse>> {
    let existing = get_or_create_profile(&state.pool, &user).await?;

    if let Some(name) = &update.display_name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Profile 'display_name' must not be empty".to_string(),
            ));
        }
    }

    let profile = sqlx::query_as::<_, Profile>(
        "UPDATE profiles \
         SET display_name = ?, tee_shirt_size = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE user_id = ? \
         RETURNING user_id, display_name, main_email, tee_shirt_size, created_at, updated_at",
    )
    .bind(update.display_name.unwrap_or(existing.display_name))
    .bind(update.tee_shirt_size.unwrap_or(existing.tee_shirt_size))
    .bind(&user.user_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(profile_response(&state.pool, profile).await?))
}
