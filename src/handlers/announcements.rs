use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::cache;
use crate::error::Result;
use crate::handlers::conferences::parse_key;
use crate::models::StringMessage;

/// Fallback when no featured-speaker entry exists yet for a conference.
const NO_FEATURED_SPEAKER: &str = "No featured speaker yet.";

#[utoipa::path(
    get,
    path = "/announcement",
    tag = "announcements",
    responses(
        (status = 200, description = "Cached sold-out-soon announcement, empty when unset", body = StringMessage)
    )
)]
pub async fn get_announcement(State(state): State<AppState>) -> Result<Json<StringMessage>> {
    let data = state
        .cache
        .get(cache::ANNOUNCEMENTS_KEY)
        .await
        .unwrap_or_default();

    Ok(Json(StringMessage { data }))
}

#[utoipa::path(
    get,
    path = "/conferences/{id}/featured-speaker",
    tag = "announcements",
    params(("id" = String, Path, description = "Conference key")),
    responses(
        (status = 200, description = "Featured-speaker announcement for the conference", body = StringMessage),
        (status = 400, description = "Invalid key format")
    )
)]
pub async fn get_featured_speaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StringMessage>> {
    let conference_id = parse_key(&id)?;

    let data = state
        .cache
        .get(&cache::featured_speaker_key(&conference_id.to_string()))
        .await
        .unwrap_or_else(|| NO_FEATURED_SPEAKER.to_string());

    Ok(Json(StringMessage { data }))
}
