use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Session type enum matching the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Lecture,
    Keynote,
    Workshop,
    Forum,
    NotSpecified,
}

/// Session response model (nested under a conference)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Session {
    #[sqlx(try_from = "String")]
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub conference_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub speaker: String,
    pub type_of_session: SessionType,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    #[sqlx(json)]
    pub highlights: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a session under a conference
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSession {
    pub name: String,
    pub speaker: String,
    pub description: Option<String>,
    pub type_of_session: Option<SessionType>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub highlights: Option<Vec<String>>,
}

/// Optional filters for listing sessions across all conferences
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    pub speaker: Option<String>,
    #[serde(rename = "type")]
    pub type_of_session: Option<SessionType>,
}
