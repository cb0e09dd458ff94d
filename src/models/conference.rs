use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Conference response model (matches database schema plus the organizer's
/// display name, joined in from profiles)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Conference {
    #[sqlx(try_from = "String")]
    pub id: Uuid,
    pub organizer_user_id: String,
    pub organizer_display_name: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    #[sqlx(json)]
    pub topics: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Month of the start date (1-12), 0 when no start date is set.
    /// Stored denormalized so filter queries can range over it.
    pub month: i64,
    pub max_attendees: i64,
    pub seats_available: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a new conference
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateConference {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub topics: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i64>,
}

/// Request model for updating a conference; only provided fields change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConference {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub topics: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_attendees: Option<i64>,
}

/// One client-supplied filter triple for a conference query
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConferenceFilter {
    /// Field name: CITY, TOPIC, MONTH or MAX_ATTENDEES
    pub field: String,
    /// Operator name: EQ, GT, GTEQ, LT, LTEQ or NE
    pub operator: String,
    pub value: String,
}

/// Inbound query form: filters are ANDed in the order received
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConferenceQueryForm {
    #[serde(default)]
    pub filters: Vec<ConferenceFilter>,
}
