use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// T-shirt size preference stored on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeeShirtSize {
    NotSpecified,
    XsM,
    XsW,
    SM,
    SW,
    MM,
    MW,
    LM,
    LW,
    XlM,
    XlW,
    XxlM,
    XxlW,
    XxxlM,
    XxxlW,
}

/// Profile row (one per authenticated user)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile response including the caller's registration and wishlist keys
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user_id: String,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    /// Conference keys the user is registered to attend
    pub conference_keys_to_attend: Vec<String>,
    /// Session keys on the user's wishlist
    pub session_keys_wishlist: Vec<String>,
}

impl ProfileResponse {
    pub fn from_parts(
        profile: Profile,
        conference_keys_to_attend: Vec<String>,
        session_keys_wishlist: Vec<String>,
    ) -> Self {
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name,
            main_email: profile.main_email,
            tee_shirt_size: profile.tee_shirt_size,
            conference_keys_to_attend,
            session_keys_wishlist,
        }
    }
}

/// Request model for updating the caller's profile
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub tee_shirt_size: Option<TeeShirtSize>,
}
