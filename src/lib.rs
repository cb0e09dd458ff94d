pub mod app;
pub mod auth;
pub mod cache;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod tasks;
pub mod utils;

// Re-export commonly used items (avoiding ambiguous re-exports)
pub use app::{router, AppState};
pub use error::{ApiError, Result};
pub use models::{
    BooleanMessage, Conference, ConferenceFilter, ConferenceQueryForm, CreateConference,
    CreateSession, Profile, ProfileResponse, Session, SessionType, StringMessage, TeeShirtSize,
    UpdateConference, UpdateProfile,
};
pub use utils::filters::{build_conference_query, format_filters};
