pub mod conference;
pub mod profile;
pub mod session;

pub use conference::*;
pub use profile::*;
pub use session::*;

use serde::Serialize;
use utoipa::ToSchema;

/// Outbound single-boolean payload (registration and wishlist results)
#[derive(Debug, Serialize, ToSchema)]
pub struct BooleanMessage {
    pub data: bool,
}

/// Outbound single-string payload (announcements, featured speaker)
#[derive(Debug, Serialize, ToSchema)]
pub struct StringMessage {
    pub data: String,
}
