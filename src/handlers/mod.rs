pub mod announcements;
pub mod conferences;
pub mod profiles;
pub mod registration;
pub mod sessions;
pub mod wishlist;

pub use announcements::*;
pub use conferences::*;
pub use profiles::*;
pub use registration::*;
pub use sessions::*;
pub use wishlist::*;
