use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};

use confhub::app::{router, AppState};
use confhub::db;

/// Create a test server backed by a fresh in-memory database.
///
/// Every test gets its own database and cache, so tests are independent and
/// need no shared fixtures.
pub async fn setup() -> TestServer {
    let pool = db::init_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");

    TestServer::new(router(AppState::new(pool))).unwrap()
}

/// Attach gateway identity headers to a request.
pub fn as_user(req: TestRequest, user_id: &str, email: &str) -> TestRequest {
    req.add_header(
        HeaderName::from_static("x-auth-user"),
        HeaderValue::from_str(user_id).unwrap(),
    )
    .add_header(
        HeaderName::from_static("x-auth-email"),
        HeaderValue::from_str(email).unwrap(),
    )
}
