mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{as_user, setup};
use serde_json::{json, Value};
use std::time::Duration;

const ALICE: (&str, &str) = ("user-alice", "alice@example.com");
const BOB: (&str, &str) = ("user-bob", "bob@example.com");
const CAROL: (&str, &str) = ("user-carol", "carol@example.com");
const DAVE: (&str, &str) = ("user-dave", "dave@example.com");

/// Create a conference as `user` and return the response body.
async fn create_conference(server: &TestServer, user: (&str, &str), body: Value) -> Value {
    let response = as_user(server.post("/conferences"), user.0, user.1)
        .json(&body)
        .await;
    if response.status_code() != StatusCode::CREATED {
        let text = response.text();
        panic!(
            "Failed to create conference: {} - {}",
            response.status_code(),
            text
        );
    }
    response.json()
}

/// Create a session as `user` under a conference and return the response body.
async fn create_session(
    server: &TestServer,
    user: (&str, &str),
    conference_id: &str,
    body: Value,
) -> Value {
    let response = as_user(
        server.post(&format!("/conferences/{}/sessions", conference_id)),
        user.0,
        user.1,
    )
    .json(&body)
    .await;
    if response.status_code() != StatusCode::CREATED {
        let text = response.text();
        panic!(
            "Failed to create session: {} - {}",
            response.status_code(),
            text
        );
    }
    response.json()
}

async fn seats_available(server: &TestServer, conference_id: &str) -> i64 {
    let response = server
        .get(&format!("/conferences/{}", conference_id))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["seats_available"]
        .as_i64()
        .expect("seats_available should be a number")
}

async fn featured_speaker(server: &TestServer, conference_id: &str) -> String {
    let response = server
        .get(&format!("/conferences/{}/featured-speaker", conference_id))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["data"]
        .as_str()
        .expect("data should be a string")
        .to_string()
}

/// Featured-speaker updates run on the background worker; poll until the
/// expected entry appears.
async fn wait_for_featured(server: &TestServer, conference_id: &str, expected: &str) {
    for _ in 0..50 {
        if featured_speaker(server, conference_id).await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "Featured speaker for {} never became '{}' (last: '{}')",
        conference_id,
        expected,
        featured_speaker(server, conference_id).await
    );
}

async fn wait_for_announcement(server: &TestServer, needle: &str) {
    for _ in 0..50 {
        let response = server.get("/announcement").await;
        response.assert_status_ok();
        let data = response.json::<Value>()["data"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        if data.contains(needle) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Announcement never mentioned '{}'", needle);
}

// ============================================================================
// Conference API Tests
// ============================================================================

#[tokio::test]
async fn test_create_conference_applies_defaults() {
    let server = setup().await;

    // No max_attendees, city or topics supplied.
    let created = create_conference(&server, ALICE, json!({ "name": "MinimalConf" })).await;

    assert_eq!(created["name"], "MinimalConf");
    assert_eq!(created["max_attendees"], 0);
    assert_eq!(created["seats_available"], 0);
    assert_eq!(created["city"], "Default City");
    assert_eq!(created["topics"], json!(["Default", "Topic"]));
    assert_eq!(created["month"], 0);
    assert_eq!(created["organizer_user_id"], ALICE.0);
    assert_eq!(created["organizer_display_name"], "alice");
}

#[tokio::test]
async fn test_create_conference_derives_month_and_seats() {
    let server = setup().await;

    let created = create_conference(
        &server,
        ALICE,
        json!({
            "name": "DevSummit",
            "city": "London",
            "topics": ["Rust", "Databases"],
            "start_date": "2026-06-15",
            "end_date": "2026-06-17",
            "max_attendees": 100
        }),
    )
    .await;

    assert_eq!(created["month"], 6);
    assert_eq!(created["max_attendees"], 100);
    assert_eq!(created["seats_available"], 100);
    assert_eq!(created["topics"], json!(["Rust", "Databases"]));
}

#[tokio::test]
async fn test_create_conference_requires_name_and_auth() {
    let server = setup().await;

    // Blank name is a client error.
    let response = as_user(server.post("/conferences"), ALICE.0, ALICE.1)
        .json(&json!({ "name": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // No identity headers at all.
    let response = server
        .post("/conferences")
        .json(&json!({ "name": "NoAuthConf" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_conference_not_found_and_bad_key() {
    let server = setup().await;

    let fake_id = uuid::Uuid::new_v4();
    let response = server.get(&format!("/conferences/{}", fake_id)).await;
    response.assert_status_not_found();

    let response = server.get("/conferences/not-a-key").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_conference() {
    let server = setup().await;

    let created = create_conference(
        &server,
        ALICE,
        json!({ "name": "EditMe", "city": "Oslo", "start_date": "2026-03-01" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["month"], 3);

    // Only the organizer may update.
    let response = as_user(
        server.put(&format!("/conferences/{}", id)),
        BOB.0,
        BOB.1,
    )
    .json(&json!({ "city": "Bergen" }))
    .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Partial update: untouched fields survive, new start date re-derives month.
    let response = as_user(
        server.put(&format!("/conferences/{}", id)),
        ALICE.0,
        ALICE.1,
    )
    .json(&json!({ "city": "Bergen", "start_date": "2026-09-10" }))
    .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["city"], "Bergen");
    assert_eq!(updated["name"], "EditMe");
    assert_eq!(updated["month"], 9);
}

#[tokio::test]
async fn test_get_conferences_created() {
    let server = setup().await;

    create_conference(&server, ALICE, json!({ "name": "AliceConf B" })).await;
    create_conference(&server, ALICE, json!({ "name": "AliceConf A" })).await;
    create_conference(&server, BOB, json!({ "name": "BobConf" })).await;

    let response = as_user(server.get("/conferences/created"), ALICE.0, ALICE.1).await;
    response.assert_status_ok();
    let conferences: Vec<Value> = response.json();

    assert_eq!(conferences.len(), 2);
    assert_eq!(conferences[0]["name"], "AliceConf A");
    assert_eq!(conferences[1]["name"], "AliceConf B");
}

// ============================================================================
// Conference Query Tests
// ============================================================================

async fn seed_query_conferences(server: &TestServer) {
    create_conference(
        server,
        ALICE,
        json!({
            "name": "GopherCon",
            "city": "London",
            "start_date": "2026-06-01",
            "max_attendees": 100
        }),
    )
    .await;
    create_conference(
        server,
        ALICE,
        json!({
            "name": "RustConf",
            "city": "Paris",
            "start_date": "2026-07-01",
            "max_attendees": 50
        }),
    )
    .await;
    create_conference(
        server,
        BOB,
        json!({
            "name": "MedTech",
            "city": "London",
            "topics": ["Medical Innovations"],
            "start_date": "2026-06-20",
            "max_attendees": 20
        }),
    )
    .await;
}

#[tokio::test]
async fn test_query_conferences_equality_filter() {
    let server = setup().await;
    seed_query_conferences(&server).await;

    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "CITY", "operator": "EQ", "value": "London" }]
        }))
        .await;
    response.assert_status_ok();
    let conferences: Vec<Value> = response.json();

    // Ordered by name when no inequality filter is present.
    assert_eq!(conferences.len(), 2);
    assert_eq!(conferences[0]["name"], "GopherCon");
    assert_eq!(conferences[1]["name"], "MedTech");
}

#[tokio::test]
async fn test_query_conferences_inequality_orders_by_field_then_name() {
    let server = setup().await;
    seed_query_conferences(&server).await;

    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "MONTH", "operator": "GT", "value": "5" }]
        }))
        .await;
    response.assert_status_ok();
    let conferences: Vec<Value> = response.json();

    // Month 6 conferences (GopherCon, MedTech by name) before month 7.
    assert_eq!(conferences.len(), 3);
    assert_eq!(conferences[0]["name"], "GopherCon");
    assert_eq!(conferences[1]["name"], "MedTech");
    assert_eq!(conferences[2]["name"], "RustConf");
}

#[tokio::test]
async fn test_query_conferences_topic_membership() {
    let server = setup().await;
    seed_query_conferences(&server).await;

    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "TOPIC", "operator": "EQ", "value": "Medical Innovations" }]
        }))
        .await;
    response.assert_status_ok();
    let conferences: Vec<Value> = response.json();

    assert_eq!(conferences.len(), 1);
    assert_eq!(conferences[0]["name"], "MedTech");
}

#[tokio::test]
async fn test_query_conferences_rejects_two_inequality_fields() {
    let server = setup().await;
    seed_query_conferences(&server).await;

    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [
                { "field": "MONTH", "operator": "GT", "value": "5" },
                { "field": "MAX_ATTENDEES", "operator": "LT", "value": "60" }
            ]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_conferences_rejects_invalid_filters() {
    let server = setup().await;

    // Unknown field.
    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "VENUE", "operator": "EQ", "value": "x" }]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Unknown operator.
    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "CITY", "operator": "LIKE", "value": "x" }]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Non-numeric value for a numeric field.
    let response = server
        .post("/conferences/query")
        .json(&json!({
            "filters": [{ "field": "MONTH", "operator": "EQ", "value": "June" }]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_registration_seat_accounting() {
    let server = setup().await;

    let created =
        create_conference(&server, ALICE, json!({ "name": "TinyConf", "max_attendees": 2 }))
            .await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(seats_available(&server, id).await, 2);

    // Bob registers; one seat gone.
    let response = as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], true);
    assert_eq!(seats_available(&server, id).await, 1);

    // Registering twice is a conflict and does not touch the count.
    let response = as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(seats_available(&server, id).await, 1);

    // Carol takes the last seat; Dave finds the conference full.
    let response = as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        CAROL.0,
        CAROL.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(seats_available(&server, id).await, 0);

    let response = as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        DAVE.0,
        DAVE.1,
    )
    .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(seats_available(&server, id).await, 0);

    // Cancellation frees exactly one seat.
    let response = as_user(
        server.delete(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], true);
    assert_eq!(seats_available(&server, id).await, 1);

    // Cancelling again is a no-op false, not an error.
    let response = as_user(
        server.delete(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], false);
    assert_eq!(seats_available(&server, id).await, 1);
}

#[tokio::test]
async fn test_registration_unknown_conference() {
    let server = setup().await;

    let fake_id = uuid::Uuid::new_v4();
    let response = as_user(
        server.post(&format!("/conferences/{}/registration", fake_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_get_conferences_to_attend() {
    let server = setup().await;

    let first =
        create_conference(&server, ALICE, json!({ "name": "First", "max_attendees": 10 })).await;
    let second =
        create_conference(&server, ALICE, json!({ "name": "Second", "max_attendees": 10 })).await;
    create_conference(&server, ALICE, json!({ "name": "Skipped", "max_attendees": 10 })).await;

    for conf in [&first, &second] {
        let id = conf["id"].as_str().unwrap();
        as_user(
            server.post(&format!("/conferences/{}/registration", id)),
            BOB.0,
            BOB.1,
        )
        .await
        .assert_status_ok();
    }

    let response = as_user(server.get("/conferences/attending"), BOB.0, BOB.1).await;
    response.assert_status_ok();
    let attending: Vec<Value> = response.json();

    // Listed in registration order.
    assert_eq!(attending.len(), 2);
    assert_eq!(attending[0]["name"], "First");
    assert_eq!(attending[1]["name"], "Second");
}

// ============================================================================
// Announcement Tests
// ============================================================================

#[tokio::test]
async fn test_announcement_tracks_nearly_sold_out() {
    let server = setup().await;

    // Nothing cached yet.
    let response = server.get("/announcement").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], "");

    let created = create_conference(
        &server,
        ALICE,
        json!({ "name": "AlmostFull", "max_attendees": 3 }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    // One registration leaves 2 seats, inside the nearly-sold-out window.
    as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await
    .assert_status_ok();

    wait_for_announcement(&server, "AlmostFull").await;
    let response = server.get("/announcement").await;
    let data = response.json::<Value>()["data"].as_str().unwrap().to_string();
    assert!(data.starts_with("Last chance to attend!"), "got: {}", data);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_created_lazily_and_updated() {
    let server = setup().await;

    // First fetch creates the profile from the gateway identity.
    let response = as_user(server.get("/profile"), ALICE.0, ALICE.1).await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["user_id"], ALICE.0);
    assert_eq!(profile["display_name"], "alice");
    assert_eq!(profile["main_email"], ALICE.1);
    assert_eq!(profile["tee_shirt_size"], "NOT_SPECIFIED");
    assert_eq!(profile["conference_keys_to_attend"], json!([]));
    assert_eq!(profile["session_keys_wishlist"], json!([]));

    // Update both modifiable fields.
    let response = as_user(server.post("/profile"), ALICE.0, ALICE.1)
        .json(&json!({ "display_name": "Alice L.", "tee_shirt_size": "XL_M" }))
        .await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["display_name"], "Alice L.");
    assert_eq!(profile["tee_shirt_size"], "XL_M");

    // Unauthenticated profile access is rejected.
    let response = server.get("/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_registration_keys() {
    let server = setup().await;

    let created =
        create_conference(&server, ALICE, json!({ "name": "Tracked", "max_attendees": 5 })).await;
    let id = created["id"].as_str().unwrap();

    as_user(
        server.post(&format!("/conferences/{}/registration", id)),
        BOB.0,
        BOB.1,
    )
    .await
    .assert_status_ok();

    let response = as_user(server.get("/profile"), BOB.0, BOB.1).await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["conference_keys_to_attend"], json!([id]));
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_create_session_validation() {
    let server = setup().await;

    let created = create_conference(&server, ALICE, json!({ "name": "SessConf" })).await;
    let id = created["id"].as_str().unwrap();

    // Only the organizer may add sessions.
    let response = as_user(
        server.post(&format!("/conferences/{}/sessions", id)),
        BOB.0,
        BOB.1,
    )
    .json(&json!({ "name": "Talk", "speaker": "Ada" }))
    .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Speaker is required.
    let response = as_user(
        server.post(&format!("/conferences/{}/sessions", id)),
        ALICE.0,
        ALICE.1,
    )
    .json(&json!({ "name": "Talk", "speaker": "" }))
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Unknown conference.
    let fake_id = uuid::Uuid::new_v4();
    let response = as_user(
        server.post(&format!("/conferences/{}/sessions", fake_id)),
        ALICE.0,
        ALICE.1,
    )
    .json(&json!({ "name": "Talk", "speaker": "Ada" }))
    .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_session_listing_and_filters() {
    let server = setup().await;

    let created = create_conference(&server, ALICE, json!({ "name": "BigConf" })).await;
    let id = created["id"].as_str().unwrap();

    create_session(
        &server,
        ALICE,
        id,
        json!({
            "name": "Intro Workshop",
            "speaker": "Ada",
            "type_of_session": "WORKSHOP",
            "session_date": "2026-09-01",
            "start_time": "09:00:00",
            "highlights": ["hands-on"]
        }),
    )
    .await;
    create_session(
        &server,
        ALICE,
        id,
        json!({ "name": "Keynote", "speaker": "Grace", "type_of_session": "KEYNOTE" }),
    )
    .await;
    create_session(
        &server,
        ALICE,
        id,
        json!({ "name": "Closing Lecture", "speaker": "Ada", "type_of_session": "LECTURE" }),
    )
    .await;

    // All sessions of the conference.
    let response = server.get(&format!("/conferences/{}/sessions", id)).await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["name"], "Intro Workshop");
    assert_eq!(sessions[0]["highlights"], json!(["hands-on"]));
    assert_eq!(sessions[0]["type_of_session"], "WORKSHOP");

    // By type within the conference.
    let response = server
        .get(&format!("/conferences/{}/sessions/type/KEYNOTE", id))
        .await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["speaker"], "Grace");

    // By speaker across conferences.
    let response = server.get("/sessions/speaker/Ada").await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 2);

    // Cross-conference query with both optional filters.
    let response = server.get("/sessions?speaker=Ada&type=LECTURE").await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["name"], "Closing Lecture");

    // No filters returns everything.
    let response = server.get("/sessions").await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 3);
}

#[tokio::test]
async fn test_sessions_by_type_unknown_conference() {
    let server = setup().await;

    let fake_id = uuid::Uuid::new_v4();
    let response = server
        .get(&format!("/conferences/{}/sessions/type/WORKSHOP", fake_id))
        .await;
    response.assert_status_not_found();
}

// ============================================================================
// Featured Speaker Tests
// ============================================================================

#[tokio::test]
async fn test_featured_speaker_ranking() {
    let server = setup().await;

    let created = create_conference(&server, ALICE, json!({ "name": "SpeakerConf" })).await;
    let id = created["id"].as_str().unwrap();

    // Before any session exists.
    assert_eq!(
        featured_speaker(&server, id).await,
        "No featured speaker yet."
    );

    // First session seeds the cache with its speaker.
    create_session(&server, ALICE, id, json!({ "name": "A", "speaker": "X" })).await;
    wait_for_featured(&server, id, "X|A").await;

    // Second session by the same speaker appends its name.
    create_session(&server, ALICE, id, json!({ "name": "B", "speaker": "X" })).await;
    wait_for_featured(&server, id, "X|A,B").await;

    // A different speaker with fewer sessions does not displace the
    // incumbent. Run a sentinel job through the worker to know the update
    // for C has been processed before asserting nothing changed.
    create_session(&server, ALICE, id, json!({ "name": "C", "speaker": "Y" })).await;

    let sentinel = create_conference(&server, ALICE, json!({ "name": "Sentinel" })).await;
    let sentinel_id = sentinel["id"].as_str().unwrap();
    create_session(
        &server,
        ALICE,
        sentinel_id,
        json!({ "name": "S", "speaker": "Z" }),
    )
    .await;
    wait_for_featured(&server, sentinel_id, "Z|S").await;

    assert_eq!(featured_speaker(&server, id).await, "X|A,B");
}

#[tokio::test]
async fn test_featured_speaker_overtaken() {
    let server = setup().await;

    let created = create_conference(&server, ALICE, json!({ "name": "Takeover" })).await;
    let id = created["id"].as_str().unwrap();

    create_session(&server, ALICE, id, json!({ "name": "A", "speaker": "X" })).await;
    wait_for_featured(&server, id, "X|A").await;

    // Y pulls level: a tie never displaces the incumbent.
    create_session(&server, ALICE, id, json!({ "name": "B", "speaker": "Y" })).await;
    // Y pulls ahead with strictly more sessions and takes over.
    create_session(&server, ALICE, id, json!({ "name": "C", "speaker": "Y" })).await;
    wait_for_featured(&server, id, "Y|B,C").await;
}

// ============================================================================
// Wishlist Tests
// ============================================================================

#[tokio::test]
async fn test_wishlist_add_get_delete() {
    let server = setup().await;

    let created = create_conference(&server, ALICE, json!({ "name": "WishConf" })).await;
    let conf_id = created["id"].as_str().unwrap();
    let session = create_session(
        &server,
        ALICE,
        conf_id,
        json!({ "name": "Wanted", "speaker": "Ada" }),
    )
    .await;
    let session_id = session["id"].as_str().unwrap();

    // Add to wishlist; response is the updated profile.
    let response = as_user(
        server.post(&format!("/sessions/{}/wishlist", session_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["session_keys_wishlist"], json!([session_id]));

    // Adding the same session again leaves a single entry.
    let response = as_user(
        server.post(&format!("/sessions/{}/wishlist", session_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    let profile: Value = response.json();
    assert_eq!(profile["session_keys_wishlist"], json!([session_id]));

    // Wishlist sessions resolve to full session records.
    let response = as_user(server.get("/wishlist"), BOB.0, BOB.1).await;
    response.assert_status_ok();
    let sessions: Vec<Value> = response.json();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["name"], "Wanted");

    // Delete removes it; deleting again reports false.
    let response = as_user(
        server.delete(&format!("/sessions/{}/wishlist", session_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], true);

    let response = as_user(
        server.delete(&format!("/sessions/{}/wishlist", session_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], false);
}

#[tokio::test]
async fn test_wishlist_unknown_session() {
    let server = setup().await;

    let fake_id = uuid::Uuid::new_v4();
    let response = as_user(
        server.post(&format!("/sessions/{}/wishlist", fake_id)),
        BOB.0,
        BOB.1,
    )
    .await;
    response.assert_status_not_found();
}
