//! Background jobs
//!
//! Handlers dispatch fire-and-forget jobs onto an in-process queue; a single
//! worker task drains it. Job failures are logged and never surfaced to the
//! request that queued them. The single worker also serializes the
//! featured-speaker read-modify-write so two jobs cannot interleave.

use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::cache::{self, Cache};

const ANNOUNCEMENT_TPL: &str =
    "Last chance to attend! The following conferences are nearly sold out: ";

/// A named background job with its parameters
#[derive(Debug)]
pub enum Task {
    /// Confirmation for a newly created conference. Delivery is delegated to
    /// the mail relay in production; here it is logged.
    SendConfirmationEmail {
        email: String,
        conference_name: String,
    },
    /// Re-rank the featured speaker for a conference after a session was
    /// created.
    SetFeaturedSpeaker {
        conference_id: Uuid,
        session_id: Uuid,
    },
    /// Recompute the sold-out-soon announcement after seat counts moved.
    RefreshAnnouncement,
}

/// Cloneable handle used by handlers to queue jobs.
#[derive(Clone)]
pub struct TaskDispatcher {
    tx: mpsc::UnboundedSender<Task>,
}

impl TaskDispatcher {
    /// Spawn the worker and return the dispatch handle.
    pub fn spawn(pool: SqlitePool, cache: Cache) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(worker(rx, pool, cache));
        TaskDispatcher { tx }
    }

    pub fn dispatch(&self, task: Task) {
        if self.tx.send(task).is_err() {
            error!("Task worker is gone; dropping background task");
        }
    }
}

async fn worker(mut rx: mpsc::UnboundedReceiver<Task>, pool: SqlitePool, cache: Cache) {
    while let Some(task) = rx.recv().await {
        if let Err(e) = run_task(&pool, &cache, task).await {
            error!("Background task failed: {}", e);
        }
    }
}

async fn run_task(pool: &SqlitePool, cache: &Cache, task: Task) -> Result<(), sqlx::Error> {
    match task {
        Task::SendConfirmationEmail {
            email,
            conference_name,
        } => {
            info!(
                "Confirmation email to {}: your conference '{}' was created",
                email, conference_name
            );
            Ok(())
        }
        Task::SetFeaturedSpeaker {
            conference_id,
            session_id,
        } => set_featured_speaker(pool, cache, conference_id, session_id).await,
        Task::RefreshAnnouncement => refresh_announcement(pool, cache).await.map(|_| ()),
    }
}

/// Maintain the per-conference featured-speaker cache entry.
///
/// Entry format: `{speaker}|{name1},{name2},...`. First session seeds the
/// entry; a later session by the cached speaker appends its name; a session
/// by a different speaker replaces the entry only when that speaker now has
/// strictly more sessions in the conference. A newly tied speaker never
/// displaces the incumbent.
pub async fn set_featured_speaker(
    pool: &SqlitePool,
    cache: &Cache,
    conference_id: Uuid,
    session_id: Uuid,
) -> Result<(), sqlx::Error> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT speaker, name FROM sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(pool)
            .await?;

    let Some((speaker, session_name)) = row else {
        // Session vanished between dispatch and execution; nothing to rank.
        return Ok(());
    };

    let key = cache::featured_speaker_key(&conference_id.to_string());

    match cache.get(&key).await {
        None => {
            // First session seen for this conference: seed with this
            // speaker's full session list.
            let names = speaker_session_names(pool, conference_id, &speaker).await?;
            cache.set(&key, &format_entry(&speaker, &names)).await;
        }
        Some(entry) => {
            let (cached_speaker, _) = split_entry(&entry);

            if cached_speaker == speaker {
                cache.set(&key, &format!("{},{}", entry, session_name)).await;
            } else {
                let new_count = speaker_session_count(pool, conference_id, &speaker).await?;
                let cached_count =
                    speaker_session_count(pool, conference_id, cached_speaker).await?;

                if new_count > cached_count {
                    let names = speaker_session_names(pool, conference_id, &speaker).await?;
                    cache.set(&key, &format_entry(&speaker, &names)).await;
                }
            }
        }
    }

    Ok(())
}

/// Recompute the sold-out-soon announcement.
///
/// Conferences with 1-5 seats remaining make the announcement; when none
/// qualify the cache entry is deleted. Returns the announcement (empty when
/// cleared).
pub async fn refresh_announcement(
    pool: &SqlitePool,
    cache: &Cache,
) -> Result<String, sqlx::Error> {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM conferences \
         WHERE seats_available <= 5 AND seats_available > 0 \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    if names.is_empty() {
        cache.delete(cache::ANNOUNCEMENTS_KEY).await;
        return Ok(String::new());
    }

    let joined = names
        .iter()
        .map(|(n,)| n.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let announcement = format!("{}{}", ANNOUNCEMENT_TPL, joined);
    cache.set(cache::ANNOUNCEMENTS_KEY, &announcement).await;

    Ok(announcement)
}

async fn speaker_session_count(
    pool: &SqlitePool,
    conference_id: Uuid,
    speaker: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE conference_id = ? AND speaker = ?")
        .bind(conference_id.to_string())
        .bind(speaker)
        .fetch_one(pool)
        .await
}

async fn speaker_session_names(
    pool: &SqlitePool,
    conference_id: Uuid,
    speaker: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sessions \
         WHERE conference_id = ? AND speaker = ? \
         ORDER BY created_at, rowid",
    )
    .bind(conference_id.to_string())
    .bind(speaker)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(n,)| n).collect())
}

fn format_entry(speaker: &str, session_names: &[String]) -> String {
    format!("{}|{}", speaker, session_names.join(","))
}

/// Split a cache entry into (speaker, comma-joined session names).
fn split_entry(entry: &str) -> (&str, &str) {
    match entry.split_once('|') {
        Some((speaker, names)) => (speaker, names),
        None => (entry, ""),
    }
}
