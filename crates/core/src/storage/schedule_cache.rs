use crate::domain::game::Game;
use crate::ingest::ScheduleProvider;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Process-wide schedule cache keyed by calendar date with a fixed time-to-live.
/// Only successful fetches are stored.
///
/// Each date has its own slot lock: a miss holds only that slot across the
/// fetch, so hits on other dates never wait on the network.
#[derive(Debug)]
pub struct ScheduleCache {
    ttl: chrono::Duration,
    slots: tokio::sync::Mutex<HashMap<NaiveDate, Slot>>,
}

type Slot = Arc<tokio::sync::Mutex<Option<CachedSchedule>>>;

#[derive(Debug, Clone)]
struct CachedSchedule {
    games: Vec<Game>,
    fetched_at: DateTime<Utc>,
}

impl CachedSchedule {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

impl ScheduleCache {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500)),
            slots: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached schedule for `date` or fetches it through `provider`.
    /// Concurrent misses for the same date share one fetch.
    pub async fn get_or_fetch(
        &self,
        date: NaiveDate,
        now: DateTime<Utc>,
        provider: &dyn ScheduleProvider,
    ) -> Result<Vec<Game>> {
        let slot = self.slot(date, now).await;
        let mut cached = slot.lock().await;

        if let Some(hit) = cached.as_ref().filter(|c| c.is_fresh(now, self.ttl)) {
            tracing::debug!(%date, games_len = hit.games.len(), "schedule cache hit");
            return Ok(hit.games.clone());
        }

        tracing::debug!(%date, provider = provider.provider_name(), "schedule cache miss");
        *cached = None;
        let games = provider.fetch_games(date).await?;
        *cached = Some(CachedSchedule {
            games: games.clone(),
            fetched_at: now,
        });
        Ok(games)
    }

    // Drops idle slots that are empty or expired, then hands out the slot for `date`.
    // Slots locked by an in-flight fetch are kept.
    async fn slot(&self, date: NaiveDate, now: DateTime<Utc>) -> Slot {
        let mut slots = self.slots.lock().await;
        let ttl = self.ttl;
        slots.retain(|_, slot| match slot.try_lock() {
            Ok(cached) => cached.as_ref().is_some_and(|c| c.is_fresh(now, ttl)),
            Err(_) => true,
        });
        slots.entry(date).or_default().clone()
    }
}
