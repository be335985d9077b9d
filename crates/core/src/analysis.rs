use crate::config::ScheduleApiConfig;
use crate::domain::game::Game;
use crate::domain::recommendation::{DailyAnalysis, Parlay, Recommendation};
use crate::ingest::{HttpScheduleProvider, ScheduleProvider};
use crate::scoring::{analyze_game, StatSource};
use crate::storage::ScheduleCache;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const PARLAY_MAX_LEGS: usize = 3;
pub const PARLAY_MIN_LEGS: usize = 2;

/// Owns the schedule source and its cache; scoring stays pure.
pub struct Analyzer {
    provider: Arc<dyn ScheduleProvider>,
    cache: ScheduleCache,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn ScheduleProvider>, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: ScheduleCache::new(cache_ttl),
        }
    }

    pub fn from_config(config: &ScheduleApiConfig, cache_ttl: Duration) -> anyhow::Result<Self> {
        let provider = HttpScheduleProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), cache_ttl))
    }

    pub async fn schedule(&self, date: NaiveDate, now: DateTime<Utc>) -> anyhow::Result<Vec<Game>> {
        self.cache
            .get_or_fetch(date, now, self.provider.as_ref())
            .await
    }

    /// Fetches (or reuses) the day's schedule and scores every game that has
    /// not started. A fetch failure aborts the whole run.
    pub async fn run<S: StatSource + ?Sized>(
        &self,
        date: NaiveDate,
        now: DateTime<Utc>,
        stats: &mut S,
    ) -> anyhow::Result<DailyAnalysis> {
        let games = self.schedule(date, now).await?;
        let recommendations = analyze_schedule(&games, stats);
        let parlay = build_parlay(&recommendations);

        let analysis = DailyAnalysis {
            run_id: Uuid::new_v4(),
            as_of_date: date,
            generated_at: now,
            games_total: games.len(),
            games_eligible: recommendations.len(),
            recommendations,
            parlay,
        };

        tracing::info!(
            run_id = %analysis.run_id,
            provider = self.provider.provider_name(),
            as_of_date = %date,
            games_total = analysis.games_total,
            games_eligible = analysis.games_eligible,
            parlay_ready = matches!(analysis.parlay, Parlay::Ready { .. }),
            "analysis completed"
        );

        Ok(analysis)
    }
}

/// Scores the not-started games and ranks them by confidence, highest first.
/// Equal confidence keeps the schedule order.
pub fn analyze_schedule<S: StatSource + ?Sized>(games: &[Game], stats: &mut S) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = games
        .iter()
        .filter(|game| game.is_not_started())
        .map(|game| analyze_game(game, stats))
        .collect();

    out.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    out
}

pub fn build_parlay(ranked: &[Recommendation]) -> Parlay {
    let legs: Vec<String> = ranked
        .iter()
        .map(|rec| rec.suggestions.moneyline.clone())
        .filter(|moneyline| !moneyline.is_empty())
        .take(PARLAY_MAX_LEGS)
        .collect();

    if legs.len() < PARLAY_MIN_LEGS {
        Parlay::Insufficient
    } else {
        Parlay::Ready { legs }
    }
}
