use crate::domain::recommendation::StatTriple;
use rand::Rng;
use std::ops::RangeInclusive;

pub const ERA_RANGE: RangeInclusive<f64> = 2.8..=5.5;
pub const WHIP_RANGE: RangeInclusive<f64> = 1.1..=1.6;
pub const RUNS_PER_GAME_RANGE: RangeInclusive<f64> = 3.5..=5.8;

pub trait StatSource {
    fn team_stats(&mut self, team: &str) -> StatTriple;
}

/// Stand-in for a real stats feed: every lookup draws a fresh triple.
#[derive(Debug)]
pub struct SimulatedStats<R> {
    rng: R,
}

impl<R: Rng> SimulatedStats<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> StatSource for SimulatedStats<R> {
    fn team_stats(&mut self, team: &str) -> StatTriple {
        simulate_team_stats(team, &mut self.rng)
    }
}

/// The team name is not consulted; all three values are independent uniform draws.
pub fn simulate_team_stats<R: Rng + ?Sized>(_team: &str, rng: &mut R) -> StatTriple {
    StatTriple {
        pitcher_era: round_to(rng.gen_range(ERA_RANGE), 2),
        pitcher_whip: round_to(rng.gen_range(WHIP_RANGE), 2),
        runs_per_game: round_to(rng.gen_range(RUNS_PER_GAME_RANGE), 1),
    }
}

/// Rounds the exact binary value of `value` to `decimals` places, so 2.675
/// (stored as 2.67499...) becomes 2.67. Scaling by a power of ten first would
/// round the product instead and give 2.68.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
