pub mod matchup;
pub mod stats;

pub use matchup::{analyze_game, score_matchup};
pub use stats::{SimulatedStats, StatSource};
