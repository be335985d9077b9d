use serde::{Deserialize, Serialize};

/// Short status code the schedule feed uses for games that have not started.
pub const STATUS_NOT_STARTED: &str = "NS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<i64>,
    pub home: String,
    pub away: String,
    pub status: String,
    pub status_long: Option<String>,
    pub starts_at: Option<String>,
    pub league: Option<String>,
}

impl Game {
    pub fn is_not_started(&self) -> bool {
        self.status == STATUS_NOT_STARTED
    }
}

pub fn matchup_label(home: &str, away: &str) -> String {
    format!("{away} @ {home}")
}
