use crate::domain::game::Game;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by the api-sports `/games` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesResponse {
    #[serde(default)]
    pub errors: Value,
    pub response: Vec<ApiGame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGame {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    pub teams: ApiTeams,
    pub status: ApiStatus,
    #[serde(default)]
    pub league: Option<ApiLeague>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTeams {
    pub home: ApiTeam,
    pub away: ApiTeam,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTeam {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub short: String,
    #[serde(default)]
    pub long: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLeague {
    pub name: String,
}

impl GamesResponse {
    /// api-sports answers 200 with a populated `errors` field for bad keys,
    /// exhausted quotas and invalid parameters.
    pub fn error_detail(&self) -> Option<String> {
        match &self.errors {
            Value::Null => None,
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    pub fn into_games(self) -> Vec<Game> {
        self.response.into_iter().map(ApiGame::into_game).collect()
    }
}

impl ApiGame {
    fn into_game(self) -> Game {
        Game {
            id: self.id,
            home: self.teams.home.name.trim().to_string(),
            away: self.teams.away.name.trim().to_string(),
            status: self.status.short.trim().to_string(),
            status_long: self.status.long,
            starts_at: self.date,
            league: self.league.map(|l| l.name),
        }
    }
}
