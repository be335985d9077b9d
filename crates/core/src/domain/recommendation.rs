use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Simulated per-team numbers. Lower ERA/WHIP is better; higher runs per game is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTriple {
    pub pitcher_era: f64,
    pub pitcher_whip: f64,
    pub runs_per_game: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotalPick {
    #[serde(rename = "Over 8.5 runs")]
    Over,
    #[serde(rename = "Under 8.5 runs")]
    Under,
}

impl fmt::Display for TotalPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalPick::Over => f.write_str("Over 8.5 runs"),
            TotalPick::Under => f.write_str("Under 8.5 runs"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetCategory {
    Moneyline,
    RunLine,
    Total,
}

impl BetCategory {
    pub fn key(self) -> &'static str {
        match self {
            BetCategory::Moneyline => "moneyline",
            BetCategory::RunLine => "run_line",
            BetCategory::Total => "total",
        }
    }

    /// Display label derived from the key ("run_line" -> "Run Line").
    pub fn label(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub moneyline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalPick>,
}

impl Suggestions {
    /// Suggestion lines in display order.
    pub fn lines(&self) -> Vec<(BetCategory, String)> {
        let mut out = vec![(BetCategory::Moneyline, self.moneyline.clone())];
        if let Some(run_line) = &self.run_line {
            out.push((BetCategory::RunLine, run_line.clone()));
        }
        if let Some(total) = self.total {
            out.push((BetCategory::Total, total.to_string()));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: String,
    pub home: String,
    pub away: String,
    pub home_stats: StatTriple,
    pub away_stats: StatTriple,
    pub home_points: u8,
    pub away_points: u8,
    pub confidence: u8,
    pub favorite: Side,
    pub suggestions: Suggestions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Parlay {
    Ready { legs: Vec<String> },
    Insufficient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAnalysis {
    pub run_id: Uuid,
    pub as_of_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub games_total: usize,
    pub games_eligible: usize,
    pub recommendations: Vec<Recommendation>,
    pub parlay: Parlay,
}

impl DailyAnalysis {
    pub fn has_games(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_labels_are_title_cased() {
        assert_eq!(BetCategory::Moneyline.label(), "Moneyline");
        assert_eq!(BetCategory::RunLine.label(), "Run Line");
        assert_eq!(BetCategory::Total.label(), "Total");
    }

    #[test]
    fn suggestions_serialize_as_category_map() {
        let s = Suggestions {
            moneyline: "Winner: Houston Astros".to_string(),
            run_line: None,
            total: Some(TotalPick::Under),
        };
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({"moneyline": "Winner: Houston Astros", "total": "Under 8.5 runs"})
        );

        let lines = s.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, BetCategory::Moneyline);
        assert_eq!(lines[1], (BetCategory::Total, "Under 8.5 runs".to_string()));
    }

    #[test]
    fn parlay_is_tagged_by_status() {
        let ready = Parlay::Ready {
            legs: vec!["Winner: A".to_string(), "Winner: B".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&ready).unwrap(),
            json!({"status": "ready", "legs": ["Winner: A", "Winner: B"]})
        );
        assert_eq!(
            serde_json::to_value(&Parlay::Insufficient).unwrap(),
            json!({"status": "insufficient"})
        );
    }
}
