use crate::config::ScheduleApiConfig;
use crate::domain::game::Game;
use crate::ingest::types::GamesResponse;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const GAMES_PATH: &str = "/games";
const API_KEY_HEADER: &str = "x-apisports-key";
const ERROR_BODY_MAX_CHARS: usize = 500;

#[async_trait::async_trait]
pub trait ScheduleProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_games(&self, date: NaiveDate) -> Result<Vec<Game>>;
}

#[derive(Debug, Clone)]
pub struct HttpScheduleProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpScheduleProvider {
    pub fn from_config(config: &ScheduleApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build schedule http client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GAMES_PATH)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key).context("API_KEY is not a valid header value")?,
        );
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ScheduleProvider for HttpScheduleProvider {
    fn provider_name(&self) -> &'static str {
        "api_sports"
    }

    async fn fetch_games(&self, date: NaiveDate) -> Result<Vec<Game>> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .context("schedule request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read schedule response")?;

        if !status.is_success() {
            anyhow::bail!("schedule API HTTP {status}: {}", snippet(&text));
        }

        parse_games(&text)
    }
}

pub fn parse_games(text: &str) -> Result<Vec<Game>> {
    let parsed = serde_json::from_str::<GamesResponse>(text)
        .with_context(|| format!("schedule response is not valid games JSON: {}", snippet(text)))?;

    if let Some(detail) = parsed.error_detail() {
        anyhow::bail!("schedule API reported errors: {}", snippet(&detail));
    }

    Ok(parsed.into_games())
}

// Upstream bodies end up in error pages; keep only the head of them.
fn snippet(text: &str) -> String {
    match text.char_indices().nth(ERROR_BODY_MAX_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider(base_url: &str) -> HttpScheduleProvider {
        HttpScheduleProvider::from_config(&ScheduleApiConfig {
            base_url: base_url.to_string(),
            api_key: "secret".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn url_joins_base_and_games_path() {
        assert_eq!(
            provider("https://v1.baseball.api-sports.io/").url(),
            "https://v1.baseball.api-sports.io/games"
        );
        assert_eq!(
            provider("https://v1.baseball.api-sports.io").url(),
            "https://v1.baseball.api-sports.io/games"
        );
    }

    #[test]
    fn sends_api_key_header() {
        let headers = provider("https://example.test").headers().unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret");
    }

    #[test]
    fn rejects_api_key_with_control_characters() {
        let p = HttpScheduleProvider::from_config(&ScheduleApiConfig {
            base_url: "https://example.test".to_string(),
            api_key: "bad\nkey".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert!(p.headers().is_err());
    }

    #[test]
    fn parse_games_accepts_valid_body() {
        let body = json!({
            "errors": [],
            "response": [
                {"status": {"short": "NS"}, "teams": {"home": {"name": "A"}, "away": {"name": "B"}}},
                {"status": {"short": "FT"}, "teams": {"home": {"name": "C"}, "away": {"name": "D"}}}
            ]
        })
        .to_string();

        let games = parse_games(&body).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].status, "FT");
    }

    #[test]
    fn parse_games_rejects_malformed_json() {
        assert!(parse_games("<html>gateway timeout</html>").is_err());
        assert!(parse_games("{\"results\": 0}").is_err());
    }

    #[test]
    fn parse_games_surfaces_api_errors() {
        let body = json!({"errors": {"requests": "You have reached the request limit"}, "response": []})
            .to_string();
        let err = parse_games(&body).unwrap_err();
        assert!(err.to_string().contains("request limit"));
    }

    #[test]
    fn large_upstream_body_is_cut_in_errors() {
        let body = format!("<html>{}</html>", "é".repeat(5000));
        let msg = parse_games(&body).unwrap_err().to_string();
        assert!(msg.contains("<html>éé"));
        assert!(msg.ends_with('…'));
        assert!(!msg.contains("</html>"));
        assert!(msg.chars().count() < 700);
    }

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(snippet("forbidden"), "forbidden");
        assert_eq!(snippet(&"a".repeat(500)), "a".repeat(500));
        assert_eq!(snippet(&"a".repeat(501)), format!("{}…", "a".repeat(500)));
    }
}
