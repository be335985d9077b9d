use pele_core::config::ConfigError;
use pele_core::domain::recommendation::{DailyAnalysis, Parlay, Recommendation};
use std::fmt::Write;

const TITLE: &str = "⚾ Bot Pelé v2.0 - The Strategist";
const SUBTITLE: &str = "Your personal assistant for baseball game analysis.";
const RUN_BUTTON: &str = "Analyze today's games!";
const IDLE_HINT: &str = "Click the button above to start today's analysis.";
const NO_GAMES: &str = "No games found for today that have not started yet.";
const PICKS_HEADER: &str = "🎯 Strategies and Picks of the Day";
const PARLAY_HEADER: &str = "🚀 Parlay Suggestion (High-Risk Bet!)";
const PARLAY_INSUFFICIENT: &str =
    "There are not enough games with sufficient confidence to build a parlay today.";
const PARLAY_CAVEAT: &str = "Remember: in a parlay you must get ALL of the results right to win.";
const DISCLAIMER: &str = "Disclaimer: the suggestions are based on a simulated statistical model \
     and do not guarantee results. Bet responsibly.";

pub fn landing_page() -> String {
    page(&notice("info", IDLE_HINT), true)
}

pub fn report_page(analysis: &DailyAnalysis) -> String {
    page(&report_body(analysis), true)
}

/// Configuration problems halt rendering: no button, no disclaimer.
pub fn config_error_page(err: &ConfigError) -> String {
    let body = notice(
        "error",
        &escape(&format!(
            "ERROR: the API keys were not found. Configure API_KEY and BASE_URL for this \
             service. ({err})"
        )),
    );
    page(&body, false)
}

pub fn fetch_error_page(err: &anyhow::Error) -> String {
    let body = notice(
        "error",
        &escape(&format!(
            "An error occurred while communicating with the API. Check that your keys are \
             configured correctly. Error: {err:#}"
        )),
    );
    page(&body, true)
}

fn report_body(analysis: &DailyAnalysis) -> String {
    if !analysis.has_games() {
        return notice("warning", NO_GAMES);
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "<p class=\"meta\">Schedule for {} &middot; {} of {} games not started yet</p>",
        analysis.as_of_date, analysis.games_eligible, analysis.games_total
    );

    let _ = write!(out, "<h2>{}</h2>", escape(PICKS_HEADER));
    for rec in &analysis.recommendations {
        out.push_str(&recommendation_panel(rec));
    }

    let _ = write!(out, "<h2>{}</h2>", escape(PARLAY_HEADER));
    out.push_str(&parlay_block(&analysis.parlay));
    out
}

fn recommendation_panel(rec: &Recommendation) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<details class=\"pick\"><summary><strong>{}</strong> (Analysis confidence: {} pts)</summary>",
        escape(&rec.label),
        rec.confidence
    );
    for (category, text) in rec.suggestions.lines() {
        let _ = write!(
            out,
            "<p><strong>{}:</strong> {}</p>",
            escape(&category.label()),
            escape(&text)
        );
    }
    out.push_str("</details>");
    out
}

fn parlay_block(parlay: &Parlay) -> String {
    match parlay {
        Parlay::Insufficient => notice("info", PARLAY_INSUFFICIENT),
        Parlay::Ready { legs } => {
            let mut out = String::new();
            for (i, leg) in legs.iter().enumerate() {
                out.push_str(&notice(
                    "success",
                    &format!("<strong>Selection {}:</strong> {}", i + 1, escape(leg)),
                ));
            }
            out.push_str(&notice("warning", PARLAY_CAVEAT));
            out
        }
    }
}

// `html` is inserted as-is; callers escape user-supplied parts.
fn notice(kind: &str, html: &str) -> String {
    format!("<div class=\"notice {kind}\">{html}</div>")
}

fn page(body: &str, interactive: bool) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Bot Pelé</title><style>{STYLE}</style></head><body><main>\
         <h1>{}</h1>",
        escape(TITLE)
    );

    if interactive {
        let _ = write!(
            out,
            "<p>{}</p><form method=\"post\" action=\"/analysis\"><button type=\"submit\">{}</button></form>",
            escape(SUBTITLE),
            escape(RUN_BUTTON)
        );
    }

    out.push_str(body);

    if interactive {
        let _ = write!(out, "<hr><p><em>{}</em></p>", escape(DISCLAIMER));
    }

    out.push_str("</main></body></html>");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#fafafa}\
main{max-width:960px;margin:0 auto;padding:1.5rem}\
button{background:#1f6feb;color:#fff;border:0;border-radius:6px;padding:.6rem 1.2rem;font-size:1rem;cursor:pointer}\
.notice{border-radius:6px;padding:.75rem 1rem;margin:.5rem 0}\
.info{background:#e7f1ff}.warning{background:#fff6d6}.error{background:#ffe3e3}.success{background:#e3f8e8}\
details.pick{background:#fff;border:1px solid #ddd;border-radius:6px;padding:.5rem 1rem;margin:.5rem 0}\
.meta{color:#666}";
