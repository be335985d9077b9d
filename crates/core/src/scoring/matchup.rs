use crate::domain::game::{matchup_label, Game};
use crate::domain::recommendation::{Recommendation, Side, StatTriple, Suggestions, TotalPick};
use crate::scoring::stats::StatSource;

const ERA_POINTS: u8 = 3;
const WHIP_POINTS: u8 = 2;
const OFFENSE_POINTS: u8 = 2;
const HOME_FIELD_POINTS: u8 = 1;

pub const MAX_CONFIDENCE: u8 = ERA_POINTS + WHIP_POINTS + OFFENSE_POINTS + HOME_FIELD_POINTS;
pub const RUN_LINE_MIN_CONFIDENCE: u8 = 5;

const OVER_COMBINED_RUNS: f64 = 9.0;
const UNDER_MAX_ERA: f64 = 3.2;

/// Draws fresh stats for both sides (home first) and scores the game.
pub fn analyze_game<S: StatSource + ?Sized>(game: &Game, stats: &mut S) -> Recommendation {
    let home_stats = stats.team_stats(&game.home);
    let away_stats = stats.team_stats(&game.away);
    score_matchup(&game.home, &game.away, home_stats, away_stats)
}

/// Point-based comparison of two stat lines.
///
/// Every comparison is a strict check in the home side's favour, so ties
/// award the points to the away side. Home always gets the home-field point.
/// The favourite is whoever ends with strictly more points, away on a tie.
pub fn score_matchup(
    home: &str,
    away: &str,
    home_stats: StatTriple,
    away_stats: StatTriple,
) -> Recommendation {
    let mut home_points: u8 = 0;
    let mut away_points: u8 = 0;

    if home_stats.pitcher_era < away_stats.pitcher_era {
        home_points += ERA_POINTS;
    } else {
        away_points += ERA_POINTS;
    }

    if home_stats.pitcher_whip < away_stats.pitcher_whip {
        home_points += WHIP_POINTS;
    } else {
        away_points += WHIP_POINTS;
    }

    if home_stats.runs_per_game > away_stats.runs_per_game {
        home_points += OFFENSE_POINTS;
    } else {
        away_points += OFFENSE_POINTS;
    }

    home_points += HOME_FIELD_POINTS;

    let confidence = home_points.abs_diff(away_points);
    let favorite = if home_points > away_points {
        Side::Home
    } else {
        Side::Away
    };
    let favorite_name = match favorite {
        Side::Home => home,
        Side::Away => away,
    };

    let run_line = (confidence >= RUN_LINE_MIN_CONFIDENCE)
        .then(|| format!("{favorite_name} -1.5 (win by 2+ runs)"));

    Recommendation {
        label: matchup_label(home, away),
        home: home.to_string(),
        away: away.to_string(),
        home_stats,
        away_stats,
        home_points,
        away_points,
        confidence,
        favorite,
        suggestions: Suggestions {
            moneyline: format!("Winner: {favorite_name}"),
            run_line,
            total: pick_total(&home_stats, &away_stats),
        },
    }
}

// Over takes precedence: the under rule is only consulted when over did not fire.
fn pick_total(home: &StatTriple, away: &StatTriple) -> Option<TotalPick> {
    if home.runs_per_game + away.runs_per_game > OVER_COMBINED_RUNS {
        Some(TotalPick::Over)
    } else if home.pitcher_era < UNDER_MAX_ERA && away.pitcher_era < UNDER_MAX_ERA {
        Some(TotalPick::Under)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::stats::SimulatedStats;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triple(era: f64, whip: f64, runs: f64) -> StatTriple {
        StatTriple {
            pitcher_era: era,
            pitcher_whip: whip,
            runs_per_game: runs,
        }
    }

    #[test]
    fn dominant_home_side_scores_maximum() {
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.0, 1.2, 5.0),
            triple(4.0, 1.4, 4.0),
        );
        assert_eq!(rec.home_points, 8);
        assert_eq!(rec.away_points, 0);
        assert_eq!(rec.confidence, 8);
        assert_eq!(rec.favorite, Side::Home);
        assert_eq!(rec.label, "Away @ Home");
        assert_eq!(rec.suggestions.moneyline, "Winner: Home");
        assert_eq!(
            rec.suggestions.run_line.as_deref(),
            Some("Home -1.5 (win by 2+ runs)")
        );
        // 5.0 + 4.0 is not above 9.0, and the away ERA blocks the under.
        assert_eq!(rec.suggestions.total, None);
    }

    #[test]
    fn era_tie_goes_to_away() {
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.5, 1.2, 5.0),
            triple(3.5, 1.4, 4.0),
        );
        // away: 3 (era tie); home: 2 (whip) + 2 (runs) + 1 (home field)
        assert_eq!(rec.away_points, 3);
        assert_eq!(rec.home_points, 5);
        assert_eq!(rec.confidence, 2);
        assert_eq!(rec.favorite, Side::Home);
        assert!(rec.suggestions.run_line.is_none());
    }

    #[test]
    fn all_ties_favor_away() {
        let same = triple(4.0, 1.3, 4.0);
        let rec = score_matchup("Home", "Away", same, same);
        assert_eq!(rec.away_points, 7);
        assert_eq!(rec.home_points, 1);
        assert_eq!(rec.confidence, 6);
        assert_eq!(rec.favorite, Side::Away);
        assert_eq!(rec.suggestions.moneyline, "Winner: Away");
        assert_eq!(
            rec.suggestions.run_line.as_deref(),
            Some("Away -1.5 (win by 2+ runs)")
        );
    }

    #[test]
    fn equal_points_make_away_the_favorite() {
        // home: era 3 + home field 1 = 4; away: whip 2 + runs 2 = 4
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.0, 1.5, 4.0),
            triple(4.0, 1.2, 5.0),
        );
        assert_eq!(rec.home_points, 4);
        assert_eq!(rec.away_points, 4);
        assert_eq!(rec.confidence, 0);
        assert_eq!(rec.favorite, Side::Away);
        assert_eq!(rec.suggestions.moneyline, "Winner: Away");
    }

    #[test]
    fn over_wins_even_when_under_would_also_apply() {
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.0, 1.2, 5.5),
            triple(3.1, 1.3, 5.0),
        );
        assert_eq!(rec.suggestions.total, Some(TotalPick::Over));
    }

    #[test]
    fn under_when_both_aces_and_low_offense() {
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.0, 1.2, 4.0),
            triple(3.1, 1.3, 4.0),
        );
        assert_eq!(rec.suggestions.total, Some(TotalPick::Under));
    }

    #[test]
    fn under_requires_both_eras_below_threshold() {
        let rec = score_matchup(
            "Home",
            "Away",
            triple(3.0, 1.2, 4.0),
            triple(3.2, 1.3, 4.0),
        );
        assert_eq!(rec.suggestions.total, None);
    }

    #[test]
    fn simulated_games_respect_invariants() {
        let mut stats = SimulatedStats::new(StdRng::seed_from_u64(2024));
        let game = Game {
            id: Some(1),
            home: "Los Angeles Dodgers".to_string(),
            away: "San Diego Padres".to_string(),
            status: "NS".to_string(),
            status_long: None,
            starts_at: None,
            league: None,
        };

        for _ in 0..2_000 {
            let rec = analyze_game(&game, &mut stats);
            assert!(rec.confidence <= MAX_CONFIDENCE);
            assert_eq!(rec.home_points + rec.away_points, MAX_CONFIDENCE);
            assert!(rec.suggestions.moneyline.starts_with("Winner: "));
            assert_eq!(
                rec.suggestions.run_line.is_some(),
                rec.confidence >= RUN_LINE_MIN_CONFIDENCE
            );
            if let Some(total) = rec.suggestions.total {
                let text = total.to_string();
                assert!(text == "Over 8.5 runs" || text == "Under 8.5 runs");
            }
        }
    }
}
