use super::champion_stats::{ChampionStats, ChampionStatsTracker};
use super::match_stats::{round_to, Kda, MatchStats};
use serde::Serialize;

const MOST_PLAYED_LIMIT: usize = 5;

/// Summary over a player's analyzed matches. An empty match list reduces to
/// the zeroed default.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_kda: Kda,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_cs_per_min: f64,
    pub avg_damage: u64,
    pub most_played: Vec<ChampionStats>,
    pub best_match: Option<MatchStats>,
    pub worst_match: Option<MatchStats>,
}

impl AggregateStats {
    pub fn from_matches(matches: &[MatchStats]) -> Self {
        if matches.is_empty() {
            return AggregateStats::default();
        }

        let total = matches.len();
        let wins = matches.iter().filter(|m| m.win).count();

        let total_kills: u64 = matches.iter().map(|m| m.kills as u64).sum();
        let total_deaths: u64 = matches.iter().map(|m| m.deaths as u64).sum();
        let total_assists: u64 = matches.iter().map(|m| m.assists as u64).sum();
        let total_cs: u64 = matches.iter().map(|m| m.cs as u64).sum();
        let total_duration: i64 = matches.iter().map(|m| m.duration).sum();
        let total_damage: u64 = matches.iter().map(|m| m.damage).sum();

        let avg_cs_per_min = if total_duration > 0 {
            round_to(total_cs as f64 / (total_duration as f64 / 60.0), 1)
        } else {
            0.0
        };

        let mut tracker = ChampionStatsTracker::new();
        for m in matches {
            tracker.add_game(&m.champion, m.win);
        }

        let (best_match, worst_match) = best_and_worst(matches);

        AggregateStats {
            total_matches: total,
            wins,
            losses: total - wins,
            win_rate: round_to(wins as f64 / total as f64 * 100.0, 1),
            avg_kda: Kda::from_counts(total_kills, total_deaths, total_assists, 2),
            avg_kills: round_to(total_kills as f64 / total as f64, 1),
            avg_deaths: round_to(total_deaths as f64 / total as f64, 1),
            avg_assists: round_to(total_assists as f64 / total as f64, 1),
            avg_cs_per_min,
            avg_damage: total_damage / total as u64,
            most_played: tracker.most_played(MOST_PLAYED_LIMIT),
            best_match,
            worst_match,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// Highest and lowest numeric KDA, first in sequence order on ties. Perfect
/// games are skipped; if every game is perfect both fall back to the first.
fn best_and_worst(matches: &[MatchStats]) -> (Option<MatchStats>, Option<MatchStats>) {
    let mut best: Option<(&MatchStats, f64)> = None;
    let mut worst: Option<(&MatchStats, f64)> = None;

    for m in matches {
        let Some(kda) = m.kda().ratio() else {
            continue;
        };
        if best.map_or(true, |(_, top)| kda > top) {
            best = Some((m, kda));
        }
        if worst.map_or(true, |(_, bottom)| kda < bottom) {
            worst = Some((m, kda));
        }
    }

    match (best, worst) {
        (Some((best, _)), Some((worst, _))) => (Some(best.clone()), Some(worst.clone())),
        _ => (matches.first().cloned(), matches.first().cloned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::match_stats::sample;

    #[test]
    fn empty_collection_reduces_to_zeroed_stats() {
        let stats = AggregateStats::from_matches(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.win_rate, 0.0);
        assert!(stats.most_played.is_empty());
        assert!(stats.best_match.is_none());
        assert!(stats.worst_match.is_none());
    }

    #[test]
    fn aggregate_kda_sums_before_dividing() {
        let matches = vec![
            sample("M1", "Ahri", (5, 0, 5), true),
            sample("M2", "Ahri", (3, 2, 3), false),
            sample("M3", "Lux", (1, 2, 1), false),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(matches[0].kda(), Kda::Perfect);
        assert_eq!(stats.avg_kda, Kda::Ratio(4.5));
    }

    #[test]
    fn aggregate_kda_is_perfect_only_without_any_deaths() {
        let matches = vec![
            sample("M1", "Ahri", (5, 0, 5), true),
            sample("M2", "Ahri", (2, 0, 1), true),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.avg_kda, Kda::Perfect);
        assert_eq!(stats.win_rate, 100.0);
    }

    #[test]
    fn best_and_worst_skip_perfect_games() {
        let matches = vec![
            sample("M1", "Ahri", (10, 0, 10), true),
            sample("M2", "Ahri", (3, 2, 3), true),
            sample("M3", "Lux", (1, 4, 1), false),
            sample("M4", "Lux", (6, 1, 2), true),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.best_match.unwrap().match_id, "M4");
        assert_eq!(stats.worst_match.unwrap().match_id, "M3");
    }

    #[test]
    fn all_perfect_games_fall_back_to_first_match() {
        let matches = vec![
            sample("M1", "Ahri", (1, 0, 1), true),
            sample("M2", "Lux", (9, 0, 9), true),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.best_match.unwrap().match_id, "M1");
        assert_eq!(stats.worst_match.unwrap().match_id, "M1");
    }

    #[test]
    fn kda_ties_keep_the_earliest_match() {
        let matches = vec![
            sample("M1", "Ahri", (2, 2, 2), true),
            sample("M2", "Ahri", (2, 2, 2), false),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.best_match.unwrap().match_id, "M1");
        assert_eq!(stats.worst_match.unwrap().match_id, "M1");
    }

    #[test]
    fn averages_and_most_played() {
        let champions = ["Ahri", "Lux", "Zed", "Lux", "Garen", "Jinx", "Vi", "Ahri"];
        let matches: Vec<_> = champions
            .iter()
            .enumerate()
            .map(|(i, c)| sample(&format!("M{}", i), c, (2, 1, 3), i % 2 == 0))
            .collect();

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.total_matches, 8);
        assert_eq!(stats.wins, 4);
        assert_eq!(stats.losses, 4);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.avg_kills, 2.0);
        assert_eq!(stats.avg_cs_per_min, 5.0);
        assert_eq!(stats.avg_damage, 12_000);

        let top: Vec<_> = stats
            .most_played
            .iter()
            .map(|c| (c.champion.as_str(), c.count))
            .collect();
        assert_eq!(
            top,
            vec![("Ahri", 2), ("Lux", 2), ("Zed", 1), ("Garen", 1), ("Jinx", 1)]
        );
    }

    #[test]
    fn averages_on_exact_ties_round_to_even() {
        let matches = vec![
            sample("M1", "Ahri", (2, 1, 1), true),
            sample("M2", "Ahri", (1, 1, 0), false),
            sample("M3", "Lux", (1, 1, 0), false),
            sample("M4", "Lux", (1, 1, 0), false),
        ];

        let stats = AggregateStats::from_matches(&matches);

        assert_eq!(stats.avg_kills, 1.2);
        assert_eq!(stats.avg_assists, 0.2);
        assert_eq!(stats.avg_kda, Kda::Ratio(1.5));
        assert_eq!(stats.win_rate, 25.0);
    }
}
