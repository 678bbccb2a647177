use super::aggregate::AggregateStats;
use super::match_stats::MatchStats;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerIdentity {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub region: String,
    pub riot_id: String,
}

impl PlayerIdentity {
    pub fn new(puuid: String, game_name: &str, tag_line: &str, region: &str) -> Self {
        PlayerIdentity {
            puuid,
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
            region: region.to_string(),
            riot_id: format!("{}#{}", game_name, tag_line),
        }
    }
}

/// Result of one analysis: who, which matches (in retrieval order), and the
/// summary derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub player: PlayerIdentity,
    pub matches: Vec<MatchStats>,
    pub aggregate: AggregateStats,
}

impl PlayerStats {
    pub fn new(player: PlayerIdentity, matches: Vec<MatchStats>) -> Self {
        let aggregate = AggregateStats::from_matches(&matches);
        PlayerStats {
            player,
            matches,
            aggregate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::match_stats::sample;
    use serde_json::json;

    #[test]
    fn serializes_player_matches_and_aggregate() {
        let identity = PlayerIdentity::new("P1".into(), "Name", "TAG", "na1");
        let stats = PlayerStats::new(identity, vec![sample("M1", "Ahri", (4, 0, 2), true)]);

        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["player"]["riot_id"], json!("Name#TAG"));
        assert_eq!(value["matches"][0]["match_id"], json!("M1"));
        assert_eq!(value["matches"][0]["kda"], json!("Perfect"));
        assert_eq!(value["aggregate"]["total_matches"], json!(1));
        assert_eq!(value["aggregate"]["most_played"][0]["champion"], json!("Ahri"));
    }

    #[test]
    fn no_matches_gives_empty_aggregate() {
        let identity = PlayerIdentity::new("P1".into(), "Name", "TAG", "na1");
        let stats = PlayerStats::new(identity, Vec::new());

        assert!(stats.matches.is_empty());
        assert!(stats.aggregate.is_empty());
    }
}
