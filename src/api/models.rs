use serde::Deserialize;

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
}

// Match V5 response
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_duration: i64,
    pub game_end_timestamp: i64,
    pub game_mode: String,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_minions_killed: u32,
    #[serde(default)]
    pub neutral_minions_killed: u32,
    pub total_damage_dealt_to_champions: u64,
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_payload_deserializes_with_optional_fields_missing() {
        let payload = r#"{
            "metadata": {"matchId": "NA1_1", "dataVersion": "2"},
            "info": {
                "gameDuration": 1500,
                "gameEndTimestamp": 1700000000000,
                "gameMode": "CLASSIC",
                "gameId": 1,
                "participants": [{
                    "puuid": "P1",
                    "championName": "Ahri",
                    "win": true,
                    "kills": 5,
                    "deaths": 2,
                    "assists": 3,
                    "totalMinionsKilled": 120,
                    "totalDamageDealtToChampions": 15000,
                    "lane": "MIDDLE"
                }]
            }
        }"#;

        let dto: MatchDto = serde_json::from_str(payload).unwrap();
        let me = dto.participant("P1").unwrap();
        assert_eq!(me.champion_name, "Ahri");
        assert_eq!(me.neutral_minions_killed, 0);
        assert!(dto.participant("P2").is_none());
    }
}
