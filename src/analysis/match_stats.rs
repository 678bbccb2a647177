use crate::api::models::MatchDto;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Kill/death/assist ratio; `Perfect` when the player never died.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kda {
    Perfect,
    Ratio(f64),
}

impl Kda {
    pub fn from_counts(kills: u64, deaths: u64, assists: u64, decimals: usize) -> Self {
        if deaths == 0 {
            Kda::Perfect
        } else {
            Kda::Ratio(round_to((kills + assists) as f64 / deaths as f64, decimals))
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            Kda::Perfect => None,
            Kda::Ratio(value) => Some(*value),
        }
    }
}

impl Default for Kda {
    fn default() -> Self {
        Kda::Ratio(0.0)
    }
}

impl fmt::Display for Kda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kda::Perfect => write!(f, "Perfect"),
            Kda::Ratio(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for Kda {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Kda::Perfect => serializer.serialize_str("Perfect"),
            Kda::Ratio(value) => serializer.serialize_f64(*value),
        }
    }
}

/// Rounds to `decimals` places from the exact binary value, ties to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// One player's line for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStats {
    pub match_id: String,
    pub champion: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub damage: u64,
    /// Seconds.
    pub duration: i64,
    pub win: bool,
    /// Game end, epoch milliseconds.
    pub timestamp: i64,
    pub game_mode: String,
    kda: Kda,
    cs_per_min: f64,
}

impl MatchStats {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        match_id: String,
        champion: String,
        kills: u32,
        deaths: u32,
        assists: u32,
        cs: u32,
        damage: u64,
        duration: i64,
        win: bool,
        timestamp: i64,
        game_mode: String,
    ) -> Self {
        let kda = Kda::from_counts(kills as u64, deaths as u64, assists as u64, 1);
        let cs_per_min = if duration <= 0 {
            0.0
        } else {
            round_to(cs as f64 / (duration as f64 / 60.0), 1)
        };

        MatchStats {
            match_id,
            champion,
            kills,
            deaths,
            assists,
            cs,
            damage,
            duration,
            win,
            timestamp,
            game_mode,
            kda,
            cs_per_min,
        }
    }

    /// Pulls the line of the participant identified by `puuid` out of a
    /// full match payload.
    pub fn extract(dto: &MatchDto, puuid: &str) -> Result<Self, AppError> {
        let participant = dto.participant(puuid).ok_or_else(|| AppError::ExtractionError {
            match_id: dto.metadata.match_id.clone(),
        })?;

        Ok(MatchStats::new(
            dto.metadata.match_id.clone(),
            participant.champion_name.clone(),
            participant.kills,
            participant.deaths,
            participant.assists,
            participant.total_minions_killed + participant.neutral_minions_killed,
            participant.total_damage_dealt_to_champions,
            dto.info.game_duration,
            participant.win,
            dto.info.game_end_timestamp,
            dto.info.game_mode.clone(),
        ))
    }

    pub fn kda(&self) -> Kda {
        self.kda
    }

    pub fn cs_per_min(&self) -> f64 {
        self.cs_per_min
    }

    pub fn formatted_duration(&self) -> String {
        let seconds = self.duration.max(0);
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    pub fn formatted_timestamp(&self) -> String {
        self.ended_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

impl Serialize for MatchStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchStats", 15)?;
        state.serialize_field("match_id", &self.match_id)?;
        state.serialize_field("champion", &self.champion)?;
        state.serialize_field("kills", &self.kills)?;
        state.serialize_field("deaths", &self.deaths)?;
        state.serialize_field("assists", &self.assists)?;
        state.serialize_field("kda", &self.kda)?;
        state.serialize_field("cs", &self.cs)?;
        state.serialize_field("cs_per_min", &self.cs_per_min)?;
        state.serialize_field("damage", &self.damage)?;
        state.serialize_field("duration", &self.duration)?;
        state.serialize_field("formatted_duration", &self.formatted_duration())?;
        state.serialize_field("win", &self.win)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("formatted_timestamp", &self.formatted_timestamp())?;
        state.serialize_field("game_mode", &self.game_mode)?;
        state.end()
    }
}

#[cfg(test)]
pub(crate) fn sample(match_id: &str, champion: &str, kda: (u32, u32, u32), win: bool) -> MatchStats {
    MatchStats::new(
        match_id.to_string(),
        champion.to_string(),
        kda.0,
        kda.1,
        kda.2,
        150,
        12_000,
        1_800,
        win,
        1_700_000_000_000,
        "CLASSIC".to_string(),
    )
}
