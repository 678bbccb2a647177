// Region routing and URL builders for the account and match endpoints.

use crate::error::AppError;

pub const API_HOST: &str = "api.riotgames.com";

/// Platform code -> regional routing value.
const REGION_ROUTING: &[(&str, &str)] = &[
    ("na1", "americas"),
    ("br1", "americas"),
    ("la1", "americas"),
    ("la2", "americas"),
    ("euw1", "europe"),
    ("eun1", "europe"),
    ("tr1", "europe"),
    ("ru", "europe"),
    ("kr", "asia"),
    ("jp1", "asia"),
    ("oc1", "sea"),
    ("ph2", "sea"),
    ("sg2", "sea"),
    ("th2", "sea"),
    ("tw2", "sea"),
    ("vn2", "sea"),
];

pub fn known_platforms() -> impl Iterator<Item = &'static str> {
    REGION_ROUTING.iter().map(|(platform, _)| *platform)
}

pub fn regional_routing(platform: &str) -> Result<&'static str, AppError> {
    let platform = platform.to_ascii_lowercase();
    REGION_ROUTING
        .iter()
        .find(|(code, _)| *code == platform)
        .map(|(_, routing)| *routing)
        .ok_or(AppError::UnknownRegion(platform))
}

pub fn account_url(routing: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "https://{}.{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        routing, API_HOST, game_name, tag_line
    )
}

pub fn match_ids_url(routing: &str, puuid: &str) -> String {
    format!(
        "https://{}.{}/lol/match/v5/matches/by-puuid/{}/ids",
        routing, API_HOST, puuid
    )
}

pub fn match_url(routing: &str, match_id: &str) -> String {
    format!(
        "https://{}.{}/lol/match/v5/matches/{}",
        routing, API_HOST, match_id
    )
}
