// Checks on user-supplied input before anything reaches the engine.

use crate::api::endpoints;
use crate::error::AppError;

/// Splits `Name#TAG` into its two halves.
pub fn parse_riot_id(riot_id: &str) -> Result<(String, String), AppError> {
    let riot_id = riot_id.trim();
    let (game_name, tag_line) = riot_id.split_once('#').ok_or(AppError::InvalidRiotId)?;
    if tag_line.contains('#') {
        return Err(AppError::InvalidRiotId);
    }

    let name_len = game_name.chars().count();
    if !(3..=16).contains(&name_len) {
        return Err(AppError::ValidationError(
            "Game name must be 3-16 characters".to_string(),
        ));
    }

    if !(3..=5).contains(&tag_line.len()) {
        return Err(AppError::ValidationError(
            "Tag line must be 3-5 characters".to_string(),
        ));
    }

    if !tag_line.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationError(
            "Tag line must contain only letters and numbers".to_string(),
        ));
    }

    Ok((game_name.to_string(), tag_line.to_string()))
}

pub fn validate_region(region: &str) -> Result<String, AppError> {
    let region = region.trim().to_ascii_lowercase();
    if endpoints::known_platforms().any(|p| p == region) {
        Ok(region)
    } else {
        let allowed: Vec<_> = endpoints::known_platforms().collect();
        Err(AppError::ValidationError(format!(
            "Invalid region '{}'. Allowed regions: {}",
            region,
            allowed.join(", ")
        )))
    }
}

pub fn validate_match_count(count: usize, max: usize) -> Result<usize, AppError> {
    if (1..=max).contains(&count) {
        Ok(count)
    } else {
        Err(AppError::ValidationError(format!(
            "Number of matches must be between 1 and {}",
            max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_id_splits_on_hash() {
        assert_eq!(
            parse_riot_id(" Hide on bush#KR1 ").unwrap(),
            ("Hide on bush".to_string(), "KR1".to_string())
        );
    }

    #[test]
    fn malformed_riot_ids_are_rejected() {
        assert!(matches!(parse_riot_id("NoTag"), Err(AppError::InvalidRiotId)));
        assert!(matches!(parse_riot_id("a#b#c"), Err(AppError::InvalidRiotId)));
        assert!(matches!(parse_riot_id("Ab#NA1"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_riot_id("Player#N"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_riot_id("Player#N-A1"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn region_must_be_a_known_platform() {
        assert_eq!(validate_region("EUW1").unwrap(), "euw1");
        assert!(validate_region("mars").is_err());
    }

    #[test]
    fn match_count_is_bounded() {
        assert_eq!(validate_match_count(20, 20).unwrap(), 20);
        assert!(validate_match_count(0, 20).is_err());
        assert!(validate_match_count(21, 20).is_err());
    }
}
