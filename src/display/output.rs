use crate::analysis::aggregate::AggregateStats;
use crate::analysis::match_stats::MatchStats;
use crate::analysis::player::PlayerStats;
use crate::cache::CacheStats;
use crate::error::AppError;
use crate::rate_limit::RateLimitStatus;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    result: String,
    #[tabled(rename = "K/D/A")]
    line: String,
    kda: String,
    #[tabled(rename = "CS/min")]
    cs_per_min: String,
    damage: String,
    duration: String,
    played: String,
}

#[derive(Tabled)]
struct ChampionRow {
    rank: String,
    champion: String,
    games: String,
    win_rate: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// One line explaining what the user can do about a failed analysis.
pub fn error_hint(error: &AppError) -> &'static str {
    match error {
        AppError::ValidationError(_) | AppError::InvalidRiotId => "Check the Riot ID, region and match count.",
        AppError::UnknownRegion(_) => "Use one of the supported platform codes, e.g. na1 or euw1.",
        AppError::NotFound(_) => "Player not found. Please check the Riot ID and region.",
        AppError::AuthenticationError(_) => "API authentication failed. Check RIOT_API_KEY.",
        AppError::RateLimited => "The API quota is exhausted. Try again in a minute.",
        AppError::ServiceUnavailable(_) => "Riot API is currently unavailable. Please try again later.",
        _ => "An unexpected error occurred. Please try again later.",
    }
}

pub fn display_failure(riot_id: &str, error: &AppError) {
    display_error(&format!("{}: {}", riot_id, error));
    eprintln!("   {}", error_hint(error).yellow());
}

fn match_row(number: usize, m: &MatchStats) -> MatchRow {
    let result = if m.win {
        "WIN".green().to_string()
    } else {
        "LOSS".red().to_string()
    };

    MatchRow {
        number: number.to_string(),
        champion: m.champion.clone(),
        result,
        line: format!("{}/{}/{}", m.kills, m.deaths, m.assists),
        kda: m.kda().to_string(),
        cs_per_min: format!("{:.1}", m.cs_per_min()),
        damage: m.damage.to_string(),
        duration: m.formatted_duration(),
        played: m.formatted_timestamp(),
    }
}

pub fn display_player(stats: &PlayerStats) {
    println!(
        "\n{}",
        format!(
            "📊 MATCH REVIEW: {} ({})",
            stats.player.riot_id, stats.player.region
        )
        .bold()
        .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    if stats.aggregate.is_empty() {
        println!(
            "{}\n",
            "No match data found for this player. The account may be new or have no recent matches."
                .yellow()
        );
        return;
    }

    display_match_history(&stats.matches);
    display_summary(&stats.aggregate);
}

pub fn display_match_history(matches: &[MatchStats]) {
    let rows: Vec<_> = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| match_row(idx + 1, m))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_summary(aggregate: &AggregateStats) {
    println!(
        "{} {} W / {} L ({:.1}% WR)",
        "📈 Overall:".bold(),
        aggregate.wins.to_string().green(),
        aggregate.losses.to_string().red(),
        aggregate.win_rate
    );
    println!(
        "   KDA {} ({:.1} / {:.1} / {:.1})   CS/min {:.1}   Damage {}\n",
        aggregate.avg_kda.to_string().bold(),
        aggregate.avg_kills,
        aggregate.avg_deaths,
        aggregate.avg_assists,
        aggregate.avg_cs_per_min,
        aggregate.avg_damage
    );

    if !aggregate.most_played.is_empty() {
        println!("{}", "Most Played".bold().yellow());
        let rows: Vec<_> = aggregate
            .most_played
            .iter()
            .enumerate()
            .map(|(idx, c)| ChampionRow {
                rank: format!("#{}", idx + 1),
                champion: c.champion.clone(),
                games: c.count.to_string(),
                win_rate: format!("{:.1}%", c.win_rate() * 100.0),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}\n", table);
    }

    if let Some(best) = &aggregate.best_match {
        println!(
            "{} {} {}/{}/{} (KDA {}) on {}",
            "Best Game ".bold().green(),
            best.champion,
            best.kills,
            best.deaths,
            best.assists,
            best.kda(),
            best.formatted_timestamp()
        );
    }
    if let Some(worst) = &aggregate.worst_match {
        println!(
            "{} {} {}/{}/{} (KDA {}) on {}",
            "Worst Game".bold().red(),
            worst.champion,
            worst.kills,
            worst.deaths,
            worst.assists,
            worst.kda(),
            worst.formatted_timestamp()
        );
    }

    println!();
}

pub fn display_api_usage(limits: RateLimitStatus, cache: CacheStats) {
    println!("\n📊 API Usage");
    println!(
        "   Last second:    {}/{} requests",
        limits.in_last_second, limits.per_second
    );
    println!(
        "   Last 2 minutes: {}/{} requests",
        limits.in_last_two_minutes, limits.per_two_minutes
    );
    println!(
        "   Cache: {} entries (oldest {}s, newest {}s)\n",
        cache.size,
        cache.oldest_age.as_secs(),
        cache.newest_age.as_secs()
    );
}
