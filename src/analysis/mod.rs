pub mod aggregate;
pub mod champion_stats;
pub mod engine;
pub mod match_stats;
pub mod player;
