use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChampionStats {
    pub champion: String,
    pub count: usize,
    pub wins: usize,
}

impl ChampionStats {
    pub fn new(champion: String) -> Self {
        ChampionStats {
            champion,
            count: 0,
            wins: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.wins as f64 / self.count as f64
        }
    }
}

/// Counts games per champion, remembering the order in which champions were
/// first seen so that equal counts rank by first appearance.
pub struct ChampionStatsTracker {
    stats: Vec<ChampionStats>,
    index: HashMap<String, usize>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        ChampionStatsTracker {
            stats: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add_game(&mut self, champion: &str, won: bool) {
        let slot = match self.index.get(champion) {
            Some(&slot) => slot,
            None => {
                self.stats.push(ChampionStats::new(champion.to_string()));
                self.index.insert(champion.to_string(), self.stats.len() - 1);
                self.stats.len() - 1
            }
        };

        let entry = &mut self.stats[slot];
        entry.count += 1;
        if won {
            entry.wins += 1;
        }
    }

    /// The `n` most played champions, most games first.
    pub fn most_played(&self, n: usize) -> Vec<ChampionStats> {
        let mut ranked = self.stats.clone();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}
