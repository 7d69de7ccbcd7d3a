//! High scores, credits and the local leaderboard
//!
//! Persisted to LocalStorage. Tracks the best score per difficulty, the
//! legacy single best (normal difficulty only), accrued credits and the
//! top 10 runs.

use serde::{Deserialize, Serialize};

use crate::tuning::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Score points per credit earned
pub const SCORE_PER_CREDIT: u32 = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Level reached (1-based)
    pub level: u32,
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best score for each difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyBests {
    pub easy: u32,
    pub normal: u32,
    pub hard: u32,
}

impl DifficultyBests {
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    fn get_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// What a finished run earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    /// Leaderboard rank (1-indexed), if the run made the table
    pub rank: Option<usize>,
    /// Beat the previous best for its difficulty
    pub new_best: bool,
    pub credits_earned: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    pub bests: DifficultyBests,
    /// Single best from before per-difficulty records; normal difficulty only
    pub legacy_best: u32,
    pub credits: u32,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "planet_orbit_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Best score shown for a difficulty (normal also honors the legacy record)
    pub fn best(&self, difficulty: Difficulty) -> u32 {
        let best = self.bests.get(difficulty);
        match difficulty {
            Difficulty::Normal => best.max(self.legacy_best),
            _ => best,
        }
    }

    /// Record a finished run: bests, credits and the leaderboard
    pub fn record_game(
        &mut self,
        score: u32,
        level: u32,
        difficulty: Difficulty,
        timestamp: f64,
    ) -> RunRecord {
        let best = self.bests.get_mut(difficulty);
        let new_best = score > *best;
        if new_best {
            *best = score;
        }
        if difficulty == Difficulty::Normal {
            self.legacy_best = self.legacy_best.max(score);
        }

        let credits_earned = score / SCORE_PER_CREDIT;
        self.credits = self.credits.saturating_add(credits_earned);

        let rank = self.add_score(HighScoreEntry {
            score,
            level,
            difficulty,
            timestamp,
        });

        log::info!(
            "Recorded {} on {} (rank {:?}, +{} credits)",
            score,
            difficulty.as_str(),
            rank,
            credits_earned
        );
        RunRecord {
            rank,
            new_best,
            credits_earned,
        }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Ignoring stored high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }
}
