use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running score of one player across rounds
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub display_name: String,
    pub correct_vote_points: u32,
    pub trick_points: u32,
    pub total: u32,
    pub rounds_played: u32,
}

/// Cumulative scores keyed by player id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    standings: HashMap<PlayerId, Standing>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one round's changes to the running totals.
    ///
    /// Every listed player counts the round as played; changes for ids not
    /// in `players` are still added, under their id as display name.
    pub fn apply(&mut self, players: &[Player], changes: &HashMap<PlayerId, ScoreChange>) {
        for player in players {
            let entry = self.entry(&player.id, &player.name);
            entry.rounds_played = entry.rounds_played.saturating_add(1);
        }

        for (player_id, change) in changes {
            let entry = self.entry(player_id, player_id);
            entry.correct_vote_points = entry
                .correct_vote_points
                .saturating_add(change.correct_vote_bonus);
            entry.trick_points = entry.trick_points.saturating_add(change.trick_bonus);
            entry.total = entry.total.saturating_add(change.total);
        }
    }

    fn entry(&mut self, player_id: &str, display_name: &str) -> &mut Standing {
        self.standings
            .entry(player_id.to_string())
            .or_insert_with(|| Standing {
                player_id: player_id.to_string(),
                display_name: display_name.to_string(),
                ..Standing::default()
            })
    }

    pub fn total(&self, player_id: &str) -> u32 {
        self.standings.get(player_id).map(|s| s.total).unwrap_or(0)
    }

    pub fn get(&self, player_id: &str) -> Option<&Standing> {
        self.standings.get(player_id)
    }

    /// Standings sorted by total descending, then by name
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self.standings.values().cloned().collect();
        standings.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        standings
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
