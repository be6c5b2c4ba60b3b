use crate::config::ScoringConfig;
use crate::types::*;
use std::collections::HashMap;

/// Turns a round's votes into per-player point changes
#[derive(Debug, Clone)]
pub struct RoundScorer {
    correct_answer_points: u32,
    tricked_player_points: u32,
}

impl Default for RoundScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl RoundScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            correct_answer_points: config.correct_answer_points,
            tricked_player_points: config.tricked_player_points,
        }
    }

    /// Compute the score change of every player for one round.
    ///
    /// Every player gets an entry, even without a submission or vote. Votes
    /// for ids that are not in `answers` count towards nothing.
    pub fn score(
        &self,
        players: &[Player],
        answers: &[DisplayAnswer],
        votes: &VoteAssignment,
    ) -> HashMap<PlayerId, ScoreChange> {
        let mut changes: HashMap<PlayerId, ScoreChange> = players
            .iter()
            .map(|p| (p.id.clone(), ScoreChange::default()))
            .collect();

        for (answer_id, voters) in votes.iter() {
            if !answers.iter().any(|a| a.id == *answer_id) {
                tracing::warn!(
                    "Ignoring {} vote(s) for unknown answer {}",
                    voters.len(),
                    answer_id
                );
            }
        }

        self.apply_correct_votes(&mut changes, answers, votes);
        self.apply_trick_bonuses(&mut changes, players, answers, votes);

        tracing::debug!(
            players = players.len(),
            votes = votes.len(),
            points_awarded = changes
                .values()
                .fold(0u32, |sum, c| sum.saturating_add(c.total)),
            "Scored round"
        );

        changes
    }

    fn apply_correct_votes(
        &self,
        changes: &mut HashMap<PlayerId, ScoreChange>,
        answers: &[DisplayAnswer],
        votes: &VoteAssignment,
    ) {
        let Some(correct) = answers.iter().find(|a| a.is_correct) else {
            tracing::warn!("No correct answer in round, skipping correct-vote bonus");
            return;
        };

        for voter_id in votes.voters_for(&correct.id) {
            if let Some(change) = changes.get_mut(voter_id) {
                change.correct_vote_bonus = self.correct_answer_points;
                change.total = change.total.saturating_add(self.correct_answer_points);
                change.details.push(ScoreDetail {
                    kind: ScoreDetailKind::Correct,
                    text: "Voted for correct answer".to_string(),
                    points: self.correct_answer_points,
                });
            }
        }
    }

    fn apply_trick_bonuses(
        &self,
        changes: &mut HashMap<PlayerId, ScoreChange>,
        players: &[Player],
        answers: &[DisplayAnswer],
        votes: &VoteAssignment,
    ) {
        for answer in answers.iter().filter(|a| a.is_bluff()) {
            // Co-authors voting for their own answer trick nobody
            let tricked: Vec<&PlayerId> = votes
                .voters_for(&answer.id)
                .iter()
                .filter(|voter_id| !answer.has_contributor(voter_id))
                .collect();

            if tricked.is_empty() {
                continue;
            }

            let points = u32::try_from(tricked.len())
                .unwrap_or(u32::MAX)
                .saturating_mul(self.tricked_player_points);
            let names = tricked
                .iter()
                .map(|id| {
                    players
                        .iter()
                        .find(|p| p.id == **id)
                        .map(|p| p.name.as_str())
                        .unwrap_or("Unknown")
                })
                .collect::<Vec<_>>()
                .join(", ");

            // Each contributor gets the full amount, it is not split
            for contributor in &answer.contributors {
                if let Some(change) = changes.get_mut(&contributor.player_id) {
                    change.trick_bonus = change.trick_bonus.saturating_add(points);
                    change.total = change.total.saturating_add(points);
                    change.details.push(ScoreDetail {
                        kind: ScoreDetailKind::Tricked,
                        text: format!("Tricked {} player(s): {}", tricked.len(), names),
                        points,
                    });
                }
            }
        }
    }
}
