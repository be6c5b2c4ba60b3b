//! One bluff round: reconcile submissions, collect votes, score.
//!
//! A [`Round`] owns the answer list produced by the reconciler, so the exact
//! same ids are used for presenting vote choices and for scoring.

mod reconcile;
pub mod results;
mod score;

pub use reconcile::AnswerReconciler;
pub use score::RoundScorer;

use crate::types::*;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// Result type for round operations
pub type RoundResult<T> = Result<T, RoundError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoundError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

/// Check the question can produce a correct answer, returning its text
pub fn validate_question(question: &Question) -> RoundResult<&str> {
    if question.options.is_empty() {
        return Err(RoundError::InvalidQuestion(
            "question has no options".to_string(),
        ));
    }

    question.correct_text().ok_or_else(|| {
        RoundError::InvalidQuestion(format!(
            "correct index {} out of range for {} options",
            question.correct_index,
            question.options.len()
        ))
    })
}

/// A round whose answer list is frozen and open for votes
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    number: RoundNumber,
    question: Question,
    answers: Vec<DisplayAnswer>,
}

impl Round {
    /// Reconcile the collected submissions and open the round for voting
    pub fn open<R: Rng + ?Sized>(
        number: RoundNumber,
        question: Question,
        submissions: &SubmissionSet,
        reconciler: &AnswerReconciler,
        rng: &mut R,
    ) -> RoundResult<Self> {
        let answers = reconciler.reconcile_with_rng(&question, submissions, rng)?;

        tracing::info!(
            "Round {} open for votes with {} answers",
            number,
            answers.len()
        );

        Ok(Self {
            number,
            question,
            answers,
        })
    }

    pub fn number(&self) -> RoundNumber {
        self.number
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Answers in display order
    pub fn answers(&self) -> &[DisplayAnswer] {
        &self.answers
    }

    /// Whether the id belongs to this round's answer list
    pub fn accepts(&self, answer_id: &AnswerId) -> bool {
        self.answers.iter().any(|a| a.id == *answer_id)
    }

    pub fn correct_answer(&self) -> Option<&DisplayAnswer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    /// The answer a player typed, if it survived reconciliation
    pub fn answer_of(&self, player_id: &str) -> Option<&DisplayAnswer> {
        self.answers.iter().find(|a| a.has_contributor(player_id))
    }

    /// Score the votes and close the round
    pub fn close(
        self,
        players: &[Player],
        votes: &VoteAssignment,
        scorer: &RoundScorer,
    ) -> RoundOutcome {
        let score_changes = scorer.score(players, &self.answers, votes);
        let most_popular =
            results::most_popular_answer(&self.answers, votes).map(|a| a.id.clone());
        let vote_counts = results::tally(&self.answers, votes);

        tracing::info!(
            "Round {} scored: {} votes, {} points awarded",
            self.number,
            votes.len(),
            score_changes
                .values()
                .fold(0u32, |sum, c| sum.saturating_add(c.total))
        );

        RoundOutcome {
            number: self.number,
            question: self.question,
            answers: self.answers,
            votes: votes.clone(),
            vote_counts,
            most_popular,
            score_changes,
            scored_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Everything the results screen needs about a finished round
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    pub number: RoundNumber,
    pub question: Question,
    pub answers: Vec<DisplayAnswer>,
    pub votes: VoteAssignment,
    pub vote_counts: Vec<(AnswerId, usize)>,
    pub most_popular: Option<AnswerId>,
    pub score_changes: HashMap<PlayerId, ScoreChange>,
    /// ISO timestamp of when scores were computed
    pub scored_at: String,
}

impl RoundOutcome {
    pub fn change_for(&self, player_id: &str) -> Option<&ScoreChange> {
        self.score_changes.get(player_id)
    }
}
