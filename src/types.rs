use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type RoundNumber = u32;

/// A multiple choice question as stored in the question bank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "question")]
    pub text: String,
    pub options: Vec<String>,
    /// 0-based index into `options`
    #[serde(alias = "correctAnswer")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: String,
}

impl Question {
    /// Text of the verified-correct option, if the index is in range
    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_current_user: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_current_user: false,
        }
    }
}

/// Free-text answer a player typed during the collection phase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSubmission {
    pub player_id: PlayerId,
    pub player_name: String,
    pub raw_answer_text: String,
}

impl PlayerSubmission {
    pub fn new(player: &Player, text: impl Into<String>) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            raw_answer_text: text.into(),
        }
    }
}

/// Submissions for one round, at most one per player, in the order they arrived.
///
/// Re-submitting replaces the earlier text but keeps the player's original
/// position, so "first seen" ordering stays stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionSet {
    entries: Vec<PlayerSubmission>,
}

impl SubmissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a submission, returning the one it replaced
    pub fn insert(&mut self, submission: PlayerSubmission) -> Option<PlayerSubmission> {
        match self
            .entries
            .iter_mut()
            .find(|s| s.player_id == submission.player_id)
        {
            Some(existing) => Some(std::mem::replace(existing, submission)),
            None => {
                self.entries.push(submission);
                None
            }
        }
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerSubmission> {
        self.entries.iter().find(|s| s.player_id == player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.get(player_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerSubmission> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PlayerSubmission> for SubmissionSet {
    fn from_iter<I: IntoIterator<Item = PlayerSubmission>>(iter: I) -> Self {
        let mut set = Self::new();
        for submission in iter {
            set.insert(submission);
        }
        set
    }
}

/// A player who typed the exact text of a displayed answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Contributor {
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Identifier of a displayed answer, unique within a round.
///
/// The sentinel variants can never collide with a player id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AnswerId {
    /// Player-authored answer, keyed by its first contributor
    Player(PlayerId),
    /// Correct answer nobody typed
    Correct,
    /// Filler option, indexed by the order it was drawn
    System(usize),
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerId::Player(id) => write!(f, "{}", id),
            AnswerId::Correct => write!(f, "correct"),
            AnswerId::System(index) => write!(f, "system_{}", index),
        }
    }
}

/// A de-duplicated, votable answer option shown to all players
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayAnswer {
    pub id: AnswerId,
    pub text: String,
    /// Empty for the correct-only and filler entries
    pub contributors: Vec<Contributor>,
    pub is_correct: bool,
    pub is_player_answer: bool,
    pub is_system_generated: bool,
}

impl DisplayAnswer {
    pub fn has_contributor(&self, player_id: &str) -> bool {
        self.contributors.iter().any(|c| c.player_id == player_id)
    }

    /// Whether votes on this answer earn its authors a trick bonus
    pub fn is_bluff(&self) -> bool {
        !self.is_correct && self.is_player_answer && !self.is_system_generated
    }
}

/// Realized votes for a round: answer id -> voters in the order they voted.
///
/// A voter can appear under only one answer. Casting again moves the vote
/// (last write wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteAssignment {
    votes: Vec<(AnswerId, Vec<PlayerId>)>,
}

impl VoteAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote, returning the answer the voter previously picked
    pub fn cast(&mut self, voter_id: impl Into<PlayerId>, answer_id: AnswerId) -> Option<AnswerId> {
        let voter_id = voter_id.into();
        let previous = self.vote_of(&voter_id).cloned();

        if previous.is_some() {
            for (_, voters) in self.votes.iter_mut() {
                voters.retain(|v| *v != voter_id);
            }
            self.votes.retain(|(_, voters)| !voters.is_empty());
        }

        match self.votes.iter_mut().find(|(id, _)| *id == answer_id) {
            Some((_, voters)) => voters.push(voter_id),
            None => self.votes.push((answer_id, vec![voter_id])),
        }
        previous
    }

    pub fn voters_for(&self, answer_id: &AnswerId) -> &[PlayerId] {
        self.votes
            .iter()
            .find(|(id, _)| id == answer_id)
            .map(|(_, voters)| voters.as_slice())
            .unwrap_or(&[])
    }

    pub fn vote_of(&self, voter_id: &str) -> Option<&AnswerId> {
        self.votes
            .iter()
            .find(|(_, voters)| voters.iter().any(|v| v == voter_id))
            .map(|(answer_id, _)| answer_id)
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.vote_of(voter_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnswerId, &[PlayerId])> {
        self.votes.iter().map(|(id, voters)| (id, voters.as_slice()))
    }

    /// Total number of votes cast
    pub fn len(&self) -> usize {
        self.votes.iter().map(|(_, voters)| voters.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDetailKind {
    Correct,
    Tricked,
}

/// One line of a player's round breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreDetail {
    pub kind: ScoreDetailKind,
    pub text: String,
    pub points: u32,
}

/// Points a player earned in a single round
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreChange {
    pub correct_vote_bonus: u32,
    pub trick_bonus: u32,
    pub total: u32,
    /// Audit trail, not used for the total
    pub details: Vec<ScoreDetail>,
}
