//! Read-only views over a scored round for the results screen

use crate::types::*;

/// Vote counts per answer, in display order
pub fn tally(answers: &[DisplayAnswer], votes: &VoteAssignment) -> Vec<(AnswerId, usize)> {
    answers
        .iter()
        .map(|a| (a.id.clone(), votes.voters_for(&a.id).len()))
        .collect()
}

/// The answer with the most votes.
///
/// Ties go to the answer shown first. Returns `None` when nobody voted for
/// any displayed answer.
pub fn most_popular_answer<'a>(
    answers: &'a [DisplayAnswer],
    votes: &VoteAssignment,
) -> Option<&'a DisplayAnswer> {
    let mut best: Option<(&DisplayAnswer, usize)> = None;
    for answer in answers {
        let count = votes.voters_for(&answer.id).len();
        if count > best.map(|(_, c)| c).unwrap_or(0) {
            best = Some((answer, count));
        }
    }
    best.map(|(answer, _)| answer)
}

/// Human readable explanation of how a player earned this round's points
pub fn score_breakdown(player_name: &str, change: &ScoreChange) -> String {
    let mut message = format!("{}'s points this round:\n", player_name);

    if change.correct_vote_bonus > 0 {
        message.push_str(&format!(
            "\n• Voted for correct answer: +{}",
            change.correct_vote_bonus
        ));
    }

    if change.trick_bonus > 0 {
        message.push_str(&format!("\n• Tricked other players: +{}", change.trick_bonus));
    }

    if !change.details.is_empty() {
        message.push_str("\n\nDetailed breakdown:");
        for detail in &change.details {
            message.push_str(&format!("\n• {}: +{}", detail.text, detail.points));
        }
    }

    message.push_str(&format!("\n\nTotal this round: {}", signed(change.total)));
    message
}

fn signed(points: u32) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}
