//! Stand-ins for remote players during local games
//!
//! Bots bluff with one of the question's wrong options and vote for the
//! correct answer half the time.

use crate::types::*;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Create bot players with random friendly names
pub fn bot_players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|index| {
            let name = petname::petname(2, " ")
                .map(|name| title_case(&name))
                .unwrap_or_else(|| format!("Player {}", index + 1));
            Player::new(ulid::Ulid::new().to_string(), name)
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Submit a random wrong option for every bot that has not answered yet
pub fn bot_submissions<R: Rng + ?Sized>(
    question: &Question,
    players: &[Player],
    submissions: &mut SubmissionSet,
    rng: &mut R,
) {
    let wrong_options: Vec<&String> = question
        .options
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != question.correct_index)
        .map(|(_, option)| option)
        .collect();

    for player in players {
        if player.is_current_user || submissions.contains(&player.id) {
            continue;
        }

        let Some(text) = wrong_options.choose(rng) else {
            tracing::warn!("Question has no wrong options for bots to bluff with");
            return;
        };

        submissions.insert(PlayerSubmission::new(player, text.as_str()));
    }
}

/// Cast a vote for every bot that has not voted yet
pub fn bot_votes<R: Rng + ?Sized>(
    answers: &[DisplayAnswer],
    players: &[Player],
    votes: &mut VoteAssignment,
    rng: &mut R,
) {
    let correct = answers.iter().find(|a| a.is_correct);

    for player in players {
        if player.is_current_user || votes.has_voted(&player.id) {
            continue;
        }

        let target = match correct {
            Some(answer) if rng.random_bool(0.5) => Some(answer),
            _ => answers.choose(rng),
        };

        if let Some(answer) = target {
            votes.cast(player.id.clone(), answer.id.clone());
        }
    }
}
