use rand::seq::IndexedRandom;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medikalak::{
    bank::QuestionBank,
    config::{DemoConfig, ScoringConfig},
    leaderboard::Leaderboard,
    round::{results, AnswerReconciler, Round, RoundScorer},
    simulate,
    types::{Player, PlayerSubmission, SubmissionSet, VoteAssignment},
};

fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medikalak=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MediKalak demo game...");

    let scoring = ScoringConfig::from_env();
    let demo = DemoConfig::from_env();

    let bank = match &demo.question_bank {
        Some(path) => QuestionBank::load(path)?,
        None => QuestionBank::sample(),
    };

    let questions: Vec<_> = match &demo.category {
        Some(category) => bank.in_category(category),
        None => bank.questions().iter().collect(),
    };
    if questions.is_empty() {
        return Err(format!("No questions in category {:?}", demo.category).into());
    }

    let mut you = Player::new(ulid::Ulid::new().to_string(), "You");
    you.is_current_user = true;
    let mut players = vec![you.clone()];
    players.extend(simulate::bot_players(demo.bots));

    let reconciler = AnswerReconciler::new(&scoring);
    let scorer = RoundScorer::new(&scoring);
    let mut leaderboard = Leaderboard::new();
    let mut rng = rand::rng();

    for number in 1..=demo.rounds {
        let Some(&question) = questions.choose(&mut rng) else {
            break;
        };
        tracing::info!("Round {}: {}", number, question.text);

        // The local player bluffs with a made-up answer
        let mut submissions = SubmissionSet::new();
        submissions.insert(PlayerSubmission::new(&you, "I honestly have no idea"));
        simulate::bot_submissions(question, &players, &mut submissions, &mut rng);

        let round = Round::open(number, question.clone(), &submissions, &reconciler, &mut rng)?;

        // The local player picks the first answer shown
        let mut votes = VoteAssignment::new();
        if let Some(choice) = round.answers().first() {
            votes.cast(you.id.clone(), choice.id.clone());
        }
        simulate::bot_votes(round.answers(), &players, &mut votes, &mut rng);

        let outcome = round.close(&players, &votes, &scorer);
        leaderboard.apply(&players, &outcome.score_changes);

        tracing::debug!("Round outcome: {}", serde_json::to_string_pretty(&outcome)?);

        for player in &players {
            if let Some(change) = outcome.change_for(&player.id) {
                if change.total > 0 {
                    tracing::info!("{}", results::score_breakdown(&player.name, change));
                }
            }
        }
    }

    for (rank, standing) in leaderboard.standings().iter().enumerate() {
        tracing::info!(
            "#{} {} - {} points ({} correct, {} tricks)",
            rank + 1,
            standing.display_name,
            standing.total,
            standing.correct_vote_points,
            standing.trick_points
        );
    }

    Ok(())
}
