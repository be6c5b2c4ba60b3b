use medikalak::config::{BlankSubmissionPolicy, ScoringConfig};
use medikalak::leaderboard::Leaderboard;
use medikalak::round::{results, AnswerReconciler, Round, RoundError, RoundScorer};
use medikalak::simulate;
use medikalak::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn abcd_question() -> Question {
    Question {
        text: "Pick C".to_string(),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index: 2,
        explanation: String::new(),
        category: "Test".to_string(),
    }
}

fn players() -> Vec<Player> {
    vec![
        Player::new("p1", "Alice"),
        Player::new("p2", "Bob"),
        Player::new("p3", "Carol"),
    ]
}

fn find<'a>(answers: &'a [DisplayAnswer], text: &str) -> &'a DisplayAnswer {
    answers
        .iter()
        .find(|a| a.text == text)
        .unwrap_or_else(|| panic!("no answer with text {:?}", text))
}

/// End-to-end round: p1 and p2 bluff with "B", p3 types the correct "C"
#[test]
fn test_full_round_flow() {
    let players = players();
    let submissions: SubmissionSet = vec![
        PlayerSubmission::new(&players[0], "B"),
        PlayerSubmission::new(&players[1], "B"),
        PlayerSubmission::new(&players[2], "C"),
    ]
    .into_iter()
    .collect();

    let round = Round::open(
        1,
        abcd_question(),
        &submissions,
        &AnswerReconciler::default(),
        &mut StdRng::seed_from_u64(2024),
    )
    .expect("question is valid");

    // 1. Reconciliation
    let answers = round.answers();
    assert_eq!(answers.len(), 4, "B, C and two fillers");

    let b = find(answers, "B");
    let contributor_ids: Vec<_> = b.contributors.iter().map(|c| c.player_id.as_str()).collect();
    assert_eq!(contributor_ids, vec!["p1", "p2"]);
    assert!(!b.is_correct);

    let c = find(answers, "C");
    assert!(c.is_correct);
    assert_eq!(c.contributors.len(), 1);
    assert_eq!(c.contributors[0].player_id, "p3");

    let filler: HashSet<_> = answers
        .iter()
        .filter(|a| a.is_system_generated)
        .map(|a| a.text.as_str())
        .collect();
    assert_eq!(filler, HashSet::from(["A", "D"]));

    // 2. Voting against the same answer list
    let b_id = b.id.clone();
    let c_id = c.id.clone();
    assert!(round.accepts(&b_id) && round.accepts(&c_id));

    let mut votes = VoteAssignment::new();
    votes.cast("p1", c_id.clone());
    votes.cast("p2", b_id.clone());
    votes.cast("p3", c_id.clone());

    // 3. Scoring
    let outcome = round.close(&players, &votes, &RoundScorer::default());

    let p1 = outcome.change_for("p1").unwrap();
    let p2 = outcome.change_for("p2").unwrap();
    let p3 = outcome.change_for("p3").unwrap();

    assert_eq!(p1.correct_vote_bonus, 500);
    assert_eq!(p1.trick_bonus, 0);
    assert_eq!(p2.total, 0, "a contributor's own vote tricks nobody");
    assert_eq!(p3.correct_vote_bonus, 500, "voting for your own correct answer still counts");
    assert_eq!(p3.total, 500);

    assert_eq!(outcome.most_popular, Some(c_id));

    // 4. Leaderboard
    let mut board = Leaderboard::new();
    board.apply(&players, &outcome.score_changes);
    assert_eq!(board.total("p1"), 500);
    assert_eq!(board.total("p2"), 0);
    assert_eq!(board.standings()[0].display_name, "Alice");
}

#[test]
fn test_co_conspirators_both_get_full_trick_bonus() {
    let players = vec![
        Player::new("x", "Xavier"),
        Player::new("y", "Yara"),
        Player::new("z", "Zoe"),
        Player::new("w", "Walt"),
    ];
    let submissions: SubmissionSet = vec![
        PlayerSubmission::new(&players[0], "Penicillin"),
        PlayerSubmission::new(&players[1], "Penicillin"),
    ]
    .into_iter()
    .collect();

    let answers = AnswerReconciler::default()
        .reconcile_with_rng(&abcd_question(), &submissions, &mut StdRng::seed_from_u64(5))
        .unwrap();

    let penicillin = find(&answers, "Penicillin");
    assert_eq!(penicillin.contributors.len(), 2);

    let mut votes = VoteAssignment::new();
    votes.cast("z", penicillin.id.clone());
    votes.cast("w", penicillin.id.clone());
    votes.cast("x", penicillin.id.clone());

    let changes = RoundScorer::default().score(&players, &answers, &votes);

    assert_eq!(changes["x"].trick_bonus, 600);
    assert_eq!(changes["y"].trick_bonus, 600);
    assert_eq!(changes["z"].total, 0);
    assert_eq!(changes["w"].total, 0);
}

#[test]
fn test_reconcile_properties_hold_for_many_seeds() {
    let players = players();
    let texts = ["B", "", "C", "b", "Typo"];

    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let submissions: SubmissionSet = players
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerSubmission::new(p, texts[(i + seed as usize) % texts.len()]))
            .collect();

        let answers = AnswerReconciler::default()
            .reconcile_with_rng(&abcd_question(), &submissions, &mut rng)
            .unwrap();

        assert_eq!(answers.iter().filter(|a| a.is_correct).count(), 1);

        let distinct: HashSet<_> = answers.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(distinct.len(), answers.len());

        let ids: HashSet<_> = answers.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), answers.len());

        let contributors: usize = answers.iter().map(|a| a.contributors.len()).sum();
        assert_eq!(contributors, submissions.len());

        assert!(answers.len() >= 4);
        assert!(answers
            .iter()
            .all(|a| !(a.is_player_answer && a.is_system_generated)));
    }
}

#[test]
fn test_invalid_question_fails_fast() {
    let mut question = abcd_question();
    question.correct_index = 4;

    let result = Round::open(
        1,
        question,
        &SubmissionSet::new(),
        &AnswerReconciler::default(),
        &mut StdRng::seed_from_u64(1),
    );
    assert!(matches!(result, Err(RoundError::InvalidQuestion(_))));
}

#[test]
fn test_configured_rules_flow_through() {
    let config = ScoringConfig {
        correct_answer_points: 1,
        tricked_player_points: 2,
        min_answer_options: 6,
        blank_submissions: BlankSubmissionPolicy::Discard,
    };
    let players = players();
    let submissions: SubmissionSet = vec![
        PlayerSubmission::new(&players[0], " "),
        PlayerSubmission::new(&players[1], "Bluff"),
    ]
    .into_iter()
    .collect();

    let round = Round::open(
        1,
        abcd_question(),
        &submissions,
        &AnswerReconciler::new(&config),
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap();

    // Bluff + C + all three remaining options; the pool runs out before 6
    assert_eq!(round.answers().len(), 5);
    assert!(round.answer_of("p1").is_none());

    let bluff_id = round.answer_of("p2").unwrap().id.clone();
    let correct_id = round.correct_answer().unwrap().id.clone();
    let mut votes = VoteAssignment::new();
    votes.cast("p1", bluff_id);
    votes.cast("p3", correct_id);

    let outcome = round.close(&players, &votes, &RoundScorer::new(&config));
    assert_eq!(outcome.change_for("p2").unwrap().total, 2);
    assert_eq!(outcome.change_for("p3").unwrap().total, 1);
}

#[test]
fn test_simulated_game_accumulates_scores() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut you = Player::new("you", "You");
    you.is_current_user = true;
    let mut players = vec![you.clone()];
    players.extend(simulate::bot_players(4));

    let reconciler = AnswerReconciler::default();
    let scorer = RoundScorer::default();
    let mut board = Leaderboard::new();
    let mut expected_total = 0;

    for number in 1..=3 {
        let mut submissions = SubmissionSet::new();
        submissions.insert(PlayerSubmission::new(&you, "Something plausible"));
        simulate::bot_submissions(&abcd_question(), &players, &mut submissions, &mut rng);

        let round =
            Round::open(number, abcd_question(), &submissions, &reconciler, &mut rng).unwrap();

        let mut votes = VoteAssignment::new();
        let correct_id = round.correct_answer().unwrap().id.clone();
        votes.cast("you", correct_id);
        simulate::bot_votes(round.answers(), &players, &mut votes, &mut rng);
        assert_eq!(votes.len(), players.len());

        let outcome = round.close(&players, &votes, &scorer);
        assert_eq!(outcome.change_for("you").unwrap().correct_vote_bonus, 500);
        expected_total += outcome.change_for("you").unwrap().total;

        board.apply(&players, &outcome.score_changes);
    }

    assert_eq!(board.total("you"), expected_total);
    assert_eq!(board.get("you").unwrap().rounds_played, 3);
    assert_eq!(board.standings().len(), players.len());

    let breakdown = results::score_breakdown("You", &ScoreChange::default());
    assert!(breakdown.contains("Total this round: 0"));
}
