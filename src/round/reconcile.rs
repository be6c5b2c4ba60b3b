use super::{validate_question, RoundResult};
use crate::config::{BlankSubmissionPolicy, ScoringConfig};
use crate::types::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Builds the shuffled, de-duplicated answer list players vote on
#[derive(Debug, Clone)]
pub struct AnswerReconciler {
    min_options: usize,
    blank_policy: BlankSubmissionPolicy,
}

impl Default for AnswerReconciler {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

/// Mutable grouping state for one distinct answer text
struct Group {
    text: String,
    contributors: Vec<Contributor>,
}

impl AnswerReconciler {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            min_options: config.min_answer_options,
            blank_policy: config.blank_submissions,
        }
    }

    pub fn min_options(&self) -> usize {
        self.min_options
    }

    /// Reconcile using the thread-local RNG
    pub fn reconcile(
        &self,
        question: &Question,
        submissions: &SubmissionSet,
    ) -> RoundResult<Vec<DisplayAnswer>> {
        self.reconcile_with_rng(question, submissions, &mut rand::rng())
    }

    pub fn reconcile_with_rng<R: Rng + ?Sized>(
        &self,
        question: &Question,
        submissions: &SubmissionSet,
        rng: &mut R,
    ) -> RoundResult<Vec<DisplayAnswer>> {
        let correct_text = validate_question(question)?;

        let mut answers = self.group_submissions(submissions, correct_text);

        if !answers.iter().any(|a| a.is_correct) {
            answers.push(DisplayAnswer {
                id: AnswerId::Correct,
                text: correct_text.to_string(),
                contributors: Vec::new(),
                is_correct: true,
                is_player_answer: false,
                is_system_generated: false,
            });
        }

        let fillers = self.draw_fillers(question, &answers, rng);
        answers.extend(fillers);

        answers.shuffle(rng);

        tracing::debug!(
            options = answers.len(),
            submissions = submissions.len(),
            player_answers = answers.iter().filter(|a| a.is_player_answer).count(),
            fillers = answers.iter().filter(|a| a.is_system_generated).count(),
            "Reconciled answers"
        );

        Ok(answers)
    }

    /// First pass collects contributors per exact text, second pass freezes
    /// each group into a player answer
    fn group_submissions(
        &self,
        submissions: &SubmissionSet,
        correct_text: &str,
    ) -> Vec<DisplayAnswer> {
        let mut groups: Vec<Group> = Vec::new();
        let mut by_text: HashMap<&str, usize> = HashMap::new();

        for submission in submissions.iter() {
            let text = submission.raw_answer_text.as_str();
            if self.blank_policy == BlankSubmissionPolicy::Discard && text.trim().is_empty() {
                tracing::debug!("Discarding blank answer from {}", submission.player_id);
                continue;
            }

            let contributor = Contributor {
                player_id: submission.player_id.clone(),
                player_name: submission.player_name.clone(),
            };

            match by_text.get(text) {
                Some(&index) => groups[index].contributors.push(contributor),
                None => {
                    by_text.insert(text, groups.len());
                    groups.push(Group {
                        text: text.to_string(),
                        contributors: vec![contributor],
                    });
                }
            }
        }

        groups
            .into_iter()
            .map(|group| DisplayAnswer {
                // Groups are never empty, and a player contributes to one group only
                id: AnswerId::Player(group.contributors[0].player_id.clone()),
                is_correct: group.text == correct_text,
                text: group.text,
                contributors: group.contributors,
                is_player_answer: true,
                is_system_generated: false,
            })
            .collect()
    }

    fn draw_fillers<R: Rng + ?Sized>(
        &self,
        question: &Question,
        answers: &[DisplayAnswer],
        rng: &mut R,
    ) -> Vec<DisplayAnswer> {
        let needed = self.min_options.saturating_sub(answers.len());
        if needed == 0 {
            return Vec::new();
        }

        let existing: HashSet<&str> = answers.iter().map(|a| a.text.as_str()).collect();
        let mut pool: Vec<&str> = Vec::new();
        for (index, option) in question.options.iter().enumerate() {
            let option = option.as_str();
            // Duplicate options in the question would otherwise yield two equal fillers
            if index != question.correct_index
                && !existing.contains(option)
                && !pool.contains(&option)
            {
                pool.push(option);
            }
        }

        if pool.len() < needed {
            tracing::debug!(
                "Only {} filler options available, {} needed",
                pool.len(),
                needed
            );
        }

        pool.shuffle(rng);
        pool.into_iter()
            .take(needed)
            .enumerate()
            .map(|(index, text)| DisplayAnswer {
                id: AnswerId::System(index),
                text: text.to_string(),
                contributors: Vec::new(),
                is_correct: false,
                is_player_answer: false,
                is_system_generated: true,
            })
            .collect()
    }
}
