//! Question bank loading
//!
//! Reads the app's JSON question list (`question`, `options`,
//! `correctAnswer`, `explanation`, `category`) and rejects questions that
//! could not produce a correct answer.

use crate::round::{validate_question, RoundError};
use crate::types::Question;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::path::Path;

pub type BankResult<T> = Result<T, BankError>;

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Question bank is empty")]
    Empty,

    #[error("Question {index} is invalid: {source}")]
    InvalidQuestion { index: usize, source: RoundError },
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> BankResult<Self> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        for (index, question) in questions.iter().enumerate() {
            validate_question(question)
                .map_err(|source| BankError::InvalidQuestion { index, source })?;
        }

        Ok(Self { questions })
    }

    pub fn from_json(json: &str) -> BankResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn load(path: impl AsRef<Path>) -> BankResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let bank = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded {} questions from {}",
            bank.questions.len(),
            path.display()
        );
        Ok(bank)
    }

    /// Built-in questions used when no bank file is configured
    pub fn sample() -> Self {
        let questions = vec![
            sample_question(
                "Which of the following is NOT a function of the liver?",
                [
                    "Detoxification of drugs",
                    "Production of insulin",
                    "Storage of glycogen",
                    "Synthesis of bile",
                ],
                1,
                "The liver does not produce insulin. Insulin is produced by the beta cells of the pancreas.",
                "Physiology",
            ),
            sample_question(
                "Which cranial nerve is responsible for taste?",
                [
                    "Facial nerve (VII)",
                    "Trigeminal nerve (V)",
                    "Glossopharyngeal nerve (IX)",
                    "Vagus nerve (X)",
                ],
                0,
                "The facial nerve (VII) is responsible for taste on the anterior two-thirds of the tongue.",
                "Anatomy",
            ),
            sample_question(
                "Deficiency of which vitamin causes scurvy?",
                ["Vitamin A", "Vitamin B12", "Vitamin C", "Vitamin D"],
                2,
                "Vitamin C is required for collagen synthesis.",
                "Biochemistry",
            ),
            sample_question(
                "Which antibiotic was discovered by Alexander Fleming?",
                ["Streptomycin", "Penicillin", "Tetracycline", "Vancomycin"],
                1,
                "Fleming discovered penicillin in 1928.",
                "Pharmacology",
            ),
        ];

        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.questions
            .iter()
            .map(|q| q.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Questions of one category (case-insensitive)
    pub fn in_category(&self, category: &str) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Question> {
        self.questions.choose(rng)
    }
}

fn sample_question(
    text: &str,
    options: [&str; 4],
    correct_index: usize,
    explanation: &str,
    category: &str,
) -> Question {
    Question {
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
        explanation: explanation.to_string(),
        category: category.to_string(),
    }
}
