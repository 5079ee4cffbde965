//! Risk appetite questionnaire: question model, answers, and scoring.
//!
//! A [`Questionnaire`] is an ordered, validated set of weighted questions.
//! Order matters only for presentation; scoring is keyed by question id.
//!
//! Public surface:
//! - [`Question`], [`AnswerKind`], [`Answer`], [`Answers`]
//! - [`Questionnaire`] with [`Questionnaire::standard`] for the fixed catalogue
//! - [`sentiment_classify`], [`compute_weighted_score`], [`classify_tier`]
//! - [`ScoreResult`], [`RiskTier`], [`InvalidAnswer`]

mod catalog;
mod scoring;
mod sentiment;

use std::collections::{HashMap, HashSet};
use std::fmt;

pub use scoring::{
    InvalidAnswer, InvalidAnswerReason, RiskTier, ScoreResult, classify_tier,
    compute_weighted_score,
};
pub use sentiment::{NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS, sentiment_classify};

/// Answers keyed by question id.
pub type Answers = HashMap<String, Answer>;

/// The input shape a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    /// Integer from 1 to 5.
    Scale1to5,
    /// Integer from 1 to 3.
    Scale1to3,
    /// Free text scored by the keyword sentiment heuristic.
    FreeText,
}

impl AnswerKind {
    /// Inclusive bounds for numeric kinds; `None` for free text.
    #[must_use]
    pub fn scale_bounds(self) -> Option<(u8, u8)> {
        match self {
            Self::Scale1to5 => Some((1, 5)),
            Self::Scale1to3 => Some((1, 3)),
            Self::FreeText => None,
        }
    }
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scale_bounds() {
            Some((min, max)) => write!(f, "an integer from {min} to {max}"),
            None => f.write_str("free text"),
        }
    }
}

/// A single answer as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A numeric scale answer; range is checked against the question.
    Scale(i64),
    /// A free-text answer.
    Text(String),
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Self::Scale(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Errors raised while building a questionnaire.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuestionnaireError {
    /// A questionnaire needs at least one question.
    #[error("questionnaire must contain at least one question")]
    Empty,
    /// Question ids must not be blank.
    #[error("question id must not be empty")]
    EmptyId,
    /// Question ids must be unique.
    #[error("duplicate question id `{id}`")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
    /// Weights must be finite and strictly positive.
    #[error("question `{id}` has invalid weight {weight}; weights must be finite and > 0")]
    InvalidWeight {
        /// The offending question id.
        id: String,
        /// The rejected weight.
        weight: f64,
    },
}

/// One weighted questionnaire item.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: String,
    title: String,
    prompt: String,
    weight: f64,
    kind: AnswerKind,
}

impl Question {
    /// Validate and construct a question.
    ///
    /// # Examples
    /// ```
    /// use risk_appetite::domain::questionnaire::{AnswerKind, Question};
    ///
    /// let question = Question::new("horizon", "Horizon", "Pick 1-3", 1.0, AnswerKind::Scale1to3)
    ///     .expect("valid question");
    /// assert_eq!(question.id(), "horizon");
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        prompt: impl Into<String>,
        weight: f64,
        kind: AnswerKind,
    ) -> Result<Self, QuestionnaireError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(QuestionnaireError::EmptyId);
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(QuestionnaireError::InvalidWeight { id, weight });
        }
        Ok(Self {
            id,
            title: title.into(),
            prompt: prompt.into(),
            weight,
            kind,
        })
    }

    /// Stable key answers are matched against.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short heading for presentation.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full prompt shown to the respondent.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Scoring weight; always finite and positive.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Accepted answer shape.
    pub fn kind(&self) -> AnswerKind {
        self.kind
    }
}

/// Ordered catalogue of questions.
///
/// ## Invariants
/// - At least one question.
/// - Ids are unique and non-blank; weights are finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    /// Build a questionnaire from already validated questions.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionnaireError::DuplicateId {
                    id: question.id().to_owned(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// The fixed ten-question risk appetite catalogue.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            questions: catalog::standard_questions(),
        }
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    /// Sum of all question weights.
    pub fn total_weight(&self) -> f64 {
        self.questions.iter().map(Question::weight).sum()
    }

    /// Score a complete set of answers and classify the result.
    ///
    /// # Examples
    /// ```
    /// use risk_appetite::domain::questionnaire::{Answers, Questionnaire, RiskTier};
    ///
    /// let questionnaire = Questionnaire::standard();
    /// let answers: Answers = questionnaire
    ///     .questions()
    ///     .iter()
    ///     .map(|q| match q.kind().scale_bounds() {
    ///         Some((_, max)) => (q.id().to_owned(), i64::from(max).into()),
    ///         None => (q.id().to_owned(), "a valuable lesson".into()),
    ///     })
    ///     .collect();
    /// let result = questionnaire.score(&answers).expect("complete answers");
    /// assert_eq!(result.tier(), RiskTier::High);
    /// ```
    pub fn score(&self, answers: &Answers) -> Result<ScoreResult, InvalidAnswer> {
        let normalized = compute_weighted_score(answers, self)?;
        Ok(ScoreResult::new(normalized, classify_tier(normalized)))
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}
