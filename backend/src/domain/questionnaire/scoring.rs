//! Weighted normalisation and tier classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Answer, AnswerKind, Answers, Question, Questionnaire, sentiment_classify};

/// Every score is normalised against this per-question ceiling, including
/// questions whose own scale stops at 3.
const SCORE_CEILING: f64 = 5.0;

const LOW_UPPER_BOUND: f64 = 40.0;
const MODERATE_UPPER_BOUND: f64 = 70.0;

/// Why an answer set was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidAnswerReason {
    /// A catalogue question has no answer.
    Missing,
    /// The answer shape does not match the question kind.
    WrongKind {
        /// The kind the question expects.
        expected: AnswerKind,
    },
    /// A numeric answer falls outside the question's scale.
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: u8,
        /// Inclusive upper bound.
        max: u8,
    },
    /// The answer targets a question id outside the catalogue.
    UnknownQuestion,
}

impl InvalidAnswerReason {
    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing_answer",
            Self::WrongKind { .. } => "wrong_answer_kind",
            Self::OutOfRange { .. } => "answer_out_of_range",
            Self::UnknownQuestion => "unknown_question",
        }
    }
}

/// An answer set that cannot be scored against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid answer for question `{question_id}`: {reason}")]
pub struct InvalidAnswer {
    question_id: String,
    reason: InvalidAnswerReason,
}

impl InvalidAnswer {
    fn new(question_id: impl Into<String>, reason: InvalidAnswerReason) -> Self {
        Self {
            question_id: question_id.into(),
            reason,
        }
    }

    /// The question the failure refers to.
    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// What was wrong with the answer.
    pub fn reason(&self) -> &InvalidAnswerReason {
        &self.reason
    }
}

impl fmt::Display for InvalidAnswerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("no answer supplied"),
            Self::WrongKind { expected } => write!(f, "expected {expected}"),
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} is outside {min}..={max}")
            }
            Self::UnknownQuestion => f.write_str("no such question"),
        }
    }
}

/// Three-band classification of a normalised score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Score at or below 40.
    Low,
    /// Score above 40 and at or below 70.
    Moderate,
    /// Score above 70.
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        })
    }
}

/// Outcome of scoring one answer set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    normalized: f64,
    tier: RiskTier,
}

impl ScoreResult {
    pub(super) fn new(normalized: f64, tier: RiskTier) -> Self {
        Self { normalized, tier }
    }

    /// Normalised score; not clamped.
    pub fn normalized(&self) -> f64 {
        self.normalized
    }

    /// Tier derived from [`Self::normalized`].
    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    /// Human-readable one-line result, score rounded to two decimals.
    pub fn summary(&self) -> String {
        format!(
            "Your Risk Tolerance: {} (Normalized Score: {:.2})",
            self.tier, self.normalized
        )
    }
}

/// Reduce a complete answer set to a weighted score normalised to 0-100.
///
/// Each question contributes `raw * weight`, where `raw` is the numeric
/// answer or the sentiment of a text answer. The sum is divided by
/// `total_weight * 5`, so a catalogue containing a 1-3 question can never
/// reach 100.
///
/// # Errors
/// Returns [`InvalidAnswer`] when an answer is missing, has the wrong shape,
/// is out of range, or names a question outside the catalogue.
#[expect(
    clippy::float_arithmetic,
    reason = "weighted normalisation is defined over real-valued weights"
)]
pub fn compute_weighted_score(
    answers: &Answers,
    questionnaire: &Questionnaire,
) -> Result<f64, InvalidAnswer> {
    if let Some(unknown) = first_unknown_id(answers, questionnaire) {
        return Err(InvalidAnswer::new(unknown, InvalidAnswerReason::UnknownQuestion));
    }

    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    for question in questionnaire.questions() {
        let answer = answers
            .get(question.id())
            .ok_or_else(|| InvalidAnswer::new(question.id(), InvalidAnswerReason::Missing))?;
        let raw = raw_score(question, answer)?;
        total_score += raw * question.weight();
        total_weight += question.weight();
    }

    Ok(total_score / (total_weight * SCORE_CEILING) * 100.0)
}

/// Map a normalised score onto its tier; both boundaries are inclusive on
/// the lower band.
///
/// # Examples
/// ```
/// use risk_appetite::domain::questionnaire::{RiskTier, classify_tier};
///
/// assert_eq!(classify_tier(40.0), RiskTier::Low);
/// assert_eq!(classify_tier(70.0), RiskTier::Moderate);
/// assert_eq!(classify_tier(70.0001), RiskTier::High);
/// ```
#[must_use]
pub fn classify_tier(score: f64) -> RiskTier {
    if score <= LOW_UPPER_BOUND {
        RiskTier::Low
    } else if score <= MODERATE_UPPER_BOUND {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}

fn first_unknown_id<'a>(answers: &'a Answers, questionnaire: &Questionnaire) -> Option<&'a str> {
    // Lowest id wins so the report does not depend on hash order.
    answers
        .keys()
        .map(String::as_str)
        .filter(|id| questionnaire.question(id).is_none())
        .min()
}

fn raw_score(question: &Question, answer: &Answer) -> Result<f64, InvalidAnswer> {
    match (question.kind().scale_bounds(), answer) {
        (None, Answer::Text(text)) => Ok(f64::from(sentiment_classify(text))),
        (Some((min, max)), Answer::Scale(value)) => u8::try_from(*value)
            .ok()
            .filter(|raw| (min..=max).contains(raw))
            .map(f64::from)
            .ok_or_else(|| {
                InvalidAnswer::new(
                    question.id(),
                    InvalidAnswerReason::OutOfRange {
                        value: *value,
                        min,
                        max,
                    },
                )
            }),
        _ => Err(InvalidAnswer::new(
            question.id(),
            InvalidAnswerReason::WrongKind {
                expected: question.kind(),
            },
        )),
    }
}
