//! Questionnaire handlers: list the catalogue and score an answer set.
//!
//! ```text
//! GET /api/v1/questions
//! POST /api/v1/assessments {"answers":{"general_risk_appetite":4,"experience_with_loss":"..."}}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::questionnaire::{
    Answer, AnswerKind, Answers, InvalidAnswer, Question, RiskTier, ScoreResult,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Wire name of an [`AnswerKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKindDto {
    /// Integer answer between `min` and `max`.
    Scale,
    /// Free-text answer.
    Text,
}

/// One catalogue entry as shown to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Key to answer this question under.
    #[schema(example = "general_risk_appetite")]
    pub id: String,
    /// Short heading.
    #[schema(example = "General Risk Appetite")]
    pub title: String,
    /// Full prompt text.
    pub prompt: String,
    /// Scoring weight.
    #[schema(example = 2.0)]
    pub weight: f64,
    /// Expected answer shape.
    pub answer_kind: AnswerKindDto,
    /// Smallest accepted value; absent for text questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u8>,
    /// Largest accepted value; absent for text questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u8>,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        let kind = question.kind();
        let bounds = kind.scale_bounds();
        Self {
            id: question.id().to_owned(),
            title: question.title().to_owned(),
            prompt: question.prompt().to_owned(),
            weight: question.weight(),
            answer_kind: match kind {
                AnswerKind::Scale1to5 | AnswerKind::Scale1to3 => AnswerKindDto::Scale,
                AnswerKind::FreeText => AnswerKindDto::Text,
            },
            min: bounds.map(|(min, _)| min),
            max: bounds.map(|(_, max)| max),
        }
    }
}

/// A single answer: an integer for scale questions, a string for text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Integer answer for a scale question.
    Scale(i64),
    /// Free text.
    Text(String),
}

impl From<AnswerValue> for Answer {
    fn from(value: AnswerValue) -> Self {
        match value {
            AnswerValue::Scale(value) => Answer::Scale(value),
            AnswerValue::Text(text) => Answer::Text(text),
        }
    }
}

/// Request body for `POST /api/v1/assessments`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    /// Answers keyed by question id.
    pub answers: BTreeMap<String, AnswerValue>,
}

impl From<AssessmentRequest> for Answers {
    fn from(value: AssessmentRequest) -> Self {
        value
            .answers
            .into_iter()
            .map(|(id, answer)| (id, Answer::from(answer)))
            .collect()
    }
}

/// Scored assessment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    /// Weighted score on a 0-100 scale, unrounded.
    #[schema(example = 55.15)]
    pub normalized_score: f64,
    /// `Low`, `Moderate`, or `High`.
    #[schema(value_type = String, example = "Moderate")]
    pub tier: RiskTier,
    /// One-line summary with the score to two decimals.
    #[schema(example = "Your Risk Tolerance: Moderate (Normalized Score: 55.15)")]
    pub summary: String,
}

impl From<ScoreResult> for AssessmentResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            normalized_score: result.normalized(),
            tier: result.tier(),
            summary: result.summary(),
        }
    }
}

fn map_invalid_answer(err: InvalidAnswer) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "questionId": err.question_id(),
        "code": err.reason().code(),
        "reason": err.reason().to_string(),
    }))
}

/// List the catalogue in presentation order.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    responses(
        (status = 200, description = "Ordered questions", body = [QuestionResponse])
    ),
    tags = ["questionnaire"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(state: web::Data<HttpState>) -> web::Json<Vec<QuestionResponse>> {
    web::Json(
        state
            .questionnaire
            .questions()
            .iter()
            .map(QuestionResponse::from)
            .collect(),
    )
}

/// Score one complete answer set for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/assessments",
    request_body = AssessmentRequest,
    responses(
        (status = 200, description = "Score and tier", body = AssessmentResponse),
        (status = 400, description = "Missing, unknown, or out-of-range answer", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["questionnaire"],
    operation_id = "createAssessment"
)]
#[post("/assessments")]
pub async fn create_assessment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssessmentRequest>,
) -> ApiResult<web::Json<AssessmentResponse>> {
    let username = session.require_username()?;
    let answers = Answers::from(payload.into_inner());
    let result = state
        .questionnaire
        .score(&answers)
        .map_err(map_invalid_answer)?;
    tracing::info!(
        username = %username,
        score = result.normalized(),
        tier = %result.tier(),
        "assessment scored"
    );
    Ok(web::Json(AssessmentResponse::from(result)))
}

#[cfg(test)]
#[path = "questionnaire_tests.rs"]
mod tests;
