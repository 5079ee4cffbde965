//! Behaviour tests for questionnaire scoring.
//!
//! Scenarios cover the fixed-ceiling normalisation, the keyword sentiment
//! reading of free text, and rejection of incomplete or out-of-range
//! answer sets.

use std::cell::RefCell;

use risk_appetite::domain::questionnaire::{
    Answer, AnswerKind, Answers, InvalidAnswer, Question, Questionnaire, ScoreResult,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct ScoringWorld {
    questionnaire: RefCell<Option<Questionnaire>>,
    answers: RefCell<Answers>,
    outcome: RefCell<Option<Result<ScoreResult, InvalidAnswer>>>,
}

impl ScoringWorld {
    fn new() -> Self {
        Self {
            questionnaire: RefCell::new(None),
            answers: RefCell::new(Answers::new()),
            outcome: RefCell::new(None),
        }
    }

    fn set_questionnaire(&self, questionnaire: Questionnaire) {
        *self.questionnaire.borrow_mut() = Some(questionnaire);
    }

    fn questions_of<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(AnswerKind) -> bool,
    {
        self.questionnaire
            .borrow()
            .as_ref()
            .expect("questionnaire chosen")
            .questions()
            .iter()
            .filter(|question| keep(question.kind()))
            .cloned()
            .collect()
    }

    fn answer(&self, id: &str, answer: Answer) {
        self.answers.borrow_mut().insert(id.to_owned(), answer);
    }

    fn result(&self) -> ScoreResult {
        self.outcome
            .borrow()
            .clone()
            .expect("answers scored")
            .expect("scoring should succeed")
    }

    fn failure(&self) -> InvalidAnswer {
        self.outcome
            .borrow()
            .clone()
            .expect("answers scored")
            .expect_err("scoring should fail")
    }
}

fn uniform(count: usize, kind: AnswerKind) -> Questionnaire {
    let questions = (0..count)
        .map(|index| {
            let id = format!("q{index}");
            Question::new(id.clone(), id, "prompt", 1.0, kind).expect("valid question")
        })
        .collect();
    Questionnaire::new(questions).expect("valid questionnaire")
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::new()
}

#[given("the standard questionnaire")]
fn the_standard_questionnaire(world: &ScoringWorld) {
    world.set_questionnaire(Questionnaire::standard());
}

#[given("a questionnaire of {count} scale questions")]
fn a_questionnaire_of_scale_questions(world: &ScoringWorld, count: usize) {
    world.set_questionnaire(uniform(count, AnswerKind::Scale1to5));
}

#[given("a questionnaire of {count} text questions")]
fn a_questionnaire_of_text_questions(world: &ScoringWorld, count: usize) {
    world.set_questionnaire(uniform(count, AnswerKind::FreeText));
}

#[when("every scale answer is set to {value}")]
fn every_scale_answer_is_set_to(world: &ScoringWorld, value: i64) {
    for question in world.questions_of(|kind| kind != AnswerKind::FreeText) {
        world.answer(question.id(), Answer::Scale(value));
    }
}

#[when("every scale question gets its top value")]
fn every_scale_question_gets_its_top_value(world: &ScoringWorld) {
    for question in world.questions_of(|kind| kind != AnswerKind::FreeText) {
        let (_, max) = question.kind().scale_bounds().expect("scale question");
        world.answer(question.id(), Answer::Scale(i64::from(max)));
    }
}

#[when("every text answer is \"{text}\"")]
fn every_text_answer_is(world: &ScoringWorld, text: String) {
    for question in world.questions_of(|kind| kind == AnswerKind::FreeText) {
        world.answer(question.id(), Answer::Text(text.clone()));
    }
}

#[when("the answer to {id} is removed")]
fn the_answer_is_removed(world: &ScoringWorld, id: String) {
    world.answers.borrow_mut().remove(&id);
}

#[when("{id} is answered {value}")]
fn question_is_answered(world: &ScoringWorld, id: String, value: i64) {
    world.answer(&id, Answer::Scale(value));
}

#[when("the answers are scored")]
fn the_answers_are_scored(world: &ScoringWorld) {
    let outcome = world
        .questionnaire
        .borrow()
        .as_ref()
        .expect("questionnaire chosen")
        .score(&world.answers.borrow());
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the normalised score is {expected}")]
fn the_normalised_score_is(world: &ScoringWorld, expected: String) {
    assert_eq!(format!("{:.2}", world.result().normalized()), expected);
}

#[then("the tier is {tier}")]
fn the_tier_is(world: &ScoringWorld, tier: String) {
    assert_eq!(world.result().tier().to_string(), tier);
}

#[then("the summary reads \"{summary}\"")]
fn the_summary_reads(world: &ScoringWorld, summary: String) {
    assert_eq!(world.result().summary(), summary);
}

#[then("scoring fails for {id} with {code}")]
fn scoring_fails_for(world: &ScoringWorld, id: String, code: String) {
    let failure = world.failure();
    assert_eq!(failure.question_id(), id);
    assert_eq!(failure.reason().code(), code);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "Maximum answers on a scale-only questionnaire score 100"
)]
fn maximum_scale_answers_score_one_hundred(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "Minimum answers on a scale-only questionnaire score 20"
)]
fn minimum_scale_answers_score_twenty(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "Negative free text on a text-only questionnaire scores 40"
)]
fn negative_free_text_scores_forty(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "Free text without keywords reads as neutral"
)]
fn free_text_without_keywords_reads_as_neutral(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "The boldest answers on the standard catalogue stop short of 100"
)]
fn boldest_standard_answers_stop_short_of_one_hundred(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "An unanswered question is rejected"
)]
fn unanswered_question_is_rejected(world: ScoringWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/risk_assessment.feature",
    name = "An out-of-range answer is rejected"
)]
fn out_of_range_answer_is_rejected(world: ScoringWorld) {
    drop(world);
}
