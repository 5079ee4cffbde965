//! The fixed risk appetite catalogue.

use super::{AnswerKind, Question};

struct Entry {
    id: &'static str,
    title: &'static str,
    prompt: &'static str,
    weight: f64,
    kind: AnswerKind,
}

const STANDARD: [Entry; 10] = [
    Entry {
        id: "general_risk_appetite",
        title: "General Risk Appetite",
        prompt: "Rate your willingness to take financial risks for high returns on a scale from 1 to 5, with 1 being low and 5 being high.",
        weight: 2.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "specific_risk_tolerance",
        title: "Specific Risk Tolerance",
        prompt: "Given a 50% chance to either gain or lose 10% of your investment, rate your likely reaction on a scale from 1 to 5, with 1 being very unwilling and 5 being very willing.",
        weight: 2.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "experience_with_loss",
        title: "Experience with Loss",
        prompt: "Describe a past financial loss and how it has impacted your investment decisions.",
        weight: 1.5,
        kind: AnswerKind::FreeText,
    },
    Entry {
        id: "investment_horizon",
        title: "Investment Horizon",
        prompt: "Rate your focus on investment time horizon: 1 for short-term, 2 for medium-term, and 3 for long-term.",
        weight: 1.0,
        kind: AnswerKind::Scale1to3,
    },
    Entry {
        id: "financial_goals",
        title: "Financial Goals and Priorities",
        prompt: "Describe your primary financial goals and their priority.",
        weight: 1.5,
        kind: AnswerKind::FreeText,
    },
    Entry {
        id: "comfort_with_volatility",
        title: "Comfort with Volatility",
        prompt: "On a scale from 1 to 5, how comfortable are you with fluctuations in the value of your investments?",
        weight: 2.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "risk_vs_reward",
        title: "Risk vs. Reward",
        prompt: "What's more important to you: protecting your investment from losses (1) or maximizing gains (5)?",
        weight: 2.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "diversification_preferences",
        title: "Diversification Preferences",
        prompt: "Rate your preference for diversifying investments to spread risk on a scale from 1 to 5.",
        weight: 1.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "reaction_to_market_downturns",
        title: "Reaction to Market Downturns",
        prompt: "If the market downturns and your portfolio loses value, what would be your immediate reaction? Sell (1), Hold (3), or Buy more (5)?",
        weight: 2.0,
        kind: AnswerKind::Scale1to5,
    },
    Entry {
        id: "sacrifice_for_potential_gains",
        title: "Sacrifice for Potential Gains",
        prompt: "How much of your current lifestyle would you be willing to sacrifice for higher future gains, on a scale from 1 to 5?",
        weight: 1.5,
        kind: AnswerKind::Scale1to5,
    },
];

// The entries are constants that satisfy `Question::new`; the unit tests
// re-validate them through `Questionnaire::new`.
pub(super) fn standard_questions() -> Vec<Question> {
    STANDARD
        .iter()
        .map(|entry| Question {
            id: entry.id.to_owned(),
            title: entry.title.to_owned(),
            prompt: entry.prompt.to_owned(),
            weight: entry.weight,
            kind: entry.kind,
        })
        .collect()
}
