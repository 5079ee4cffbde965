//! Keyword sentiment heuristic for free-text answers.
//!
//! The heuristic counts which keywords appear as substrings of the
//! case-folded text, not how often, and has no notion of negation
//! ("not bad" counts as negative).

/// Keywords counted towards a positive reading.
pub const POSITIVE_KEYWORDS: [&str; 5] = ["positive", "good", "learned", "valuable", "beneficial"];

/// Keywords counted towards a negative reading.
pub const NEGATIVE_KEYWORDS: [&str; 6] = ["negative", "bad", "loss", "lost", "hurt", "harmful"];

const POSITIVE_SCORE: u8 = 4;
const NEUTRAL_SCORE: u8 = 3;
const NEGATIVE_SCORE: u8 = 2;

/// Map free text to a coarse score in `{2, 3, 4}`.
///
/// Returns 4 when more positive than negative keywords are present, 2 for the
/// reverse, and 3 otherwise (including empty text).
///
/// # Examples
/// ```
/// use risk_appetite::domain::questionnaire::sentiment_classify;
///
/// assert_eq!(sentiment_classify("This was VALUABLE"), 4);
/// assert_eq!(sentiment_classify("a painful loss"), 2);
/// assert_eq!(sentiment_classify(""), 3);
/// ```
#[must_use]
pub fn sentiment_classify(text: &str) -> u8 {
    let folded = text.to_lowercase();
    let positive = count_present(&folded, &POSITIVE_KEYWORDS);
    let negative = count_present(&folded, &NEGATIVE_KEYWORDS);

    if positive > negative {
        POSITIVE_SCORE
    } else if negative > positive {
        NEGATIVE_SCORE
    } else {
        NEUTRAL_SCORE
    }
}

fn count_present(text: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}
