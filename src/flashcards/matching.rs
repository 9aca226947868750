//! Answer matching for study sessions
//!
//! The core engine never inspects answer text; grading is driven by the
//! user's label. Matching is a capability consumed by whatever front end
//! runs the session, behind the [`AnswerMatcher`] trait.

/// Decides whether a typed answer counts as correct
pub trait AnswerMatcher {
    fn matches(&self, user_answer: &str, correct_answer: &str) -> bool;
}

/// Case-, whitespace-, and accent-insensitive matcher.
///
/// Normalization: collapse whitespace runs to single spaces, lowercase,
/// and fold common accented Latin letters to their ASCII base so
/// "Fähre" matches "fahre".
#[derive(Debug, Default)]
pub struct NormalizingMatcher;

impl NormalizingMatcher {
    fn normalize(text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
            .chars()
            .map(fold_accent)
            .collect()
    }
}

impl AnswerMatcher for NormalizingMatcher {
    fn matches(&self, user_answer: &str, correct_answer: &str) -> bool {
        Self::normalize(user_answer) == Self::normalize(correct_answer)
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
