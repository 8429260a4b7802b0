//! Symptom Matcher Port - turns free text into canonical symptom candidates.

use crate::domain::foundation::SymptomId;

/// Port for resolving a user's free-text symptom mention against the
/// classifier vocabulary.
///
/// Implementations match case-insensitively and may return several
/// candidates when the text is ambiguous. The returned order must be stable:
/// the disambiguation menu numbers candidates by their position.
pub trait SymptomMatcher: Send + Sync {
    /// Returns every vocabulary entry matching `text`, in a stable order.
    ///
    /// An empty result means nothing matched.
    fn find_matches(&self, text: &str, vocabulary: &[SymptomId]) -> Vec<SymptomId>;
}
