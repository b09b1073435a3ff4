//! Keyword categorizer: free-text mood label → one of six [`MoodCategory`] values.

use super::MoodCategory;

/// Synonym substrings per category, in match priority order.
///
/// Happy is tested last so that mixed labels ("happy but worried") resolve to the
/// more specific negative category.
const SYNONYMS: [(MoodCategory, &[&str]); 6] = [
    (MoodCategory::Sad, &["sad", "depress", "blue", "down"]),
    (MoodCategory::Angry, &["angry", "mad", "furious", "rage"]),
    (
        MoodCategory::Anxious,
        &["anxious", "worry", "nervous", "stress", "fear"],
    ),
    (MoodCategory::Calm, &["calm", "relax", "peace", "serene"]),
    (
        MoodCategory::Excited,
        &["excited", "energetic", "thrilled", "pumped"],
    ),
    (
        MoodCategory::Happy,
        &["happy", "joy", "cheerful", "delighted"],
    ),
];

/// Map a mood label of arbitrary case and wording to a canonical category.
///
/// Returns the first category in priority order with a synonym contained in the
/// lower-cased label, or [`MoodCategory::Happy`] when nothing matches.
pub fn categorize(label: &str) -> MoodCategory {
    let lower = label.to_lowercase();
    SYNONYMS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(MoodCategory::Happy)
}

/// The synonym list for a category.
pub fn synonyms(category: MoodCategory) -> &'static [&'static str] {
    SYNONYMS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_synonym_maps_to_its_category() {
        for category in MoodCategory::ALL {
            for word in synonyms(category) {
                assert_eq!(categorize(word), category, "synonym {word}");
            }
        }
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(categorize("FURIOUS"), MoodCategory::Angry);
        assert_eq!(categorize("Feeling Serene today"), MoodCategory::Calm);
    }

    #[test]
    fn priority_order_resolves_overlaps() {
        assert_eq!(categorize("happy but I worry a lot"), MoodCategory::Anxious);
        assert_eq!(categorize("excited yet sad"), MoodCategory::Sad);
        assert_eq!(categorize("calm and happy"), MoodCategory::Calm);
        assert_eq!(categorize("mad and stressed"), MoodCategory::Angry);
    }

    #[test]
    fn unmatched_defaults_to_happy() {
        assert_eq!(categorize(""), MoodCategory::Happy);
        assert_eq!(categorize("neutral"), MoodCategory::Happy);
        assert_eq!(categorize("contemplative"), MoodCategory::Happy);
    }

    #[test]
    fn substring_matches_count() {
        // "down" inside "downcast", "blue" inside "bluesy"
        assert_eq!(categorize("downcast"), MoodCategory::Sad);
        assert_eq!(categorize("fearful"), MoodCategory::Anxious);
    }
}
