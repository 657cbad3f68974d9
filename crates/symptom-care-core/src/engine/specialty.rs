//! Symptom keyword → specialty routing.
//!
//! Keywords are scanned in declaration order and the first one contained in
//! the lower-cased input wins, so the table is authored most-specific-first
//! ("child cough" before "cough"). Matching operates on the whole string:
//! multi-symptom input is not decomposed, the first keyword hit governs
//! routing.

use tracing::debug;

/// Ordered keyword-containment matcher over the specialty table.
pub struct SpecialtyMatcher {
    keywords: Vec<(String, String)>,
}

impl Default for SpecialtyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialtyMatcher {
    /// Matcher with the default routing table.
    pub fn new() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }

    /// Matcher with a caller-supplied priority list. Keyword order is the
    /// match precedence.
    pub fn with_keywords<I, K, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|(keyword, specialty)| (keyword.into().to_lowercase(), specialty.into()))
                .collect(),
        }
    }

    /// Append a keyword at the lowest priority.
    pub fn add_keyword(&mut self, keyword: &str, specialty: &str) {
        self.keywords
            .push((keyword.to_lowercase(), specialty.to_string()));
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Resolve the specialty for a symptom phrase, or `None` when no keyword
    /// is contained in the input.
    pub fn resolve(&self, symptom_text: &str) -> Option<&str> {
        let haystack = symptom_text.trim().to_lowercase();
        if haystack.is_empty() {
            return None;
        }
        let hit = self
            .keywords
            .iter()
            .find(|(keyword, _)| haystack.contains(keyword.as_str()));
        match hit {
            Some((keyword, specialty)) => {
                debug!(keyword = %keyword, specialty = %specialty, "specialty resolved");
                Some(specialty.as_str())
            }
            None => None,
        }
    }
}

/// Default routing table. Specific phrases come before the generic keywords
/// they contain; the catch-all General Physician entries close the list.
fn default_keywords() -> Vec<(String, String)> {
    let table: &[(&str, &str)] = &[
        ("child cough", "Pediatrician"),
        ("child fever", "Pediatrician"),
        ("chest pain", "Cardiologist"),
        ("heart palpitation", "Cardiologist"),
        ("irregular heartbeat", "Cardiologist"),
        ("high blood pressure", "Cardiologist"),
        ("shortness of breath", "Cardiologist"),
        ("skin rash", "Dermatologist"),
        ("acne", "Dermatologist"),
        ("eczema", "Dermatologist"),
        ("hair loss", "Dermatologist"),
        ("itching", "Dermatologist"),
        ("migraine", "Neurologist"),
        ("seizure", "Neurologist"),
        ("numbness", "Neurologist"),
        ("dizziness", "Neurologist"),
        ("headache", "Neurologist"),
        ("joint pain", "Orthopedist"),
        ("back pain", "Orthopedist"),
        ("knee pain", "Orthopedist"),
        ("fracture", "Orthopedist"),
        ("ear pain", "ENT Specialist"),
        ("sore throat", "ENT Specialist"),
        ("sinus", "ENT Specialist"),
        ("hearing loss", "ENT Specialist"),
        ("stomach pain", "Gastroenterologist"),
        ("acidity", "Gastroenterologist"),
        ("constipation", "Gastroenterologist"),
        ("diarrhea", "Gastroenterologist"),
        ("vomiting", "Gastroenterologist"),
        ("blurred vision", "Ophthalmologist"),
        ("eye pain", "Ophthalmologist"),
        ("red eye", "Ophthalmologist"),
        ("toothache", "Dentist"),
        ("gum bleeding", "Dentist"),
        ("anxiety", "Psychiatrist"),
        ("depression", "Psychiatrist"),
        ("insomnia", "Psychiatrist"),
        ("pregnancy", "Gynecologist"),
        ("menstrual", "Gynecologist"),
        ("cough", "General Physician"),
        ("fever", "General Physician"),
        ("cold", "General Physician"),
        ("fatigue", "General Physician"),
    ];
    table
        .iter()
        .map(|&(keyword, specialty)| (keyword.to_string(), specialty.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_keyword_wins() {
        let matcher = SpecialtyMatcher::with_keywords([
            ("child cough", "Pediatrician"),
            ("cough", "General Physician"),
        ]);

        assert_eq!(matcher.resolve("child cough, cold"), Some("Pediatrician"));
        assert_eq!(matcher.resolve("dry cough"), Some("General Physician"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let matcher = SpecialtyMatcher::new();
        let first = matcher.resolve("chest pain and fatigue");
        for _ in 0..10 {
            assert_eq!(matcher.resolve("chest pain and fatigue"), first);
        }
        assert_eq!(first, Some("Cardiologist"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let matcher = SpecialtyMatcher::new();
        assert_eq!(matcher.resolve("  CHEST PAIN  "), Some("Cardiologist"));
        assert_eq!(matcher.resolve("Toothache"), Some("Dentist"));
    }

    #[test]
    fn test_no_match_is_absent() {
        let matcher = SpecialtyMatcher::new();
        assert_eq!(matcher.resolve("xyz-nonexistent"), None);
        assert_eq!(matcher.resolve(""), None);
        assert_eq!(matcher.resolve("   "), None);
    }

    #[test]
    fn test_specific_phrase_beats_generic_default_table() {
        let matcher = SpecialtyMatcher::new();
        // "child cough" contains "cough" but routes to the specific entry.
        assert_eq!(matcher.resolve("child cough"), Some("Pediatrician"));
        // "chest pain" contains no earlier keyword.
        assert_eq!(matcher.resolve("chest pain"), Some("Cardiologist"));
    }

    #[test]
    fn test_appended_keyword_has_lowest_priority() {
        let mut matcher = SpecialtyMatcher::with_keywords([("fever", "General Physician")]);
        matcher.add_keyword("dengue fever", "Infectious Disease");

        // The earlier generic entry still wins; priority is authoring order.
        assert_eq!(matcher.resolve("dengue fever"), Some("General Physician"));
        assert_eq!(matcher.len(), 2);
    }
}
