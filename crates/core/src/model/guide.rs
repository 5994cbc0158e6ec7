//! Formula and usage notes shown alongside a lesson.
//!
//! Keyed on the lesson title so that any catalog backend gets the same notes.

/// Grammar formula for a lesson, matched by title.
#[must_use]
pub fn formula_for(title: &str) -> &'static str {
    if title.contains("Present Simple") {
        "Subject + base form (+ s/es for 3rd person singular)"
    } else if title.contains("Present Continuous") {
        "Subject + am/is/are + verb-ing"
    } else if title.contains("Past Simple") {
        "Subject + past form (verb + ed or irregular)"
    } else if title.contains("Past Perfect") {
        "Subject + had + past participle"
    } else {
        "Formula depends on specific grammar rule"
    }
}

/// When to use the rule a lesson teaches, matched by title.
#[must_use]
pub fn usage_points_for(title: &str) -> &'static [&'static str] {
    if title.contains("Present Simple") {
        &[
            "Habits and routines",
            "General truths and facts",
            "Fixed arrangements",
        ]
    } else if title.contains("Present Continuous") {
        &[
            "Actions happening now",
            "Temporary situations",
            "Future arrangements",
        ]
    } else if title.contains("Past Simple") {
        &[
            "Completed actions in the past",
            "Series of completed actions",
            "Past habits",
        ]
    } else if title.contains("Past Perfect") {
        &[
            "Actions completed before another past action",
            "Experiences that happened before a specific time in the past",
        ]
    } else if title.contains("Prepositions of Place") {
        &[
            "Describing the position or location of something",
            "Showing spatial relationships between objects",
        ]
    } else {
        &["Specific usage depends on the grammar rule"]
    }
}

/// Formula plus usage notes for one lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LessonGuide {
    pub formula: &'static str,
    pub usage_points: &'static [&'static str],
}

impl LessonGuide {
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        Self {
            formula: formula_for(title),
            usage_points: usage_points_for(title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tense_has_formula() {
        assert_eq!(
            formula_for("Present Continuous Tense"),
            "Subject + am/is/are + verb-ing"
        );
        assert_eq!(usage_points_for("Present Simple Tense").len(), 3);
    }

    #[test]
    fn unknown_title_falls_back() {
        let guide = LessonGuide::for_title("Relative Clauses");
        assert_eq!(guide.formula, "Formula depends on specific grammar rule");
        assert_eq!(guide.usage_points, &["Specific usage depends on the grammar rule"]);
    }
}
