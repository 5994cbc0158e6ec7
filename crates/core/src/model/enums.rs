use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a category, level, goal or exercise type name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {raw}")]
pub struct ParseEnumError {
    kind: &'static str,
    raw: String,
}

/// Matches `raw` against each variant's key and label, ignoring case.
fn parse_named<T: Copy>(
    raw: &str,
    kind: &'static str,
    all: &[T],
    key: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    let needle = raw.trim();
    all.iter()
        .copied()
        .find(|v| key(*v).eq_ignore_ascii_case(needle) || label(*v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| ParseEnumError {
            kind,
            raw: raw.to_owned(),
        })
}

//
// ─── GRAMMAR CATEGORY ──────────────────────────────────────────────────────────
//

/// Topic a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarCategory {
    VerbTenses,
    Nouns,
    Adjectives,
    Adverbs,
    Prepositions,
    Articles,
    Pronouns,
    Conjunctions,
}

impl GrammarCategory {
    pub const ALL: [Self; 8] = [
        Self::VerbTenses,
        Self::Nouns,
        Self::Adjectives,
        Self::Adverbs,
        Self::Prepositions,
        Self::Articles,
        Self::Pronouns,
        Self::Conjunctions,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VerbTenses => "Verb Tenses",
            Self::Nouns => "Nouns",
            Self::Adjectives => "Adjectives",
            Self::Adverbs => "Adverbs",
            Self::Prepositions => "Prepositions",
            Self::Articles => "Articles",
            Self::Pronouns => "Pronouns",
            Self::Conjunctions => "Conjunctions",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::VerbTenses => "verb-tenses",
            Self::Nouns => "nouns",
            Self::Adjectives => "adjectives",
            Self::Adverbs => "adverbs",
            Self::Prepositions => "prepositions",
            Self::Articles => "articles",
            Self::Pronouns => "pronouns",
            Self::Conjunctions => "conjunctions",
        }
    }
}

impl fmt::Display for GrammarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GrammarCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, "grammar category", &Self::ALL, Self::key, Self::label)
    }
}

//
// ─── PROFICIENCY LEVEL ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, "proficiency level", &Self::ALL, Self::key, Self::label)
    }
}

//
// ─── LEARNING GOAL ─────────────────────────────────────────────────────────────
//

/// Why the learner is studying; chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearningGoal {
    General,
    Academic,
    Business,
    Travel,
    Exam,
}

impl LearningGoal {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Academic,
        Self::Business,
        Self::Travel,
        Self::Exam,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General English",
            Self::Academic => "Academic English",
            Self::Business => "Business English",
            Self::Travel => "Travel English",
            Self::Exam => "Exam Preparation",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Academic => "academic",
            Self::Business => "business",
            Self::Travel => "travel",
            Self::Exam => "exam",
        }
    }
}

impl fmt::Display for LearningGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningGoal {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, "learning goal", &Self::ALL, Self::key, Self::label)
    }
}

//
// ─── EXERCISE TYPE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    MultipleChoice,
    FillInTheBlank,
    Matching,
    Reordering,
}

impl ExerciseType {
    pub const ALL: [Self; 4] = [
        Self::MultipleChoice,
        Self::FillInTheBlank,
        Self::Matching,
        Self::Reordering,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple Choice",
            Self::FillInTheBlank => "Fill in the Blank",
            Self::Matching => "Matching",
            Self::Reordering => "Reordering",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::FillInTheBlank => "fill-in-the-blank",
            Self::Matching => "matching",
            Self::Reordering => "reordering",
        }
    }

    /// Whether questions of this type carry a list of options.
    #[must_use]
    pub fn uses_options(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::Matching)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExerciseType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, "exercise type", &Self::ALL, Self::key, Self::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_key_and_label() {
        assert_eq!(
            "verb-tenses".parse::<GrammarCategory>().unwrap(),
            GrammarCategory::VerbTenses
        );
        assert_eq!(
            "Verb Tenses".parse::<GrammarCategory>().unwrap(),
            GrammarCategory::VerbTenses
        );
        assert_eq!(
            "PREPOSITIONS".parse::<GrammarCategory>().unwrap(),
            GrammarCategory::Prepositions
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "phonetics".parse::<GrammarCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown grammar category: phonetics");
        assert!("expert".parse::<ProficiencyLevel>().is_err());
    }

    #[test]
    fn learning_goal_labels() {
        assert_eq!(LearningGoal::ALL.len(), 5);
        assert_eq!(LearningGoal::Exam.label(), "Exam Preparation");
        assert_eq!("academic".parse::<LearningGoal>().unwrap(), LearningGoal::Academic);
    }

    #[test]
    fn option_bearing_exercise_types() {
        assert!(ExerciseType::MultipleChoice.uses_options());
        assert!(ExerciseType::Matching.uses_options());
        assert!(!ExerciseType::FillInTheBlank.uses_options());
        assert!(!ExerciseType::Reordering.uses_options());
    }
}
