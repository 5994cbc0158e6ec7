use std::collections::HashSet;

use grammar_core::model::{Exercise, ExerciseId, Lesson, LessonId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate exercise id: {0}")]
    DuplicateExercise(ExerciseId),
}

/// Fixed set of lessons and exercises, kept in insertion order.
///
/// Ids are unique. An exercise may point at a lesson that is not in the
/// catalog; such exercises are kept and listed by [`Catalog::dangling_exercises`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Build a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two lessons or two exercises share an id.
    pub fn new(lessons: Vec<Lesson>, exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        let mut seen_lessons = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !seen_lessons.insert(lesson.id()) {
                return Err(CatalogError::DuplicateLesson(lesson.id().clone()));
            }
        }
        let mut seen_exercises = HashSet::with_capacity(exercises.len());
        for exercise in &exercises {
            if !seen_exercises.insert(exercise.id()) {
                return Err(CatalogError::DuplicateExercise(exercise.id().clone()));
            }
        }

        let catalog = Self { lessons, exercises };
        for exercise in catalog.dangling_exercises() {
            tracing::warn!(
                exercise_id = %exercise.id(),
                lesson_id = %exercise.related_lesson_id(),
                "exercise references a lesson missing from the catalog"
            );
        }
        tracing::debug!(
            lessons = catalog.lessons.len(),
            exercises = catalog.exercises.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id() == id)
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id() == id)
    }

    /// Lessons matching `predicate`, in insertion order.
    pub fn lessons_where(&self, predicate: impl Fn(&Lesson) -> bool) -> Vec<Lesson> {
        self.lessons.iter().filter(|l| predicate(*l)).cloned().collect()
    }

    /// Exercises matching `predicate`, in insertion order.
    pub fn exercises_where(&self, predicate: impl Fn(&Exercise) -> bool) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| predicate(*e))
            .cloned()
            .collect()
    }

    /// Exercises whose related lesson is not part of this catalog.
    pub fn dangling_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises
            .iter()
            .filter(|e| self.lesson(e.related_lesson_id()).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar_core::model::{
        ExerciseType, GrammarCategory, LessonDraft, ProficiencyLevel, Question,
    };

    fn lesson(id: &str) -> Lesson {
        LessonDraft {
            id: LessonId::new(id).unwrap(),
            title: format!("Lesson {id}"),
            description: String::new(),
            content: String::new(),
            category: GrammarCategory::Nouns,
            level: ProficiencyLevel::Beginner,
            order: 1,
            examples: Vec::new(),
        }
        .validate()
        .unwrap()
    }

    fn exercise(id: &str, lesson_id: &str) -> Exercise {
        Exercise::new(
            ExerciseId::new(id).unwrap(),
            format!("Exercise {id}"),
            ExerciseType::FillInTheBlank,
            "",
            LessonId::new(lesson_id).unwrap(),
            vec![Question::new("A ___", None, "b", "").unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_lesson_ids() {
        let err = Catalog::new(vec![lesson("1"), lesson("1")], Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLesson(LessonId::new("1").unwrap()));
    }

    #[test]
    fn rejects_duplicate_exercise_ids() {
        let err = Catalog::new(
            vec![lesson("1")],
            vec![exercise("9", "1"), exercise("9", "1")],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateExercise(ExerciseId::new("9").unwrap()));
    }

    #[test]
    fn keeps_exercises_with_unknown_lessons() {
        let catalog = Catalog::new(
            vec![lesson("1")],
            vec![exercise("1", "1"), exercise("2", "missing")],
        )
        .unwrap();
        assert_eq!(catalog.exercises().len(), 2);
        let dangling: Vec<_> = catalog.dangling_exercises().map(|e| e.id().as_str()).collect();
        assert_eq!(dangling, vec!["2"]);
    }
}
