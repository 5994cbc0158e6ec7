use thiserror::Error;

use crate::model::{ExerciseError, LessonError, ParseEnumError, ParseIdError, ProgressError, UserError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    Name(#[from] ParseEnumError),
}
