use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Statement references token '{0}' with no bound value")]
    MissingParameter(String),

    #[error("Too many bound parameters: {count} (max {max})")]
    TooManyParameters { count: usize, max: usize },
}
