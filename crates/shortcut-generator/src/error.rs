use thiserror::Error;

/// Errors returned when configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid alias length {length}; expected 1..={max}")]
    InvalidLength { length: usize, max: usize },
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet character {0:?} is not an ASCII letter or digit")]
    InvalidCharacter(char),
    #[error("alphabet character {0:?} appears more than once")]
    DuplicateCharacter(char),
}
