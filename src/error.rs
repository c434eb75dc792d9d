//! Error types for the simulation core and the terminal driver.

use thiserror::Error;

/// All lifeterm errors.
///
/// Core operations validate their input up front and return one of these
/// before touching any state, so a failed call leaves the grid unchanged.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Zero rows or columns requested at construction or resize
    #[error("invalid dimensions: {rows}x{cols} (rows and cols must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A pattern row has a different length from the first row
    #[error("pattern row {row} has {found} cells, expected {expected}")]
    PatternShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A probability argument outside [0, 1]
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// No built-in pattern with that name
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Malformed pattern text
    #[error("pattern line {line}: {message}")]
    PatternParse { line: usize, message: String },

    /// Explicit settings file could not be read or parsed
    #[error("settings: {0}")]
    Settings(String),

    /// Terminal or file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lifeterm operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Whether the error came from caller-supplied pattern data.
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self,
            LifeError::PatternShapeMismatch { .. }
                | LifeError::UnknownPattern(_)
                | LifeError::PatternParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = LifeError::InvalidDimensions { rows: 0, cols: 12 };
        assert!(err.to_string().contains("0x12"));

        let err = LifeError::PatternShapeMismatch { row: 2, expected: 5, found: 3 };
        assert_eq!(err.to_string(), "pattern row 2 has 3 cells, expected 5");
    }

    #[test]
    fn pattern_errors_are_classified() {
        assert!(LifeError::UnknownPattern("x".into()).is_pattern_error());
        assert!(!LifeError::InvalidDimensions { rows: 0, cols: 0 }.is_pattern_error());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: LifeError = io.into();
        assert!(matches!(err, LifeError::Io(_)));
    }
}
