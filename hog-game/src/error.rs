//! Error types raised by the Hog rules engine.
use thiserror::Error;

/// Errors raised when a rule, dice or experiment precondition is violated.
///
/// All variants are programming errors: the engine never clamps or retries
/// silently.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HogError {
    #[error("cannot roll {num_rolls} dice (scoring accepts {min} to {max})")]
    InvalidRollCount { num_rolls: u32, min: u32, max: u32 },
    #[error("a die needs {min} to {max} sides (got {sides})")]
    InvalidSides { sides: u32, min: u32, max: u32 },
    #[error("scripted dice need at least one outcome")]
    EmptyScript,
    #[error("scripted outcome {outcome} is not a die face (faces start at 1)")]
    InvalidOutcome { outcome: u32 },
    #[error("an average needs at least one sample")]
    InvalidSampleCount,
    #[error("parameter range invalid (lower {lower} > upper {upper})")]
    InvalidRange { lower: u32, upper: u32 },
    #[error("rule set invalid: {field} must be between {min} and {max} (got {value})")]
    InvalidRules {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

/// Result alias used throughout the engine.
pub type HogResult<T> = Result<T, HogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = HogError::InvalidRollCount {
            num_rolls: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot roll 11 dice (scoring accepts 1 to 10)"
        );
        let range = HogError::InvalidRange { lower: 9, upper: 3 };
        assert!(range.to_string().contains("lower 9 > upper 3"));
    }
}
