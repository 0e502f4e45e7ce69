//! Failure reasons returned by the validating factories of value objects.
//!
//! Every variant renders as the human-readable reason for the rule that failed.
//! These are returned as values; no factory panics on bad input.

use thiserror::Error;

/// Which side of a date/time range a parse failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Start,
    End,
}

impl RangeSide {
    #[must_use]
    pub fn parameter(self) -> &'static str {
        match self {
            Self::Start => "startDateTime",
            Self::End => "endDateTime",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Start date/time is later than end date/time.")]
    StartAfterEnd,

    #[error("DateTimeValue can not be empty or null. Parameter: {}", .0.parameter())]
    EmptyDateTime(RangeSide),

    #[error("DateTimeValue has unrecognized format. Parameter: {}", .0.parameter())]
    UnrecognizedFormat(RangeSide),

    /// A derived range whose end cannot be represented.
    #[error("Date/time is out of the representable range.")]
    OutOfRange,

    #[error("Email can not be empty.")]
    EmptyEmail,

    #[error("Email has more than {max} characters.")]
    EmailTooLong { max: usize },

    #[error("Invalid email format.")]
    InvalidEmailFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::StartAfterEnd.to_string(),
            "Start date/time is later than end date/time."
        );
        assert_eq!(
            ValidationError::UnrecognizedFormat(RangeSide::End).to_string(),
            "DateTimeValue has unrecognized format. Parameter: endDateTime"
        );
        assert_eq!(
            ValidationError::EmailTooLong { max: 254 }.to_string(),
            "Email has more than 254 characters."
        );
    }
}
