use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Option and description are required")]
    TooFewArguments,

    #[error("Option '{0}' has no short or long form")]
    NoFlagForm(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognized option: {0}")]
    Unrecognized(String),

    #[error("No argument provided for {0}")]
    MissingArgument(String),

    #[error("Invalid argument for {option}: {message}")]
    InvalidArgument { option: String, message: String },

    #[error("Unexpected argument: {0}")]
    Unexpected(String),

    #[error("Help requested")]
    DisplayHelp,

    #[error("{0}")]
    DisplayVersion(String),
}

impl ParseError {
    pub fn invalid(option: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            option: option.to_string(),
            message: message.into(),
        }
    }

    /// Help and version requests travel through the same boundary as real
    /// failures but exit successfully.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DisplayHelp | Self::DisplayVersion(_) => 0,
            _ => 1,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.exit_code() != 0
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ParseError::Unrecognized("-z".into()).exit_code(), 1);
        assert_eq!(ParseError::MissingArgument("-I".into()).exit_code(), 1);
        assert_eq!(ParseError::DisplayHelp.exit_code(), 0);
        assert_eq!(ParseError::DisplayVersion("x 1.0".into()).exit_code(), 0);
        assert!(!ParseError::DisplayHelp.is_failure());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::Unrecognized("-z".into()).to_string(),
            "Unrecognized option: -z"
        );
        assert_eq!(
            ParseError::MissingArgument("-I".into()).to_string(),
            "No argument provided for -I"
        );
        assert_eq!(
            ParseError::invalid("-f", "Unknown format: q").to_string(),
            "Invalid argument for -f: Unknown format: q"
        );
        assert_eq!(
            RegistrationError::TooFewArguments.to_string(),
            "Option and description are required"
        );
    }
}
