use thiserror::Error;

/// Failures produced while interpreting a score line.
///
/// The display strings are shown to the golfer verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Please select a hole or specify one (e.g. 'hole 4')")]
    MissingHole,

    #[error("Hole must be 1-18")]
    OutOfRangeHole,

    #[error("Strokes looks off")]
    OutOfRangeStrokes,

    #[error("Putts looks off")]
    OutOfRangePutts,
}

#[derive(Error, Debug)]
pub enum ScorecardError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Round not found: {round_id}")]
    RoundNotFound { round_id: String },

    #[error("No hole selected")]
    NoHoleSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScorecardError {
    pub fn validation(message: impl Into<String>) -> Self {
        ScorecardError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScorecardError::Parse(_)
            | ScorecardError::ValidationError { .. }
            | ScorecardError::NoHoleSelected => ErrorCategory::Input,
            ScorecardError::ConfigValidationError { .. }
            | ScorecardError::InvalidConfigValueError { .. }
            | ScorecardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScorecardError::IoError(_)
            | ScorecardError::SerializationError(_)
            | ScorecardError::CsvError(_)
            | ScorecardError::RoundNotFound { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者可以直接重新輸入
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => match self {
                ScorecardError::RoundNotFound { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScorecardError::Parse(e) => e.to_string(),
            ScorecardError::ValidationError { message } => message.clone(),
            ScorecardError::NoHoleSelected => "Pick a hole before saving the form".to_string(),
            ScorecardError::RoundNotFound { round_id } => {
                format!("There is no round with id {}", round_id)
            }
            ScorecardError::IoError(_)
            | ScorecardError::SerializationError(_)
            | ScorecardError::CsvError(_) => format!("Could not access saved rounds: {}", self),
            _ => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScorecardError::Parse(ParseError::MissingHole) | ScorecardError::NoHoleSelected => {
                "Select a hole first, or say e.g. 'hole 4 strokes 5 putts 2'"
            }
            ScorecardError::Parse(_) => "Try a line like 'hole 4 strokes 5 putts 2 fairway'",
            ScorecardError::ValidationError { .. } => "Correct the highlighted value and save again",
            ScorecardError::RoundNotFound { .. } => "List rounds with the 'rounds' command",
            ScorecardError::IoError(_)
            | ScorecardError::SerializationError(_)
            | ScorecardError::CsvError(_) => "Check that the data directory exists and is writable",
            _ => "Check the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScorecardError>;
