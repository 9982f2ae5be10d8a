use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistributeError {
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Number of Groups should not be more than Number of Persons (requested {requested}, roster has {available})")]
    GroupCountExceedsRoster { requested: usize, available: usize },

    #[error("There exist another group with the same name: {name}")]
    DuplicateGroupName { name: String },

    #[error("Not implemented: {message}")]
    NotImplemented { message: String },

    #[error("Materialization failed while {step}: {source}")]
    MaterializationFailure {
        step: String,
        #[source]
        source: Box<DistributeError>,
    },

    #[error("Person appears more than once in the roster: {name}")]
    DuplicatePerson { name: String },

    #[error("Person not found in roster: {name}")]
    PersonNotFound { name: String },

    #[error("Group index {index} is out of range")]
    GroupIndexOutOfRange { index: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Naming,
    Unsupported,
    Registry,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DistributeError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn materialization(step: impl Into<String>, source: DistributeError) -> Self {
        Self::MaterializationFailure {
            step: step.into(),
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::GroupCountExceedsRoster { .. }
            | Self::DuplicatePerson { .. } => ErrorCategory::Input,
            Self::DuplicateGroupName { .. } => ErrorCategory::Naming,
            Self::NotImplemented { .. } => ErrorCategory::Unsupported,
            Self::MaterializationFailure { .. }
            | Self::PersonNotFound { .. }
            | Self::GroupIndexOutOfRange { .. } => ErrorCategory::Registry,
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::TomlError(_) | Self::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotImplemented { .. } | Self::DuplicateGroupName { .. } => ErrorSeverity::Medium,
            Self::InvalidArgument { .. }
            | Self::GroupCountExceedsRoster { .. }
            | Self::DuplicatePerson { .. }
            | Self::TomlError(_)
            | Self::CsvError(_)
            | Self::ConfigError { .. } => ErrorSeverity::High,
            Self::MaterializationFailure { .. }
            | Self::PersonNotFound { .. }
            | Self::GroupIndexOutOfRange { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 驗證與命名錯誤發生在任何寫入之前，調整輸入後可直接重試
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Input | ErrorCategory::Naming | ErrorCategory::Unsupported
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "Check the command arguments and try again",
            Self::GroupCountExceedsRoster { .. } => {
                "Request fewer groups or widen the roster filter"
            }
            Self::DuplicatePerson { .. } => "Remove the repeated entry from the roster",
            Self::DuplicateGroupName { .. } => {
                "Choose another group name prefix or remove the existing groups"
            }
            Self::NotImplemented { .. } => {
                "Balance by gender or by nationality, but not both at once"
            }
            Self::MaterializationFailure { .. }
            | Self::PersonNotFound { .. }
            | Self::GroupIndexOutOfRange { .. } => {
                "Groups created before the failure were kept; restore the registry from a snapshot if needed"
            }
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::CsvError(_) => "Make sure the CSV header is name,gender,nationality[,email,phone]",
            Self::TomlError(_) | Self::ConfigError { .. } => {
                "Make sure the roster file is valid TOML format"
            }
            Self::SerializationError(_) => "Retry without --output-json",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { reason, .. } => reason.clone(),
            Self::MaterializationFailure { step, source } => {
                format!("Distribution stopped while {}: {}", step, source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DistributeError>;
