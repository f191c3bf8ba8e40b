#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("env var '{name}' is not valid unicode")]
    NotUnicode { name: String },
    #[error("env var '{name}' cannot parse '{value}': {reason}")]
    Parse {
        name: String,
        value: String,
        reason: String,
    },
}

impl EnvError {
    pub fn name(&self) -> &str {
        match self {
            EnvError::NotUnicode { name } => name,
            EnvError::Parse { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration '{0}'")]
    Invalid(String),
    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),
    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },
    #[error("duration '{0}' overflows")]
    Overflow(String),
    #[error("negative duration '{0}'")]
    Negative(String),
}
