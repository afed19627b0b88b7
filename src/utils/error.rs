use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoursError {
    #[error("No hours found for name: {name}")]
    NotFound { name: String },

    #[error("No hours were found on the server")]
    NoHours,

    #[error("Stored hours for {name} could not be parsed: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid hours name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤類別，只在 HTTP 邊界轉換成狀態碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Io,
    BadRequest,
    Internal,
    Config,
}

impl HoursError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HoursError::NotFound { .. } | HoursError::NoHours => ErrorKind::NotFound,
            HoursError::Parse { .. } => ErrorKind::Parse,
            HoursError::IoError(_) => ErrorKind::Io,
            HoursError::InvalidName { .. } | HoursError::BadRequest { .. } => {
                ErrorKind::BadRequest
            }
            HoursError::SerializationError(_) | HoursError::Internal { .. } => {
                ErrorKind::Internal
            }
            HoursError::ConfigError { .. } | HoursError::InvalidConfigValueError { .. } => {
                ErrorKind::Config
            }
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HoursError::Internal {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HoursError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found = HoursError::NotFound {
            name: "shop".to_string(),
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(HoursError::NoHours.kind(), ErrorKind::NotFound);

        let io = HoursError::from(std::io::Error::other("disk on fire"));
        assert_eq!(io.kind(), ErrorKind::Io);

        let bad_name = HoursError::InvalidName {
            name: "../etc".to_string(),
            reason: "contains a path separator".to_string(),
        };
        assert_eq!(bad_name.kind(), ErrorKind::BadRequest);
        assert_eq!(HoursError::internal("race").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_parse_error_keeps_name() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = HoursError::Parse {
            name: "shop".to_string(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("shop"));
    }
}
