use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid API Key")]
    InvalidApiKey,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Team not found: {tag}")]
    TeamNotFound { tag: String },

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Access denied: {message}")]
    Forbidden { message: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn team_not_found(tag: impl Into<String>) -> Self {
        Self::TeamNotFound { tag: tag.into() }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors caused by a missing or rejected credential
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey
                | Self::InvalidCredentials
                | Self::InvalidToken { .. }
                | Self::Unauthenticated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_api_key_message() {
        assert_eq!(DomainError::InvalidApiKey.to_string(), "Invalid API Key");
    }

    #[test]
    fn test_team_not_found_error() {
        let error = DomainError::team_not_found("IOT");
        assert_eq!(error.to_string(), "Team not found: IOT");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Team 'IA' already exists");
        assert_eq!(error.to_string(), "Conflict: Team 'IA' already exists");
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(DomainError::InvalidCredentials.is_authentication_failure());
        assert!(DomainError::invalid_token("expired").is_authentication_failure());
        assert!(DomainError::Unauthenticated.is_authentication_failure());
        assert!(!DomainError::forbidden("admin only").is_authentication_failure());
        assert!(!DomainError::team_not_found("X").is_authentication_failure());
    }
}
