//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team tag cannot be empty")]
    EmptyTag,

    #[error("Team tag cannot exceed {0} characters")]
    TagTooLong(usize),

    #[error("Team tag can only contain alphanumeric characters, hyphens and underscores")]
    InvalidTagCharacters,

    #[error("Team secret must be at least {0} characters")]
    SecretTooShort(usize),

    #[error("Team description cannot exceed {0} characters")]
    DescriptionTooLong(usize),

    #[error("Invalid contact email: '{0}'")]
    InvalidEmail(String),
}

const MAX_TEAM_TAG_LENGTH: usize = 50;
const MIN_TEAM_SECRET_LENGTH: usize = 8;
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Validate a team tag
pub fn validate_team_tag(tag: &str) -> Result<(), TeamValidationError> {
    if tag.trim().is_empty() {
        return Err(TeamValidationError::EmptyTag);
    }

    if tag.len() > MAX_TEAM_TAG_LENGTH {
        return Err(TeamValidationError::TagTooLong(MAX_TEAM_TAG_LENGTH));
    }

    if !tag
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TeamValidationError::InvalidTagCharacters);
    }

    Ok(())
}

/// Validate a plain-text team secret before hashing
pub fn validate_team_secret(secret: &str) -> Result<(), TeamValidationError> {
    if secret.chars().count() < MIN_TEAM_SECRET_LENGTH {
        return Err(TeamValidationError::SecretTooShort(MIN_TEAM_SECRET_LENGTH));
    }

    Ok(())
}

pub fn validate_team_description(description: &str) -> Result<(), TeamValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(TeamValidationError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH));
    }

    Ok(())
}

pub fn validate_team_emails(emails: &[String]) -> Result<(), TeamValidationError> {
    for email in emails {
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(TeamValidationError::InvalidEmail(email.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_tag() {
        assert!(validate_team_tag("IA").is_ok());
        assert!(validate_team_tag("iot-edge").is_ok());
        assert!(validate_team_tag("JAVA_2").is_ok());
    }

    #[test]
    fn test_empty_team_tag() {
        assert_eq!(validate_team_tag(""), Err(TeamValidationError::EmptyTag));
        assert_eq!(validate_team_tag("  "), Err(TeamValidationError::EmptyTag));
    }

    #[test]
    fn test_team_tag_too_long() {
        let long_tag = "a".repeat(51);
        assert_eq!(
            validate_team_tag(&long_tag),
            Err(TeamValidationError::TagTooLong(50))
        );
    }

    #[test]
    fn test_invalid_team_tag_characters() {
        assert_eq!(
            validate_team_tag("team name"),
            Err(TeamValidationError::InvalidTagCharacters)
        );
        assert_eq!(
            validate_team_tag("team.name"),
            Err(TeamValidationError::InvalidTagCharacters)
        );
    }

    #[test]
    fn test_team_secret_length() {
        assert!(validate_team_secret("12345678").is_ok());
        assert_eq!(
            validate_team_secret("short"),
            Err(TeamValidationError::SecretTooShort(8))
        );
    }

    #[test]
    fn test_description_length() {
        assert!(validate_team_description("Telemetry for edge devices").is_ok());
        assert!(validate_team_description(&"d".repeat(1025)).is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_team_emails(&["ops@example.com".to_string()]).is_ok());
        assert!(validate_team_emails(&[]).is_ok());
        assert_eq!(
            validate_team_emails(&["not-an-email".to_string()]),
            Err(TeamValidationError::InvalidEmail("not-an-email".to_string()))
        );
        assert!(validate_team_emails(&["@example.com".to_string()]).is_err());
        assert!(validate_team_emails(&["a b@example.com".to_string()]).is_err());
    }
}
