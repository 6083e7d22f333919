use uuid::Uuid;

use super::ApiError;
use super::types::DurationInput;
use crate::domain::parse_duration;

pub fn validate_id(resource: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::validation(format!("Invalid {resource} ID: \"{raw}\" is not a valid identifier"))
    })
}

pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let username = validate_required("Username", username)?;

    if username.len() > 100 {
        return Err(ApiError::validation(
            "Username must be 100 characters or less",
        ));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(ApiError::validation("Username cannot contain whitespace"));
    }

    Ok(username)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = validate_required("Email", email)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ApiError::validation(format!(
            "Invalid email address: {email}"
        ))),
    }
}

pub fn validate_duration(duration: &DurationInput) -> Result<i64, ApiError> {
    let seconds = match duration {
        DurationInput::Seconds(secs) => Some(*secs),
        DurationInput::Text(text) => parse_duration(text),
    };

    seconds.filter(|s| *s >= 0).ok_or_else(|| {
        ApiError::validation(
            "Invalid duration. Use [D ]HH:MM:SS or a non-negative number of seconds",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        let id = Uuid::new_v4();
        assert_eq!(validate_id("user", &id.to_string()).unwrap(), id);
        assert!(validate_id("user", "42").is_err());
        assert!(validate_id("user", "").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  testuser ").unwrap(), "testuser");
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("testuser@octofit.edu").is_ok());
        assert!(validate_email("testuser").is_err());
        assert!(validate_email("@octofit.edu").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn test_validate_duration() {
        assert_eq!(
            validate_duration(&DurationInput::Text("01:00:00".into())).unwrap(),
            3600
        );
        assert_eq!(validate_duration(&DurationInput::Seconds(90)).unwrap(), 90);
        assert!(validate_duration(&DurationInput::Seconds(-1)).is_err());
        assert!(validate_duration(&DurationInput::Text("later".into())).is_err());
    }

    #[test]
    fn test_validate_duration_rejects_huge_clock() {
        let huge = DurationInput::Text("9223372036854775:00:00".into());
        assert!(validate_duration(&huge).is_err());

        let huge_minutes = DurationInput::Text("9223372036854775807:59".into());
        assert!(validate_duration(&huge_minutes).is_err());
    }
}
