// Message & Queue Name Domain Model

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// Name of a queue. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyQueueName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QueueName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<QueueName> for String {
    fn from(name: QueueName) -> Self {
        name.0
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque text payload. The broker transports it without looking inside.
pub type Message = String;

/// Producers may not publish an empty payload.
pub fn validate_message(message: &str) -> Result<()> {
    if message.is_empty() {
        return Err(DomainError::EmptyMessage);
    }
    Ok(())
}

/// Parse a wait timeout given in whole seconds (`"0"`, `"5"`, ...).
pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| DomainError::InvalidTimeout(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_name_rejects_empty() {
        assert_eq!(QueueName::new(""), Err(DomainError::EmptyQueueName));
        assert_eq!(QueueName::new("pet").unwrap().as_str(), "pet");
    }

    #[test]
    fn test_queue_name_allows_nested_paths() {
        let name = QueueName::new("team/orders").unwrap();
        assert_eq!(name.to_string(), "team/orders");
    }

    #[test]
    fn test_validate_message() {
        assert!(validate_message("data").is_ok());
        assert_eq!(validate_message(""), Err(DomainError::EmptyMessage));
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_timeout_secs("5").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout_secs("-1").is_err());
        assert!(parse_timeout_secs("abc").is_err());
        assert!(parse_timeout_secs("1.5").is_err());
        assert!(parse_timeout_secs(" 5").is_err());
        assert!(parse_timeout_secs("5 ").is_err());
    }

    #[test]
    fn test_parse_timeout_secs_accepts_u64_max() {
        assert_eq!(
            parse_timeout_secs("18446744073709551615").unwrap(),
            Duration::from_secs(u64::MAX)
        );
    }
}
