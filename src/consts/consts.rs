use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ActivityName(pub String);

impl ActivityName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActivityName {
    fn from(value: &str) -> Self {
        ActivityName(value.to_string())
    }
}

/// An email that has passed the superficial check: non-empty and containing an "@".
/// Full address grammar is intentionally not enforced.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantEmail(String);

#[derive(Error, Debug, PartialEq)]
pub enum ParticipantEmailError {
    #[error("Invalid email address: email must not be empty")]
    Empty,
    #[error("Invalid email address: {0}")]
    MissingAt(String),
}

impl TryFrom<String> for ParticipantEmail {
    type Error = ParticipantEmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ParticipantEmailError::Empty);
        }

        if !value.contains('@') {
            return Err(ParticipantEmailError::MissingAt(value));
        }

        Ok(ParticipantEmail(value))
    }
}

impl TryFrom<&str> for ParticipantEmail {
    type Error = ParticipantEmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ParticipantEmail::try_from(value.to_string())
    }
}

impl From<ParticipantEmail> for String {
    fn from(value: ParticipantEmail) -> Self {
        value.0
    }
}

impl ParticipantEmail {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Values
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
