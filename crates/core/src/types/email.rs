//! Email address type.
//!
//! Guest chat participants are identified only by a self-reported email,
//! so this is the one piece of validation resolved without a network
//! round-trip. The shape check is deliberately loose: something before an
//! `@`, a dotted domain after it, no whitespace anywhere.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {0} characters")]
    TooLong(usize),
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after the @) is empty, dotless, or contains
    /// another @.
    #[error("email domain must contain a dot")]
    InvalidDomain,
}

/// A shape-validated email address.
///
/// ```
/// use orchard_core::Email;
///
/// assert!(Email::parse("user.name+tag@example.co.uk").is_ok());
/// assert!(Email::parse("user@localhost").is_err()); // dotless domain
/// assert!(Email::parse("user name@example.com").is_err()); // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains
    /// whitespace, lacks an @ symbol, or has an empty local part or a
    /// dotless domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The part before the @.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// The part after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        for ok in [
            "user@example.com",
            "user.name+tag@example.com",
            "user@sub.example.co.uk",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn test_rejects_each_shape_violation() {
        use EmailError as E;
        let cases = [
            ("", E::Empty),
            ("user name@example.com", E::ContainsWhitespace),
            ("no-at-symbol", E::MissingAtSymbol),
            ("@example.com", E::EmptyLocalPart),
            ("user@", E::InvalidDomain),
            ("user@localhost", E::InvalidDomain),
            ("user@a@b.com", E::InvalidDomain),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input).unwrap_err(), expected, "{input}");
        }
    }

    #[test]
    fn test_rejects_over_length() {
        let long = format!("{}@example.com", "a".repeat(Email::MAX_LENGTH));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong(_))));
    }

    #[test]
    fn test_parts() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(email.local_part(), "user");
        assert_eq!(email.domain(), "example.com");
        assert_eq!(email.to_string(), "user@example.com");
    }

    #[test]
    fn test_serde_transparent() {
        let email: Email = serde_json::from_str("\"user@example.com\"").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"user@example.com\"");
    }
}
