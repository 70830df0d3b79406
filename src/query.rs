//! Query validation at the edge of the service
//!
//! The ranker assumes a non-blank query. Every driver (CLI, HTTP) parses the
//! raw input into a [`Query`] first and rejects blanks as a client error.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query parameter is required and must be a non-empty string")]
    Empty,
}

/// A trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let query = Query::parse("  reset password \n").unwrap();
        assert_eq!(query.as_str(), "reset password");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Query::parse(""), Err(QueryError::Empty));
        assert_eq!(Query::parse("   \t "), Err(QueryError::Empty));
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let query = Query::parse("reset   password").unwrap();
        assert_eq!(query.to_string(), "reset   password");
    }
}
