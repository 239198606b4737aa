use thiserror::Error;

/// Failures raised by the test fixture itself.
///
/// None of these are meant to be recovered by the code under test: they mean
/// the fixture is misconfigured, and the conventional reaction in test code is
/// to halt the test (`.expect(..)` or `?` out of the test function).
#[derive(Error, Debug, Clone)]
pub enum FixtureError {
    #[error("Invalid zone text at line {line}: {message}")]
    InvalidZone { line: usize, message: String },

    #[error("Failed to bind UDP listener: {0}")]
    Bind(String),

    #[error("Failed to shut down DNS server: {0}")]
    Shutdown(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("DNS exchange failed: {0}")]
    Exchange(String),

    #[error("Query timeout: {0}")]
    Timeout(String),

    #[error("Invalid DNS response: {0}")]
    InvalidResponse(String),
}

impl FixtureError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FixtureError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_zone_message_carries_line() {
        let err = FixtureError::InvalidZone {
            line: 3,
            message: "unknown record type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid zone text at line 3: unknown record type"
        );
    }

    #[test]
    fn test_is_timeout() {
        assert!(FixtureError::Timeout("127.0.0.1:53".to_string()).is_timeout());
        assert!(!FixtureError::Exchange("refused".to_string()).is_timeout());
    }
}
