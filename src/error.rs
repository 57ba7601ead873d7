use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No tokens provided")]
    NoPositions,

    #[error("Invalid Solana address provided: {0:?}")]
    InvalidSolanaAddress(String),

    #[error("Invalid tokens: API responded with status {status}")]
    InvalidTokens { status: u16 },

    #[error("Decimals not found for token {0}")]
    DecimalsNotFound(String),

    #[error("No liquidity reported for token {0}")]
    NoLiquidity(String),

    #[error("No price returned for token {0}")]
    MissingPrice(String),

    #[error("API returned no data for {0}")]
    EmptyData(String),

    #[error("Invalid time range: from {from} is after to {to}")]
    InvalidTimeRange { from: i64, to: i64 },

    #[error("Unrecognised method \"{method}\" passed for query - {url}")]
    UnsupportedMethod { method: String, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate limited by upstream API")]
    RateLimited,

    #[error("Upstream server error: status {0}")]
    Upstream(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    NoPositions,
    InvalidSolanaAddress,
    InvalidTokens,
    DecimalsNotFound,
    NoLiquidity,
    MissingPrice,
    EmptyData,
    InvalidTimeRange,
    UnsupportedMethod,
    Network,
    Timeout,
    RateLimited,
    Upstream,
    Decode,
    Config,
}

impl ClientError {
    pub fn error_type(&self) -> ClientErrorKind {
        match self {
            ClientError::NoPositions => ClientErrorKind::NoPositions,
            ClientError::InvalidSolanaAddress(_) => ClientErrorKind::InvalidSolanaAddress,
            ClientError::InvalidTokens { .. } => ClientErrorKind::InvalidTokens,
            ClientError::DecimalsNotFound(_) => ClientErrorKind::DecimalsNotFound,
            ClientError::NoLiquidity(_) => ClientErrorKind::NoLiquidity,
            ClientError::MissingPrice(_) => ClientErrorKind::MissingPrice,
            ClientError::EmptyData(_) => ClientErrorKind::EmptyData,
            ClientError::InvalidTimeRange { .. } => ClientErrorKind::InvalidTimeRange,
            ClientError::UnsupportedMethod { .. } => ClientErrorKind::UnsupportedMethod,
            ClientError::Network(_) => ClientErrorKind::Network,
            ClientError::Timeout(_) => ClientErrorKind::Timeout,
            ClientError::RateLimited => ClientErrorKind::RateLimited,
            ClientError::Upstream(_) => ClientErrorKind::Upstream,
            ClientError::Decode(_) => ClientErrorKind::Decode,
            ClientError::Config(_) => ClientErrorKind::Config,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.error_type(),
            ClientErrorKind::Network
                | ClientErrorKind::Timeout
                | ClientErrorKind::RateLimited
                | ClientErrorKind::Upstream
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_retryable() {
        assert!(ClientError::Network("reset".into()).is_retryable());
        assert!(ClientError::Timeout(Duration::from_secs(10)).is_retryable());
        assert!(ClientError::RateLimited.is_retryable());
        assert!(ClientError::Upstream(503).is_retryable());
    }

    #[test]
    fn request_errors_are_not_retryable() {
        assert!(!ClientError::NoPositions.is_retryable());
        assert!(!ClientError::InvalidTokens { status: 400 }.is_retryable());
        assert!(!ClientError::InvalidSolanaAddress("abc".into()).is_retryable());
        assert!(!ClientError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn unsupported_method_message_names_method_and_url() {
        let err = ClientError::UnsupportedMethod {
            method: "PUT".into(),
            url: "https://example.com/multi_price".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unrecognised method \"PUT\" passed for query - https://example.com/multi_price"
        );
    }
}
