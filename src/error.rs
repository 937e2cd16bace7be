use std::fmt;
use thiserror::Error;

pub type OnsResult<T> = Result<T, OnsError>;

/// Revert reasons the ONS contracts are known to emit.
///
/// Anything the SDK has not seen before lands in `Unknown` and is translated
/// to a generic failure rather than leaking raw chain data to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// "ONS: NAME_EXPIRIES"
    NameExpired,
    /// "ONS: THIS_ADDRESS_IS_NOT_OWNER_ANYMORE"
    AddressNotOwner,
    /// "DOMAIN_IS_NOT_AVAILABLE"
    DomainNotAvailable,
    Unknown(String),
}

impl RevertReason {
    pub fn parse(reason: &str) -> Self {
        match reason {
            "ONS: NAME_EXPIRIES" => RevertReason::NameExpired,
            "ONS: THIS_ADDRESS_IS_NOT_OWNER_ANYMORE" => RevertReason::AddressNotOwner,
            "DOMAIN_IS_NOT_AVAILABLE" => RevertReason::DomainNotAvailable,
            other => RevertReason::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RevertReason::NameExpired => "ONS: NAME_EXPIRIES",
            RevertReason::AddressNotOwner => "ONS: THIS_ADDRESS_IS_NOT_OWNER_ANYMORE",
            RevertReason::DomainNotAvailable => "DOMAIN_IS_NOT_AVAILABLE",
            RevertReason::Unknown(reason) => reason,
        }
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum OnsError {
    #[error("Invalid address")]
    InvalidAddress,

    #[error("This name does not exist")]
    NameNotFound,

    #[error("User does not have a primary name")]
    NoPrimaryName,

    #[error("Domain is not available")]
    DomainNotAvailable,

    #[error("init() must be called first")]
    NotInitialized,

    #[error("Contract reverted: {0}")]
    Revert(RevertReason),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("ABI error: {0}")]
    AbiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Metadata error: {0}")]
    MetadataError(String),

    #[error("Something went wrong")]
    Unexpected,
}

impl OnsError {
    /// Collapse a low-level call failure into the fixed user-facing
    /// vocabulary. The original error is logged, not surfaced; callers
    /// needing finer diagnostics inspect the logs.
    pub fn translate(self) -> OnsError {
        match self {
            OnsError::Revert(RevertReason::NameExpired)
            | OnsError::Revert(RevertReason::AddressNotOwner) => OnsError::NoPrimaryName,
            OnsError::Revert(RevertReason::DomainNotAvailable) => OnsError::DomainNotAvailable,
            other => {
                tracing::error!(error = %other, "unrecognized contract failure");
                OnsError::Unexpected
            }
        }
    }
}

impl From<reqwest::Error> for OnsError {
    fn from(err: reqwest::Error) -> Self {
        OnsError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for OnsError {
    fn from(err: serde_json::Error) -> Self {
        OnsError::ParseError(err.to_string())
    }
}

impl From<hex::FromHexError> for OnsError {
    fn from(err: hex::FromHexError) -> Self {
        OnsError::ParseError(format!("Hex decode error: {}", err))
    }
}
