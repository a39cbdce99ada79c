use std::string::FromUtf8Error;

use uuid::Uuid;

/// Coarse classification of [`Error`], for callers that only care about the
/// failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Resolve, bind, connect, send or receive failed.
    Io,
    /// The bulb did not answer within the deadline.
    Timeout,
    /// The answer was not well-formed JSON.
    Decode,
    /// The bulb answered, but refused or was not ready for the request.
    Device,
    /// Accessory roster bookkeeping failed.
    Bridge,
}

/// All error types that can occur when talking to a Wiz bulb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize a request.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// The response body was not well-formed JSON.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// A network socket operation failed while communicating with a bulb.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// No datagram arrived before the receive deadline.
    #[error("no response from {address} within the deadline")]
    Timeout { address: String },

    /// The UDP response from a bulb contained invalid UTF-8.
    #[error("utf8 decoding error: {0:?}")]
    Utf8Decode(FromUtf8Error),

    /// The bulb acknowledged a request with an error payload.
    #[error("bulb rejected request (code {code}): {message}")]
    Device { code: i64, message: String },

    /// A write was attempted before any successful read.
    #[error("bulb {0} has not been read yet")]
    NotReady(String),

    /// The bulb address cannot be registered.
    #[error("bulb address {address} is invalid because it is {reason}")]
    InvalidAddress { address: String, reason: String },

    /// No accessory with this id is registered.
    #[error("accessory not found {0}")]
    AccessoryNotFound(Uuid),
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new timeout error
    pub fn timeout(address: &str) -> Self {
        Error::Timeout {
            address: address.to_string(),
        }
    }

    /// Create a new device error
    pub fn device(code: i64, message: &str) -> Self {
        Error::Device {
            code,
            message: message.to_string(),
        }
    }

    /// Create a new invalid address error
    pub fn invalid_address(address: &str, reason: &str) -> Self {
        Error::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Socket { .. } | Error::JsonDump(_) => ErrorKind::Io,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::JsonLoad(_) | Error::Utf8Decode(_) => ErrorKind::Decode,
            Error::Device { .. } | Error::NotReady(_) => ErrorKind::Device,
            Error::InvalidAddress { .. } | Error::AccessoryNotFound(_) => ErrorKind::Bridge,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    pub fn is_decode(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
