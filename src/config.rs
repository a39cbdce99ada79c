//! Bulb system information and client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, serde_as};

use crate::transport::Transport;

/// System and firmware facts reported by `getSystemConfig`.
///
/// Only the hardware address and firmware naming are understood. Every other
/// field (`homeId`, `roomId`, `typeId`, `groupId`, `drvConf`, lock flags, ...)
/// is kept verbatim in [`SystemInfo::opaque`] and never interpreted.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemInfo {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub mac: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub module_name: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub fw_version: String,
    #[serde(flatten)]
    opaque: Map<String, Value>,
}

impl SystemInfo {
    /// An opaque field exactly as the bulb sent it.
    pub fn opaque(&self, key: &str) -> Option<&Value> {
        self.opaque.get(key)
    }

    /// Names of all opaque fields.
    pub fn opaque_keys(&self) -> impl Iterator<Item = &str> {
        self.opaque.keys().map(String::as_str)
    }
}

/// Tunables for a [`Light`](crate::Light).
///
/// The defaults match the bulb's documented behavior: port 38899, a ten second
/// receive deadline, and a write path that neither rejects device-reported
/// errors nor undoes the local edit when the bulb cannot be reached.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wizhard_rs::ClientOptions;
///
/// let options = ClientOptions::default()
///     .with_timeout(Duration::from_secs(2))
///     .with_rollback_on_failure(true);
/// assert_eq!(options.port, 38899);
/// assert!(!options.reject_device_errors);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    pub port: u16,
    pub timeout: Duration,
    /// Fail `write()` when the acknowledgment carries an error or
    /// `success: false`.
    pub reject_device_errors: bool,
    /// Restore the last confirmed state when `write()` fails.
    pub rollback_on_failure: bool,
    /// Refuse `write()` until a read has succeeded.
    pub require_ready: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            port: Self::PORT,
            timeout: Transport::DEFAULT_TIMEOUT,
            reject_device_errors: false,
            rollback_on_failure: false,
            require_ready: false,
        }
    }
}

impl ClientOptions {
    pub const PORT: u16 = 38899;

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_reject_device_errors(mut self, reject: bool) -> Self {
        self.reject_device_errors = reject;
        self
    }

    pub fn with_rollback_on_failure(mut self, rollback: bool) -> Self {
        self.rollback_on_failure = rollback;
        self
    }

    pub fn with_require_ready(mut self, require: bool) -> Self {
        self.require_ready = require;
        self
    }
}
