//! Wire messages exchanged with the bulb and their JSON codec.
//!
//! Requests look like `{"method": "setPilot", "env": "pro", "params": {...}}`;
//! responses echo the method and carry either a `result` or an `error`. The
//! echoed method is not checked against the request.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::SystemInfo;
use crate::errors::Error;
use crate::state::DeviceState;

type Result<T> = std::result::Result<T, Error>;

/// Methods this client sends.
///
/// The bulb also knows `syncPilot`, `pulse` and `registration`, which belong to
/// push and discovery flows and are not used here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Method {
    GetPilot,
    SetPilot,
    GetSystemConfig,
}

/// A request envelope.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    method: Method,
    env: Option<&'static str>,
    params: Option<DeviceState>,
}

impl Request {
    const ENV: &'static str = "pro";

    /// A parameterless query (`getPilot`, `getSystemConfig`).
    ///
    /// # Examples
    ///
    /// ```
    /// use wizhard_rs::{Method, Request, encode_request};
    ///
    /// let bytes = encode_request(&Request::query(Method::GetPilot)).unwrap();
    /// assert_eq!(bytes, br#"{"method":"getPilot"}"#);
    /// ```
    pub fn query(method: Method) -> Self {
        Request {
            method,
            env: None,
            params: None,
        }
    }

    /// A `setPilot` carrying the full `state`, with white channels zeroed and
    /// the echo fields set to their fixed values regardless of what `state`
    /// holds.
    pub fn set_pilot(state: &DeviceState) -> Self {
        let mut params = state.clone();
        params.normalize_for_write();
        Request {
            method: Method::SetPilot,
            env: Some(Self::ENV),
            params: Some(params),
        }
    }
}

/// An error payload reported by the bulb.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceError {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub code: i64,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub message: String,
}

/// The decoded acknowledgment of a `setPilot`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeAck {
    pub success: bool,
    pub error: Option<DeviceError>,
}

impl ChangeAck {
    /// Whether the bulb reported the change as applied without error.
    pub fn accepted(&self) -> bool {
        self.success && self.error.is_none()
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
struct Envelope<T> {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[allow(dead_code)]
    method: String,
    #[serde_as(deserialize_as = "Option<DefaultOnError>")]
    result: Option<T>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    error: Option<DeviceError>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChangeResult {
    #[serde_as(deserialize_as = "DefaultOnError")]
    success: bool,
}

/// Serialize a request to its wire form.
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(Error::JsonDump)
}

/// Decode a `getPilot` response.
///
/// Missing or mistyped fields in `result` decode as zero. A response with an
/// `error` and no `result` is reported as [`Error::Device`] rather than being
/// mistaken for an all-zero state.
///
/// # Examples
///
/// ```
/// use wizhard_rs::decode_status_response;
///
/// let state = decode_status_response(br#"{"method":"getPilot","result":{"state":true,"dimming":40}}"#).unwrap();
/// assert!(state.on());
/// assert_eq!(state.dimming(), 40);
/// assert_eq!(state.color().red(), 0);
/// ```
pub fn decode_status_response(bytes: &[u8]) -> Result<DeviceState> {
    decode_result(bytes)
}

/// Decode a `getSystemConfig` response.
pub fn decode_system_response(bytes: &[u8]) -> Result<SystemInfo> {
    decode_result(bytes)
}

/// Decode a `setPilot` acknowledgment.
///
/// The bulb's `error` payload is returned, not raised: whether it fails the
/// write is the caller's decision.
pub fn decode_change_response(bytes: &[u8]) -> Result<ChangeAck> {
    let envelope: Envelope<ChangeResult> = parse(bytes)?;
    Ok(ChangeAck {
        success: envelope.result.is_some_and(|r| r.success),
        error: envelope.error,
    })
}

fn decode_result<T>(bytes: &[u8]) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    let envelope: Envelope<T> = parse(bytes)?;
    match (envelope.result, envelope.error) {
        (Some(result), _) => Ok(result),
        (None, Some(err)) => Err(Error::device(err.code, &err.message)),
        (None, None) => Ok(T::default()),
    }
}

fn parse<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let text = String::from_utf8(bytes.to_vec()).map_err(Error::Utf8Decode)?;
    serde_json::from_str(&text).map_err(Error::JsonLoad)
}
