// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Dwelo library.
//!
//! Failures are split by where they happen: value validation, talking to the
//! Dwelo API, decoding its responses, and operating on a device.
//!
//! Not every failure is an error. An API call that comes back with a non-2xx
//! status, times out, or returns a body that is not JSON is reported as
//! `Ok(None)` by [`DweloClient::request`](crate::protocol::DweloClient::request)
//! so that polling paths can skip a device for one cycle without tearing
//! anything down.

use thiserror::Error;

use crate::types::DeviceKind;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The API returned no usable data for a device poll.
    #[error("no data returned for device {device_id}")]
    NoData {
        /// The device that was polled.
        device_id: String,
    },
}

impl Error {
    /// Returns `true` if the error means the client must log in again.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Protocol(
                ProtocolError::AuthenticationFailed { .. } | ProtocolError::MissingCredential
            )
        )
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The API reported a device type this library does not model.
    #[error("unsupported device kind: {0}")]
    UnsupportedDeviceKind(String),

    /// An invalid thermostat mode string was provided.
    #[error("invalid thermostat mode: {0}")]
    InvalidThermostatMode(String),

    /// An invalid thermostat activity string was provided.
    #[error("invalid thermostat activity: {0}")]
    InvalidThermostatActivity(String),

    /// An invalid lock state string was provided.
    #[error("invalid lock state: {0}")]
    InvalidLockState(String),

    /// A temperature that cannot be sent to a thermostat.
    #[error("temperature {0} is not a finite number")]
    InvalidTemperature(String),
}

/// Errors related to communication with the Dwelo API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP client construction or login transport failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The login endpoint rejected the credentials.
    #[error("authentication failed (HTTP {status}): {body}")]
    AuthenticationFailed {
        /// HTTP status code returned by the login endpoint.
        status: u16,
        /// Response body, kept for diagnosis.
        body: String,
    },

    /// An authorized call was attempted before a successful login.
    #[error("no bearer token, login first")]
    MissingCredential,

    /// Invalid host URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to decoding Dwelo responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A façade or command was used against a device of another kind.
    #[error("device {device_id} is a {actual}, expected a {expected}")]
    KindMismatch {
        /// The device the operation targeted.
        device_id: String,
        /// The kind the operation requires.
        expected: DeviceKind,
        /// The kind the device actually is.
        actual: DeviceKind,
    },

    /// The API did not accept the command.
    #[error("command rejected for device {0}")]
    CommandRejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
