// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dwelo command definitions.
//!
//! Every command is posted to `device/{uid}/command/` as a JSON body with a
//! `command` name and an optional `commandValue`.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Body |
//! |-------------|---------|------|
//! | [`ThermostatCommand::SetMode`] | Change the active mode | `{"command": "heat"}` |
//! | [`ThermostatCommand::SetTemperature`] | Change the target of a mode | `{"command": "heat", "commandValue": 72.5}` |
//! | [`LockCommand`] | Lock or unlock | `{"command": "lock"}` |
//!
//! # Examples
//!
//! ```
//! use dwelo_lib::command::{Command, LockCommand, ThermostatCommand};
//! use dwelo_lib::types::ThermostatMode;
//!
//! let lock = LockCommand::lock();
//! assert_eq!(lock.command(), "lock");
//! assert_eq!(lock.command_value(), None);
//!
//! let heat = ThermostatCommand::set_temperature(72.5, ThermostatMode::Heat).unwrap();
//! assert_eq!(
//!     serde_json::to_value(heat.to_payload()).unwrap(),
//!     serde_json::json!({"command": "heat", "commandValue": 72.5})
//! );
//! ```

mod lock;
mod thermostat;

pub use lock::LockCommand;
pub use thermostat::ThermostatCommand;

use serde::Serialize;
use serde_json::Value;

use crate::error::{DeviceError, Error};
use crate::protocol::DweloClient;
use crate::registry::DeviceInfo;
use crate::types::DeviceKind;

const DEVICE_ENDPOINT: &str = "device/";

/// Value sent alongside a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandValue {
    /// A numeric value, e.g. a temperature.
    Number(f64),
    /// A text value.
    Text(String),
}

/// JSON body of a device command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPayload {
    /// The command name.
    pub command: String,
    /// The command value, omitted from the body when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_value: Option<CommandValue>,
}

impl CommandPayload {
    /// Creates a payload without a value.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            command_value: None,
        }
    }

    /// Attaches a value.
    #[must_use]
    pub fn with_value(mut self, value: CommandValue) -> Self {
        self.command_value = Some(value);
        self
    }
}

/// A command that can be sent to a Dwelo device.
pub trait Command {
    /// Returns the kind of device this command applies to.
    fn target_kind(&self) -> DeviceKind;

    /// Returns the command name.
    fn command(&self) -> &'static str;

    /// Returns the command value, if any.
    fn command_value(&self) -> Option<CommandValue>;

    /// Returns the JSON body for this command.
    fn to_payload(&self) -> CommandPayload {
        CommandPayload {
            command: self.command().to_string(),
            command_value: self.command_value(),
        }
    }
}

/// Builds the command path for a device.
#[must_use]
pub fn command_path(device_id: &str) -> String {
    format!("{DEVICE_ENDPOINT}{}/command/", urlencoding::encode(device_id))
}

/// Posts a command body to a device.
///
/// Returns `Ok(None)` if the API did not accept the command. Success means
/// the API answered with a 2xx status, not that the device has changed
/// state yet.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingCredential`](crate::error::ProtocolError::MissingCredential)
/// before login.
pub async fn send_device_command(
    client: &DweloClient,
    device_id: &str,
    payload: &CommandPayload,
) -> Result<Option<Value>, Error> {
    tracing::debug!(device_id, command = %payload.command, "Sending device command");

    let response = client.post(&command_path(device_id), payload).await?;
    if response.is_none() {
        tracing::error!(device_id, command = %payload.command, "Command was not accepted");
    }
    Ok(response)
}

/// Sends a typed command to a device after checking the device kind.
///
/// Drops any cached report of the device's gateway so the next poll goes
/// to the API.
///
/// # Errors
///
/// Returns [`DeviceError::KindMismatch`] without any network call if the
/// command is meant for another kind of device.
pub async fn send_command<C: Command + ?Sized>(
    client: &DweloClient,
    device: &DeviceInfo,
    command: &C,
) -> Result<Option<Value>, Error> {
    if command.target_kind() != device.kind() {
        return Err(DeviceError::KindMismatch {
            device_id: device.uid().to_string(),
            expected: command.target_kind(),
            actual: device.kind(),
        }
        .into());
    }

    let response = send_device_command(client, device.uid(), &command.to_payload()).await?;
    client.report_cache().invalidate(device.gateway_id());
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ClientConfig;

    #[test]
    fn payload_omits_missing_value() {
        let payload = CommandPayload::new("unlock");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"command": "unlock"})
        );
    }

    #[test]
    fn payload_text_value() {
        let payload = CommandPayload::new("mode").with_value(CommandValue::Text("eco".to_string()));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"command": "mode", "commandValue": "eco"})
        );
    }

    #[test]
    fn command_path_format() {
        assert_eq!(command_path("d1"), "device/d1/command/");
        assert_eq!(command_path("a b"), "device/a%20b/command/");
    }

    #[tokio::test]
    async fn kind_mismatch_is_rejected_before_sending() {
        // Never logged in: reaching the network would yield MissingCredential.
        let client = ClientConfig::new("a", "b").into_client().unwrap();
        let thermostat = DeviceInfo::new("t1", DeviceKind::Thermostat, "Hall", "gw");

        let result = send_command(&client, &thermostat, &LockCommand::lock()).await;
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::KindMismatch {
                expected: DeviceKind::Lock,
                actual: DeviceKind::Thermostat,
                ..
            }))
        ));
    }
}
