// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat commands.

use crate::command::{Command, CommandValue};
use crate::error::ValueError;
use crate::types::{DeviceKind, ThermostatMode};

/// Command to change a thermostat's mode or target temperature.
///
/// Setting a temperature targets the given mode without making it active:
/// the heat target can be changed while the thermostat is cooling. Send
/// [`SetMode`](Self::SetMode) as well for the change to take effect now.
///
/// # Examples
///
/// ```
/// use dwelo_lib::command::{Command, ThermostatCommand};
/// use dwelo_lib::types::ThermostatMode;
///
/// let mode = ThermostatCommand::SetMode(ThermostatMode::Cool);
/// assert_eq!(mode.command(), "cool");
/// assert_eq!(mode.command_value(), None);
///
/// assert!(ThermostatCommand::set_temperature(f64::NAN, ThermostatMode::Heat).is_err());
/// assert!(ThermostatCommand::set_temperature(70.0, ThermostatMode::Off).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermostatCommand {
    /// Make a mode active.
    SetMode(ThermostatMode),
    /// Set the target temperature of a mode.
    SetTemperature {
        /// The mode whose target changes.
        mode: ThermostatMode,
        /// The new target.
        temperature: f64,
    },
}

impl ThermostatCommand {
    /// Creates a command that sets the target temperature of `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`] for a non-finite
    /// temperature and [`ValueError::InvalidThermostatMode`] for
    /// [`ThermostatMode::Off`], which has no target.
    pub fn set_temperature(temperature: f64, mode: ThermostatMode) -> Result<Self, ValueError> {
        if !temperature.is_finite() {
            return Err(ValueError::InvalidTemperature(temperature.to_string()));
        }
        if mode == ThermostatMode::Off {
            return Err(ValueError::InvalidThermostatMode(mode.to_string()));
        }
        Ok(Self::SetTemperature { mode, temperature })
    }
}

impl Command for ThermostatCommand {
    fn target_kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }

    fn command(&self) -> &'static str {
        match self {
            Self::SetMode(mode) | Self::SetTemperature { mode, .. } => mode.as_str(),
        }
    }

    fn command_value(&self) -> Option<CommandValue> {
        match self {
            Self::SetMode(_) => None,
            Self::SetTemperature { temperature, .. } => Some(CommandValue::Number(*temperature)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_mode_payload() {
        let payload = ThermostatCommand::SetMode(ThermostatMode::Off).to_payload();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"command": "off"})
        );
    }

    #[test]
    fn set_temperature_payload() {
        let payload = ThermostatCommand::set_temperature(68.0, ThermostatMode::Cool)
            .unwrap()
            .to_payload();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"command": "cool", "commandValue": 68.0})
        );
    }

    #[test]
    fn set_temperature_rejects_infinite() {
        assert!(matches!(
            ThermostatCommand::set_temperature(f64::INFINITY, ThermostatMode::Heat),
            Err(ValueError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn targets_thermostats() {
        assert_eq!(
            ThermostatCommand::SetMode(ThermostatMode::Heat).target_kind(),
            DeviceKind::Thermostat
        );
    }
}
