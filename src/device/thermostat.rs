// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat façade.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::{ThermostatCommand, send_command};
use crate::error::{Error, ValueError};
use crate::protocol::DweloClient;
use crate::registry::DeviceInfo;
use crate::sensor::{ThermostatData, decode_thermostat};
use crate::types::{DeviceKind, ThermostatActivity, ThermostatMode};

use super::{accepted, ensure_kind, poll_snapshot};

/// A Dwelo thermostat with its last known state.
#[derive(Debug, Clone)]
pub struct Thermostat {
    client: DweloClient,
    info: DeviceInfo,
    data: Arc<RwLock<ThermostatData>>,
}

impl Thermostat {
    /// Creates a façade for a thermostat and polls its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::KindMismatch`](crate::error::DeviceError::KindMismatch)
    /// without any network call if `info` is not a thermostat, and the poll
    /// error if the initial state cannot be fetched or decoded.
    pub async fn from_metadata(client: DweloClient, info: DeviceInfo) -> Result<Self, Error> {
        ensure_kind(&info, DeviceKind::Thermostat)?;
        let data = Self::poll(&client, &info).await?;
        Ok(Self {
            client,
            info,
            data: Arc::new(RwLock::new(data)),
        })
    }

    async fn poll(client: &DweloClient, info: &DeviceInfo) -> Result<ThermostatData, Error> {
        let snapshot = poll_snapshot(client, info).await?;
        decode_thermostat(&snapshot).map_err(|e| {
            tracing::warn!(device_id = %info.uid(), error = %e, "Failed to decode thermostat");
            Error::Parse(e)
        })
    }

    /// Polls the thermostat and replaces the stored state.
    ///
    /// On failure the previous state is kept and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway report cannot be fetched or the
    /// thermostat's readings cannot be decoded.
    pub async fn refresh(&self) -> Result<ThermostatData, Error> {
        let data = Self::poll(&self.client, &self.info).await?;
        *self.data.write() = data;
        tracing::debug!(device_id = %self.info.uid(), ?data, "Updated thermostat");
        Ok(data)
    }

    /// Sends a command to the thermostat.
    ///
    /// The stored state is unchanged; call [`refresh`](Self::refresh)
    /// afterwards to observe the result.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CommandRejected`](crate::error::DeviceError::CommandRejected)
    /// if the API did not accept the command.
    pub async fn apply(&self, command: ThermostatCommand) -> Result<(), Error> {
        tracing::info!(device_id = %self.info.uid(), ?command, "Applying thermostat command");
        let response = send_command(&self.client, &self.info, &command).await?;
        accepted(&self.info, response)
    }

    /// Makes a mode active.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn set_mode(&self, mode: ThermostatMode) -> Result<(), Error> {
        self.apply(ThermostatCommand::SetMode(mode)).await
    }

    /// Sets the target temperature of a mode without activating it.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] for an invalid temperature or
    /// [`ThermostatMode::Off`], otherwise see [`apply`](Self::apply).
    pub async fn set_temperature(&self, temperature: f64, mode: ThermostatMode) -> Result<(), Error> {
        self.apply(ThermostatCommand::set_temperature(temperature, mode)?)
            .await
    }

    /// Sets the target temperature of the currently active mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidThermostatMode`] if the thermostat is
    /// off, otherwise see [`set_temperature`](Self::set_temperature).
    pub async fn set_target_temperature(&self, temperature: f64) -> Result<(), Error> {
        let mode = self.mode();
        if mode == ThermostatMode::Off {
            return Err(ValueError::InvalidThermostatMode(mode.to_string()).into());
        }
        self.set_temperature(temperature, mode).await
    }

    /// Returns the device identity.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns a stable id for the host platform.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("thermostat_{}", self.info.uid())
    }

    /// Returns the last known state.
    #[must_use]
    pub fn data(&self) -> ThermostatData {
        *self.data.read()
    }

    /// Returns the last measured temperature.
    #[must_use]
    pub fn current_temperature(&self) -> f64 {
        self.data.read().current_temperature
    }

    /// Returns the configured mode.
    #[must_use]
    pub fn mode(&self) -> ThermostatMode {
        self.data.read().mode
    }

    /// Returns what the thermostat is currently doing.
    #[must_use]
    pub fn activity(&self) -> ThermostatActivity {
        self.data.read().activity
    }

    /// Returns the target temperature of the active mode, `None` when off.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.data.read().target_temperature()
    }
}
