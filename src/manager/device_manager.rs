// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device manager for a Dwelo account.

use std::collections::HashMap;

use crate::device::{Lock, Thermostat};
use crate::error::Error;
use crate::protocol::{ClientConfig, DweloClient};
use crate::registry::{DeviceInfo, DeviceRegistry};
use crate::types::DeviceKind;

/// Façades built for the devices of an account.
#[derive(Debug, Clone, Default)]
pub struct ManagedDevices {
    /// Thermostats, ordered by device id.
    pub thermostats: Vec<Thermostat>,
    /// Locks, ordered by device id.
    pub locks: Vec<Lock>,
}

impl ManagedDevices {
    /// Returns the number of façades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thermostats.len() + self.locks.len()
    }

    /// Returns `true` if no device could be set up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of refreshing every managed device once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Devices whose state was replaced.
    pub refreshed: usize,
    /// Devices that kept their last known state.
    pub failed: usize,
}

/// Coordinates login, discovery and façade construction for one account.
#[derive(Debug, Clone)]
pub struct DeviceManager {
    client: DweloClient,
    registry: DeviceRegistry,
}

impl DeviceManager {
    /// Creates a manager around an existing client.
    #[must_use]
    pub fn new(client: DweloClient) -> Self {
        let registry = DeviceRegistry::new(client.clone());
        Self { client, registry }
    }

    /// Creates a manager from a configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::new(config.into_client()?))
    }

    /// Returns the client.
    #[must_use]
    pub fn client(&self) -> &DweloClient {
        &self.client
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Logs in.
    ///
    /// # Errors
    ///
    /// See [`DweloClient::login`].
    pub async fn login(&self) -> Result<(), Error> {
        self.client.login().await
    }

    /// Discovers the account's devices.
    ///
    /// # Errors
    ///
    /// See [`DeviceRegistry::discover`].
    pub async fn discover(&self) -> Result<HashMap<String, DeviceInfo>, Error> {
        self.registry.discover().await
    }

    /// Logs in, discovers, and builds a façade for every device.
    ///
    /// Whether an empty result should fail the host's setup is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns the login error if authentication fails.
    pub async fn setup(&self) -> Result<ManagedDevices, Error> {
        self.login().await?;
        let devices = self.discover().await?;
        self.build_devices(devices.into_values()).await
    }

    /// Builds façades for the given devices.
    ///
    /// A device whose first poll fails is logged and left out. Only an
    /// authentication error stops the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingCredential`](crate::error::ProtocolError::MissingCredential)
    /// if called before login.
    pub async fn build_devices(
        &self,
        devices: impl IntoIterator<Item = DeviceInfo>,
    ) -> Result<ManagedDevices, Error> {
        let mut devices: Vec<DeviceInfo> = devices.into_iter().collect();
        devices.sort_by(|a, b| a.uid().cmp(b.uid()));

        let mut managed = ManagedDevices::default();
        for info in devices {
            let uid = info.uid().to_string();
            let built = match info.kind() {
                DeviceKind::Thermostat => Thermostat::from_metadata(self.client.clone(), info)
                    .await
                    .map(|t| managed.thermostats.push(t)),
                DeviceKind::Lock => Lock::from_metadata(self.client.clone(), info)
                    .await
                    .map(|l| managed.locks.push(l)),
            };

            match built {
                Ok(()) => {}
                Err(e) if e.is_auth_error() => return Err(e),
                Err(e) => {
                    tracing::error!(device_id = %uid, error = %e, "Failed to initialize device");
                }
            }
        }

        tracing::info!(
            thermostats = managed.thermostats.len(),
            locks = managed.locks.len(),
            "Dwelo devices ready"
        );
        Ok(managed)
    }

    /// Refreshes every managed device once.
    ///
    /// Devices that fail keep their last known state.
    ///
    /// # Errors
    ///
    /// Returns an authentication error as soon as one is hit, since every
    /// remaining device would fail the same way.
    pub async fn refresh_all(&self, devices: &ManagedDevices) -> Result<RefreshSummary, Error> {
        let mut summary = RefreshSummary::default();

        for thermostat in &devices.thermostats {
            Self::tally(&mut summary, thermostat.info(), thermostat.refresh().await.map(drop))?;
        }
        for lock in &devices.locks {
            Self::tally(&mut summary, lock.info(), lock.refresh().await.map(drop))?;
        }

        Ok(summary)
    }

    fn tally(
        summary: &mut RefreshSummary,
        info: &DeviceInfo,
        result: Result<(), Error>,
    ) -> Result<(), Error> {
        match result {
            Ok(()) => summary.refreshed += 1,
            Err(e) if e.is_auth_error() => return Err(e),
            Err(e) => {
                tracing::warn!(device_id = %info.uid(), error = %e, "Keeping last known state");
                summary.failed += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_devices_len() {
        let managed = ManagedDevices::default();
        assert!(managed.is_empty());
        assert_eq!(managed.len(), 0);
    }

    #[tokio::test]
    async fn build_devices_before_login_fails_loudly() {
        let manager = DeviceManager::from_config(ClientConfig::new("a", "b")).unwrap();
        let devices = vec![DeviceInfo::new("1", DeviceKind::Lock, "Door", "gw")];

        let result = manager.build_devices(devices).await;
        assert!(matches!(result, Err(ref e) if e.is_auth_error()));
    }

    #[tokio::test]
    async fn build_no_devices() {
        let manager = DeviceManager::from_config(ClientConfig::new("a", "b")).unwrap();
        let managed = manager.build_devices(Vec::new()).await.unwrap();
        assert!(managed.is_empty());
    }
}
