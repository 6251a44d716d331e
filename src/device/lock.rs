// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock façade.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::{LockCommand, send_command};
use crate::error::Error;
use crate::protocol::DweloClient;
use crate::registry::DeviceInfo;
use crate::sensor::{LockData, decode_lock};
use crate::types::{DeviceKind, LockState};

use super::{accepted, ensure_kind, poll_snapshot};

/// A Dwelo lock with its last known state.
#[derive(Debug, Clone)]
pub struct Lock {
    client: DweloClient,
    info: DeviceInfo,
    data: Arc<RwLock<LockData>>,
}

impl Lock {
    /// Creates a façade for a lock and polls its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::KindMismatch`](crate::error::DeviceError::KindMismatch)
    /// without any network call if `info` is not a lock, and the poll error
    /// if the initial state cannot be fetched or decoded.
    pub async fn from_metadata(client: DweloClient, info: DeviceInfo) -> Result<Self, Error> {
        ensure_kind(&info, DeviceKind::Lock)?;
        let data = Self::poll(&client, &info).await?;
        Ok(Self {
            client,
            info,
            data: Arc::new(RwLock::new(data)),
        })
    }

    async fn poll(client: &DweloClient, info: &DeviceInfo) -> Result<LockData, Error> {
        let snapshot = poll_snapshot(client, info).await?;
        decode_lock(&snapshot, info).map_err(|e| {
            tracing::warn!(device_id = %info.uid(), error = %e, "Failed to decode lock");
            Error::Parse(e)
        })
    }

    /// Polls the lock and replaces the stored state.
    ///
    /// On failure the previous state is kept and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway report cannot be fetched or the lock's
    /// readings cannot be decoded.
    pub async fn refresh(&self) -> Result<LockData, Error> {
        let data = Self::poll(&self.client, &self.info).await?;
        *self.data.write() = data;
        tracing::debug!(device_id = %self.info.uid(), ?data, "Updated lock");
        Ok(data)
    }

    /// Sends a command to the lock.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CommandRejected`](crate::error::DeviceError::CommandRejected)
    /// if the API did not accept the command.
    pub async fn apply(&self, command: LockCommand) -> Result<(), Error> {
        tracing::info!(device_id = %self.info.uid(), target = %command.target(), "Applying lock command");
        let response = send_command(&self.client, &self.info, &command).await?;
        accepted(&self.info, response)
    }

    /// Locks.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn lock(&self) -> Result<(), Error> {
        self.apply(LockCommand::lock()).await
    }

    /// Unlocks.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub async fn unlock(&self) -> Result<(), Error> {
        self.apply(LockCommand::unlock()).await
    }

    /// Returns the device identity.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns a stable id for the host platform.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("lock_{}", self.info.uid())
    }

    /// Returns the last known state.
    #[must_use]
    pub fn data(&self) -> LockData {
        *self.data.read()
    }

    /// Returns `true` if the lock was locked at the last poll.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.data.read().state == LockState::Locked
    }

    /// Returns the battery level in percent.
    #[must_use]
    pub fn battery_level(&self) -> u8 {
        self.data.read().battery_level
    }

    /// Returns the online flag.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.data.read().is_online
    }
}
