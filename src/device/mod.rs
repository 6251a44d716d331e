// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device façades.
//!
//! A façade pairs a [`DeviceInfo`] with the last state decoded for it and
//! the commands that apply to it. [`Thermostat`] and [`Lock`] share the same
//! shape:
//!
//! - `from_metadata` checks the device kind and polls once; a device that
//!   cannot be decoded yields no façade
//! - `refresh` polls again and replaces the stored state, or keeps the last
//!   good state and returns the error
//! - `apply` sends a command; the new state shows up on a later `refresh`
//!
//! Commands are not read-after-write consistent: a `refresh` right after
//! `apply` may still see the old state until the provider catches up.
//!
//! # Examples
//!
//! ```no_run
//! use dwelo_lib::device::Lock;
//! use dwelo_lib::protocol::ClientConfig;
//! use dwelo_lib::registry::DeviceRegistry;
//! use dwelo_lib::types::DeviceKind;
//!
//! # async fn example() -> dwelo_lib::Result<()> {
//! let client = ClientConfig::new("me@example.com", "hunter2").into_client()?;
//! client.login().await?;
//!
//! let devices = DeviceRegistry::new(client.clone()).discover().await?;
//! for info in devices.into_values().filter(|d| d.kind() == DeviceKind::Lock) {
//!     let lock = Lock::from_metadata(client.clone(), info).await?;
//!     lock.lock().await?;
//!     lock.refresh().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod lock;
mod thermostat;

pub use lock::Lock;
pub use thermostat::Thermostat;

use serde_json::Value;

use crate::error::{DeviceError, Error};
use crate::protocol::DweloClient;
use crate::registry::DeviceInfo;
use crate::sensor::{SensorSnapshot, fetch_gateway_report};
use crate::types::DeviceKind;

/// Fails unless the device is of the expected kind.
fn ensure_kind(info: &DeviceInfo, expected: DeviceKind) -> Result<(), Error> {
    if info.kind() == expected {
        Ok(())
    } else {
        tracing::error!(device_id = %info.uid(), kind = %info.kind(), expected = %expected, "Device kind mismatch");
        Err(DeviceError::KindMismatch {
            device_id: info.uid().to_string(),
            expected,
            actual: info.kind(),
        }
        .into())
    }
}

/// Polls the device's gateway and keeps this device's readings.
async fn poll_snapshot(client: &DweloClient, info: &DeviceInfo) -> Result<SensorSnapshot, Error> {
    match fetch_gateway_report(client, info.gateway_id()).await? {
        Some(report) => Ok(report.extract_device(info.uid())),
        None => Err(Error::NoData {
            device_id: info.uid().to_string(),
        }),
    }
}

/// Turns a missing command response into an error.
fn accepted(info: &DeviceInfo, response: Option<Value>) -> Result<(), Error> {
    match response {
        Some(_) => Ok(()),
        None => Err(DeviceError::CommandRejected(info.uid().to_string()).into()),
    }
}
