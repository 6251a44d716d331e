// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor polling and state decoding.
//!
//! Dwelo does not expose per-device state. The `sensor/gateway/{id}`
//! endpoint returns every reading of every device behind a gateway as a
//! flat list of `(deviceId, sensorType, value)` entries. Decoding a device
//! takes three steps:
//!
//! 1. [`fetch_gateway_report`] gets the gateway's [`SensorReport`]
//! 2. [`SensorReport::extract_device`] keeps the device's readings as a
//!    [`SensorSnapshot`]
//! 3. [`decode_thermostat`] or [`decode_lock`] turns the snapshot into
//!    typed state
//!
//! # Examples
//!
//! ```no_run
//! use dwelo_lib::protocol::ClientConfig;
//! use dwelo_lib::sensor::{decode_thermostat, fetch_gateway_report};
//!
//! # async fn example() -> dwelo_lib::Result<()> {
//! let client = ClientConfig::new("me@example.com", "hunter2").into_client()?;
//! client.login().await?;
//!
//! if let Some(report) = fetch_gateway_report(&client, "1234").await? {
//!     let data = decode_thermostat(&report.extract_device("5678"))?;
//!     println!("{} degrees", data.current_temperature);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod decode;
mod report;

pub(crate) use cache::ReportCache;
pub use decode::{
    LockData, ThermostatData, decode_lock, decode_thermostat, lock_sensors, thermostat_sensors,
};
pub use report::{SensorReading, SensorReport, SensorSnapshot};

use std::sync::Arc;

use crate::error::Error;
use crate::protocol::DweloClient;

const GATEWAY_ENDPOINT: &str = "sensor/gateway/";

/// Builds the sensor report path for a gateway.
#[must_use]
pub fn gateway_path(gateway_id: &str) -> String {
    format!("{GATEWAY_ENDPOINT}{}", urlencoding::encode(gateway_id))
}

/// Fetches the sensor report of a gateway.
///
/// Returns `Ok(None)` if the API gave no data. When the client has a report
/// cache configured, a fresh cached report is returned without a request.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingCredential`](crate::error::ProtocolError::MissingCredential)
/// before login, and [`ParseError`](crate::error::ParseError) if the response
/// has no `results` array.
pub async fn fetch_gateway_report(
    client: &DweloClient,
    gateway_id: &str,
) -> Result<Option<Arc<SensorReport>>, Error> {
    if let Some(report) = client.report_cache().get(gateway_id) {
        tracing::debug!(gateway_id, "Using cached gateway report");
        return Ok(Some(report));
    }

    let Some(response) = client.get(&gateway_path(gateway_id)).await? else {
        tracing::error!(gateway_id, "No sensor data for gateway");
        return Ok(None);
    };

    let report = Arc::new(SensorReport::from_response(&response)?);
    client.report_cache().insert(gateway_id, Arc::clone(&report));
    Ok(Some(report))
}
