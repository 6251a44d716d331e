// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `dwelo_lib` - A Rust library to poll and control Dwelo devices.
//!
//! This library talks to the Dwelo cloud API to discover thermostats and
//! locks, decode their state from gateway sensor reports, and send them
//! commands.
//!
//! # Supported Devices
//!
//! - **Thermostats**: current temperature, mode, heat/cool targets, activity
//! - **Locks**: lock position, battery level
//!
//! # How State Is Read
//!
//! Dwelo has no per-device state endpoint and no push channel. Each device
//! belongs to a gateway, and the gateway reports the readings of all its
//! devices in one response. A poll fetches that report and keeps the
//! entries of one device. Polling cadence belongs to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use dwelo_lib::manager::DeviceManager;
//! use dwelo_lib::protocol::ClientConfig;
//! use dwelo_lib::types::ThermostatMode;
//!
//! #[tokio::main]
//! async fn main() -> dwelo_lib::Result<()> {
//!     let manager = DeviceManager::from_config(ClientConfig::new("me@example.com", "hunter2"))?;
//!     let devices = manager.setup().await?;
//!
//!     for thermostat in &devices.thermostats {
//!         println!("{}: {}", thermostat.info().name(), thermostat.current_temperature());
//!         thermostat.set_temperature(70.0, ThermostatMode::Heat).await?;
//!         thermostat.refresh().await?;
//!     }
//!
//!     for lock in &devices.locks {
//!         if !lock.is_locked() {
//!             lock.lock().await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Access
//!
//! ```no_run
//! use dwelo_lib::protocol::ClientConfig;
//! use dwelo_lib::registry::DeviceRegistry;
//! use dwelo_lib::sensor::{decode_lock, fetch_gateway_report};
//!
//! # async fn example() -> dwelo_lib::Result<()> {
//! let client = ClientConfig::new("me@example.com", "hunter2").into_client()?;
//! client.login().await?;
//!
//! let registry = DeviceRegistry::new(client.clone());
//! for info in registry.discover().await?.values() {
//!     if let Some(report) = fetch_gateway_report(&client, info.gateway_id()).await? {
//!         let snapshot = report.extract_device(info.uid());
//!         if let Ok(lock) = decode_lock(&snapshot, info) {
//!             println!("{} is {}", info.name(), lock.state);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod device;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod registry;
pub mod sensor;
pub mod types;

pub use command::{Command, CommandPayload, CommandValue, LockCommand, ThermostatCommand};
pub use device::{Lock, Thermostat};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use manager::{DeviceManager, ManagedDevices, RefreshSummary};
pub use protocol::{ClientConfig, Credentials, DweloClient};
pub use registry::{DeviceInfo, DeviceRegistry, DiscoveryQuery};
pub use sensor::{LockData, SensorReport, SensorSnapshot, ThermostatData};
pub use types::{DeviceKind, LockState, ThermostatActivity, ThermostatMode};
