// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account-wide setup and polling.
//!
//! [`DeviceManager`] is the surface a home-automation host needs: log in,
//! discover, build a façade for every supported device, and refresh them
//! all on each tick of the host's scheduler.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use dwelo_lib::manager::DeviceManager;
//! use dwelo_lib::protocol::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> dwelo_lib::Result<()> {
//!     let config = ClientConfig::new("me@example.com", "hunter2")
//!         .with_report_cache_ttl(Duration::from_secs(5));
//!     let manager = DeviceManager::from_config(config)?;
//!
//!     let devices = manager.setup().await?;
//!     if devices.is_empty() {
//!         eprintln!("no supported devices on this account");
//!         return Ok(());
//!     }
//!
//!     let mut ticker = tokio::time::interval(Duration::from_secs(30));
//!     loop {
//!         ticker.tick().await;
//!         let summary = manager.refresh_all(&devices).await?;
//!         println!("{} refreshed, {} stale", summary.refreshed, summary.failed);
//!     }
//! }
//! ```

mod device_manager;

pub use device_manager::{DeviceManager, ManagedDevices, RefreshSummary};
