// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device discovery.
//!
//! The `device/` endpoint returns a flat list of every device on the
//! account. [`DeviceRegistry::discover`] turns it into a map of
//! [`DeviceInfo`] keyed by device id, skipping entries it cannot use, and
//! records the gateways those devices belong to.
//!
//! # Examples
//!
//! ```no_run
//! use dwelo_lib::protocol::ClientConfig;
//! use dwelo_lib::registry::DeviceRegistry;
//!
//! # async fn example() -> dwelo_lib::Result<()> {
//! let client = ClientConfig::new("me@example.com", "hunter2").into_client()?;
//! client.login().await?;
//!
//! let registry = DeviceRegistry::new(client);
//! for (uid, info) in registry.discover().await? {
//!     println!("{uid}: {} ({})", info.name(), info.kind());
//! }
//! # Ok(())
//! # }
//! ```

mod device_info;

pub use device_info::DeviceInfo;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Error;
use crate::protocol::DweloClient;

const DEVICE_ENDPOINT: &str = "device/";

/// Filters and paging for the device list endpoint.
///
/// # Examples
///
/// ```
/// use dwelo_lib::registry::DiscoveryQuery;
///
/// let query = DiscoveryQuery::new().gateway("gw 1").limit(50).offset(100);
/// assert_eq!(query.to_path(), "device/?gatewayId=gw%201&limit=50&offset=100");
///
/// assert_eq!(DiscoveryQuery::new().to_path(), "device/");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryQuery {
    gateway_id: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl DiscoveryQuery {
    /// Creates a query for every device on the account.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to one gateway.
    #[must_use]
    pub fn gateway(mut self, gateway_id: impl Into<String>) -> Self {
        self.gateway_id = Some(gateway_id.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns `true` if the query lists every device in one response.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gateway_id.is_none() && self.limit.is_none() && self.offset.is_none()
    }

    /// Builds the request path including the query string.
    #[must_use]
    pub fn to_path(&self) -> String {
        let mut params = Vec::new();
        if let Some(gateway_id) = &self.gateway_id {
            params.push(format!("gatewayId={}", urlencoding::encode(gateway_id)));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if let Some(offset) = self.offset {
            params.push(format!("offset={offset}"));
        }

        if params.is_empty() {
            DEVICE_ENDPOINT.to_string()
        } else {
            format!("{DEVICE_ENDPOINT}?{}", params.join("&"))
        }
    }
}

/// Result of decoding a device list response.
#[derive(Debug, Default)]
pub(crate) struct DecodedDevices {
    pub(crate) devices: HashMap<String, DeviceInfo>,
    pub(crate) skipped: usize,
}

/// Decodes the `results` array of a device list response.
///
/// Returns `None` if the response has no `results` array. Entries that are
/// malformed or of an unsupported kind are logged and counted, never fatal.
/// Duplicate ids keep the last entry.
pub(crate) fn decode_device_list(response: &Value) -> Option<DecodedDevices> {
    let Some(results) = response.get("results").and_then(Value::as_array) else {
        tracing::error!(response = %response, "Device list response has no results");
        return None;
    };

    let mut decoded = DecodedDevices::default();
    for entry in results {
        match DeviceInfo::from_entry(entry) {
            Ok(info) => {
                tracing::debug!(device_id = %info.uid(), kind = %info.kind(), "Parsed device");
                decoded.devices.insert(info.uid().to_string(), info);
            }
            Err(e) => {
                let uid = entry.get("uid").map_or_else(|| "unknown".to_string(), Value::to_string);
                tracing::warn!(device_id = %uid, error = %e, "Skipping device");
                decoded.skipped += 1;
            }
        }
    }
    Some(decoded)
}

/// Discovers devices and tracks the gateways they belong to.
///
/// The gateway set is derived data and only answers "which gateways have I
/// seen". An unfiltered [`discover`](Self::discover) rebuilds it from
/// scratch; a filtered or paged query adds to it. A discovery without a
/// usable response leaves it untouched.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    client: DweloClient,
    gateways: Arc<RwLock<BTreeSet<String>>>,
}

impl DeviceRegistry {
    /// Creates a registry that discovers through the given client.
    #[must_use]
    pub fn new(client: DweloClient) -> Self {
        Self {
            client,
            gateways: Arc::new(RwLock::new(BTreeSet::new())),
        }
    }

    /// Returns the client used for discovery.
    #[must_use]
    pub fn client(&self) -> &DweloClient {
        &self.client
    }

    /// Discovers every device on the account.
    ///
    /// An empty map is a valid outcome: it is returned when the account has
    /// no supported devices and when the API gave no usable response.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingCredential`](crate::error::ProtocolError::MissingCredential)
    /// if the client has not logged in.
    pub async fn discover(&self) -> Result<HashMap<String, DeviceInfo>, Error> {
        self.discover_with(&DiscoveryQuery::new()).await
    }

    /// Discovers devices matching a query.
    ///
    /// Gateways of a filtered or paged query are merged into the known set,
    /// so paging through the account accumulates every gateway.
    ///
    /// # Errors
    ///
    /// See [`discover`](Self::discover).
    pub async fn discover_with(
        &self,
        query: &DiscoveryQuery,
    ) -> Result<HashMap<String, DeviceInfo>, Error> {
        let Some(response) = self.client.get(&query.to_path()).await? else {
            tracing::error!("Failed to fetch device list");
            return Ok(HashMap::new());
        };

        let Some(DecodedDevices { devices, skipped }) = decode_device_list(&response) else {
            return Ok(HashMap::new());
        };

        let seen = devices.values().map(|info| info.gateway_id().to_string());
        if query.is_complete() {
            *self.gateways.write() = seen.collect();
        } else {
            self.gateways.write().extend(seen);
        }

        if devices.is_empty() {
            tracing::warn!(skipped, "No devices retrieved from Dwelo");
        } else {
            tracing::debug!(count = devices.len(), skipped, "Retrieved devices");
        }

        Ok(devices)
    }

    /// Returns the gateways seen by the last discovery.
    #[must_use]
    pub fn gateways(&self) -> BTreeSet<String> {
        self.gateways.read().clone()
    }

    /// Returns a gateway to use when a device's own gateway is unknown.
    #[must_use]
    pub fn default_gateway(&self) -> Option<String> {
        self.gateways.read().first().cloned()
    }
}
