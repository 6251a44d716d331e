// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity as reported by the device list endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::types::{DeviceKind, wire};

/// Identity and metadata of a discovered Dwelo device.
///
/// Built from one entry of the `device/` response and never modified
/// afterwards. The next discovery builds a fresh value for the same id.
///
/// # Examples
///
/// ```
/// use dwelo_lib::registry::DeviceInfo;
/// use dwelo_lib::types::DeviceKind;
///
/// let entry = serde_json::json!({
///     "uid": 1234,
///     "deviceType": "lock",
///     "givenName": "Front Door",
///     "gatewayId": 99,
///     "isActive": true,
///     "isOnline": true,
///     "dateRegistered": "2023-04-01T10:00:00Z"
/// });
///
/// let info = DeviceInfo::from_entry(&entry).unwrap();
/// assert_eq!(info.uid(), "1234");
/// assert_eq!(info.kind(), DeviceKind::Lock);
/// assert_eq!(info.gateway_id(), "99");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    uid: String,
    kind: DeviceKind,
    name: String,
    gateway_id: String,
    is_active: bool,
    is_online: bool,
    date_registered: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDevice {
    #[serde(deserialize_with = "wire::id")]
    uid: String,
    device_type: String,
    given_name: String,
    #[serde(deserialize_with = "wire::id")]
    gateway_id: String,
    is_active: bool,
    is_online: bool,
    date_registered: String,
}

impl DeviceInfo {
    /// Creates a device identity directly.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        kind: DeviceKind,
        name: impl Into<String>,
        gateway_id: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            kind,
            name: name.into(),
            gateway_id: gateway_id.into(),
            is_active: true,
            is_online: true,
            date_registered: String::new(),
        }
    }

    /// Sets the online flag.
    #[must_use]
    pub fn with_online(mut self, is_online: bool) -> Self {
        self.is_online = is_online;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Parses one entry of the device list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a required field is missing or has the wrong
    /// type, and [`ValueError::UnsupportedDeviceKind`] if the `deviceType`
    /// is neither a thermostat nor a lock.
    ///
    /// [`ValueError::UnsupportedDeviceKind`]: crate::error::ValueError::UnsupportedDeviceKind
    pub fn from_entry(entry: &Value) -> Result<Self, Error> {
        let raw = RawDevice::deserialize(entry).map_err(ParseError::Json)?;
        let kind = raw.device_type.parse::<DeviceKind>()?;

        Ok(Self {
            uid: raw.uid,
            kind,
            name: raw.given_name,
            gateway_id: raw.gateway_id,
            is_active: raw.is_active,
            is_online: raw.is_online,
            date_registered: raw.date_registered,
        })
    }

    /// Returns the device id.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the user-given display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the gateway the device belongs to.
    #[must_use]
    pub fn gateway_id(&self) -> &str {
        &self.gateway_id
    }

    /// Returns whether the device is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether the device was online at discovery time.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.is_online
    }

    /// Returns the registration timestamp, unparsed.
    #[must_use]
    pub fn date_registered(&self) -> &str {
        &self.date_registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    fn entry() -> Value {
        serde_json::json!({
            "uid": "t-1",
            "deviceType": "thermostat",
            "givenName": "Hallway",
            "gatewayId": "gw-1",
            "isActive": true,
            "isOnline": false,
            "dateRegistered": "2022-01-01"
        })
    }

    #[test]
    fn parses_complete_entry() {
        let info = DeviceInfo::from_entry(&entry()).unwrap();
        assert_eq!(info.uid(), "t-1");
        assert_eq!(info.kind(), DeviceKind::Thermostat);
        assert_eq!(info.name(), "Hallway");
        assert_eq!(info.gateway_id(), "gw-1");
        assert!(info.is_active());
        assert!(!info.is_online());
        assert_eq!(info.date_registered(), "2022-01-01");
    }

    #[test]
    fn missing_field_is_parse_error() {
        let mut entry = entry();
        entry.as_object_mut().unwrap().remove("givenName");
        let result = DeviceInfo::from_entry(&entry);
        assert!(matches!(result, Err(Error::Parse(ParseError::Json(_)))));
    }

    #[test]
    fn unknown_kind_is_value_error() {
        let mut entry = entry();
        entry["deviceType"] = Value::from("switch");
        let result = DeviceInfo::from_entry(&entry);
        assert!(matches!(
            result,
            Err(Error::Value(ValueError::UnsupportedDeviceKind(ref kind))) if kind == "switch"
        ));
    }

    #[test]
    fn builder_flags() {
        let info = DeviceInfo::new("1", DeviceKind::Lock, "Door", "gw")
            .with_online(false)
            .with_active(false);
        assert!(!info.is_online());
        assert!(!info.is_active());
    }
}
