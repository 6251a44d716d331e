// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kind classification.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The kind of a Dwelo device.
///
/// Only thermostats and locks are modeled. Any other `deviceType` reported by
/// the API fails to parse with [`ValueError::UnsupportedDeviceKind`].
///
/// # Examples
///
/// ```
/// use dwelo_lib::types::DeviceKind;
///
/// assert_eq!("thermostat".parse::<DeviceKind>().unwrap(), DeviceKind::Thermostat);
/// assert_eq!("lock".parse::<DeviceKind>().unwrap(), DeviceKind::Lock);
/// assert!("switch".parse::<DeviceKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A climate control device.
    Thermostat,
    /// A door lock.
    Lock,
}

impl DeviceKind {
    /// Returns the `deviceType` string used by the Dwelo API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thermostat => "thermostat",
            Self::Lock => "lock",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thermostat" => Ok(Self::Thermostat),
            "lock" => Ok(Self::Lock),
            _ => Err(ValueError::UnsupportedDeviceKind(s.to_string())),
        }
    }
}
