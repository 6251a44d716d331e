// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat mode and activity types.
//!
//! The mode says what a thermostat is configured to do. The activity says
//! what it is doing right now: a thermostat in heat mode is idle once the
//! room has reached its heat target.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Configured operating mode of a thermostat.
///
/// The string form doubles as the Dwelo command name, so `Heat` is both the
/// value reported by the `mode` sensor and the command used to set the heat
/// target temperature.
///
/// # Examples
///
/// ```
/// use dwelo_lib::types::ThermostatMode;
///
/// assert_eq!(ThermostatMode::Heat.as_str(), "heat");
/// assert_eq!("cool".parse::<ThermostatMode>().unwrap(), ThermostatMode::Cool);
/// assert!("auto".parse::<ThermostatMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThermostatMode {
    /// Heating to the heat target.
    Heat,
    /// Cooling to the cool target.
    Cool,
    /// Turned off.
    Off,
}

impl ThermostatMode {
    /// Returns the Dwelo string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "off" => Ok(Self::Off),
            _ => Err(ValueError::InvalidThermostatMode(s.to_string())),
        }
    }
}

/// What a thermostat is currently doing, as reported by its `state` sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThermostatActivity {
    /// Actively heating.
    Heating,
    /// Actively cooling.
    Cooling,
    /// Not running.
    Idle,
}

impl ThermostatActivity {
    /// Returns the Dwelo string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heating => "heat",
            Self::Cooling => "cool",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for ThermostatActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatActivity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heat" | "heating" => Ok(Self::Heating),
            "cool" | "cooling" => Ok(Self::Cooling),
            "idle" => Ok(Self::Idle),
            _ => Err(ValueError::InvalidThermostatActivity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [ThermostatMode::Heat, ThermostatMode::Cool, ThermostatMode::Off] {
            assert_eq!(mode.as_str().parse::<ThermostatMode>().unwrap(), mode);
        }
    }

    #[test]
    fn mode_from_str_invalid() {
        assert!(matches!(
            "auto".parse::<ThermostatMode>(),
            Err(ValueError::InvalidThermostatMode(_))
        ));
    }

    #[test]
    fn activity_from_str() {
        assert_eq!(
            "heat".parse::<ThermostatActivity>().unwrap(),
            ThermostatActivity::Heating
        );
        assert_eq!(
            "cool".parse::<ThermostatActivity>().unwrap(),
            ThermostatActivity::Cooling
        );
        assert_eq!(
            "Idle".parse::<ThermostatActivity>().unwrap(),
            ThermostatActivity::Idle
        );
    }

    #[test]
    fn activity_from_str_invalid() {
        assert!("fan".parse::<ThermostatActivity>().is_err());
    }
}
