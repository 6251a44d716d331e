// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device state decoded from sensor snapshots.

use std::str::FromStr;

use crate::error::{ParseError, ValueError};
use crate::registry::DeviceInfo;
use crate::types::{LockState, ThermostatActivity, ThermostatMode};

use super::SensorSnapshot;

/// Sensor types read for a thermostat.
pub mod thermostat_sensors {
    /// Current temperature.
    pub const TEMPERATURE: &str = "temperature";
    /// Configured mode.
    pub const MODE: &str = "mode";
    /// Target temperature in cool mode.
    pub const SET_TO_COOL: &str = "setToCool";
    /// Target temperature in heat mode.
    pub const SET_TO_HEAT: &str = "setToHeat";
    /// Current activity.
    pub const STATE: &str = "state";
}

/// Sensor types read for a lock.
pub mod lock_sensors {
    /// Lock position.
    pub const LOCK: &str = "lock";
    /// Battery percentage.
    pub const BATTERY: &str = "battery";
}

/// State of a thermostat at one poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermostatData {
    /// Measured temperature.
    pub current_temperature: f64,
    /// Configured mode.
    pub mode: ThermostatMode,
    /// Target temperature used in cool mode.
    pub target_temperature_cool: f64,
    /// Target temperature used in heat mode.
    pub target_temperature_heat: f64,
    /// What the thermostat is doing right now.
    pub activity: ThermostatActivity,
}

impl ThermostatData {
    /// Returns the target temperature of the active mode, or `None` when off.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        match self.mode {
            ThermostatMode::Heat => Some(self.target_temperature_heat),
            ThermostatMode::Cool => Some(self.target_temperature_cool),
            ThermostatMode::Off => None,
        }
    }
}

/// State of a lock at one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockData {
    /// Lock position.
    pub state: LockState,
    /// Battery level in percent.
    pub battery_level: u8,
    /// Online flag of the device at discovery time.
    pub is_online: bool,
}

fn parse_enum<T>(snapshot: &SensorSnapshot, sensor_type: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ValueError>,
{
    let text = snapshot.text(sensor_type)?;
    text.parse::<T>().map_err(|e| ParseError::InvalidValue {
        field: sensor_type.to_string(),
        message: e.to_string(),
    })
}

/// Decodes thermostat state from a device snapshot.
///
/// Requires the `temperature`, `mode`, `setToCool`, `setToHeat` and `state`
/// sensors.
///
/// # Errors
///
/// Returns [`ParseError`] if a sensor is missing, a temperature is not
/// numeric, or the mode or activity is outside its vocabulary.
///
/// # Examples
///
/// ```
/// use dwelo_lib::sensor::{SensorReading, SensorReport, decode_thermostat};
/// use dwelo_lib::types::{ThermostatActivity, ThermostatMode};
///
/// let report = SensorReport::new(vec![
///     SensorReading::new("t1", "temperature", "70"),
///     SensorReading::new("t1", "mode", "heat"),
///     SensorReading::new("t1", "setToCool", "76"),
///     SensorReading::new("t1", "setToHeat", "72.5"),
///     SensorReading::new("t1", "state", "idle"),
/// ]);
///
/// let data = decode_thermostat(&report.extract_device("t1")).unwrap();
/// assert_eq!(data.mode, ThermostatMode::Heat);
/// assert_eq!(data.target_temperature_heat, 72.5);
/// assert_eq!(data.activity, ThermostatActivity::Idle);
/// ```
pub fn decode_thermostat(snapshot: &SensorSnapshot) -> Result<ThermostatData, ParseError> {
    use thermostat_sensors::{MODE, SET_TO_COOL, SET_TO_HEAT, STATE, TEMPERATURE};

    Ok(ThermostatData {
        current_temperature: snapshot.number(TEMPERATURE)?,
        mode: parse_enum(snapshot, MODE)?,
        target_temperature_cool: snapshot.number(SET_TO_COOL)?,
        target_temperature_heat: snapshot.number(SET_TO_HEAT)?,
        activity: parse_enum(snapshot, STATE)?,
    })
}

/// Decodes lock state from a device snapshot.
///
/// Requires the `lock` and `battery` sensors. The online flag comes from
/// `info`, not from the sensor feed.
///
/// # Errors
///
/// Returns [`ParseError`] if a sensor is missing, the lock position is
/// neither `locked` nor `unlocked`, or the battery is not a percentage.
pub fn decode_lock(snapshot: &SensorSnapshot, info: &DeviceInfo) -> Result<LockData, ParseError> {
    use lock_sensors::{BATTERY, LOCK};

    Ok(LockData {
        state: parse_enum(snapshot, LOCK)?,
        battery_level: snapshot.percentage(BATTERY)?,
        is_online: info.is_online(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{SensorReading, SensorReport};
    use crate::types::DeviceKind;

    fn thermostat_report(mode: &str, state: &str) -> SensorReport {
        SensorReport::new(vec![
            SensorReading::new("t1", "temperature", "68.5"),
            SensorReading::new("t1", "mode", mode),
            SensorReading::new("t1", "setToCool", "75"),
            SensorReading::new("t1", "setToHeat", 66),
            SensorReading::new("t1", "state", state),
            SensorReading::new("other", "mode", "cool"),
        ])
    }

    #[test]
    fn decodes_thermostat() {
        let data = decode_thermostat(&thermostat_report("cool", "cool").extract_device("t1")).unwrap();
        assert_eq!(
            data,
            ThermostatData {
                current_temperature: 68.5,
                mode: ThermostatMode::Cool,
                target_temperature_cool: 75.0,
                target_temperature_heat: 66.0,
                activity: ThermostatActivity::Cooling,
            }
        );
        assert_eq!(data.target_temperature(), Some(75.0));
    }

    #[test]
    fn thermostat_off_has_no_target() {
        let data = decode_thermostat(&thermostat_report("off", "idle").extract_device("t1")).unwrap();
        assert_eq!(data.mode, ThermostatMode::Off);
        assert_eq!(data.target_temperature(), None);
    }

    #[test]
    fn thermostat_missing_sensor() {
        let report = SensorReport::new(vec![
            SensorReading::new("t1", "temperature", "68.5"),
            SensorReading::new("t1", "mode", "heat"),
        ]);
        let result = decode_thermostat(&report.extract_device("t1"));
        assert!(matches!(result, Err(ParseError::MissingField(_))));
    }

    #[test]
    fn thermostat_unknown_mode() {
        let result = decode_thermostat(&thermostat_report("auto", "idle").extract_device("t1"));
        assert!(matches!(
            result,
            Err(ParseError::InvalidValue { ref field, .. }) if field == "mode"
        ));
    }

    #[test]
    fn decodes_lock_with_online_from_info() {
        let report = SensorReport::new(vec![
            SensorReading::new("d1", "lock", "locked"),
            SensorReading::new("d1", "battery", "83"),
        ]);
        let info = DeviceInfo::new("d1", DeviceKind::Lock, "Door", "gw").with_online(true);

        let data = decode_lock(&report.extract_device("d1"), &info).unwrap();
        assert_eq!(
            data,
            LockData {
                state: LockState::Locked,
                battery_level: 83,
                is_online: true,
            }
        );

        let offline = info.with_online(false);
        assert!(!decode_lock(&report.extract_device("d1"), &offline).unwrap().is_online);
    }

    #[test]
    fn lock_decode_is_repeatable() {
        let report = SensorReport::new(vec![
            SensorReading::new("d1", "lock", "unlocked"),
            SensorReading::new("d1", "battery", 40),
        ]);
        let info = DeviceInfo::new("d1", DeviceKind::Lock, "Door", "gw");
        let snapshot = report.extract_device("d1");

        assert_eq!(
            decode_lock(&snapshot, &info).unwrap(),
            decode_lock(&snapshot, &info).unwrap()
        );
    }

    #[test]
    fn lock_rejects_unknown_position() {
        let report = SensorReport::new(vec![
            SensorReading::new("d1", "lock", "ajar"),
            SensorReading::new("d1", "battery", "83"),
        ]);
        let info = DeviceInfo::new("d1", DeviceKind::Lock, "Door", "gw");

        let result = decode_lock(&report.extract_device("d1"), &info);
        assert!(matches!(
            result,
            Err(ParseError::InvalidValue { ref field, .. }) if field == "lock"
        ));
    }
}
