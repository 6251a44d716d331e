// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway sensor reports and per-device snapshots.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::types::wire;

/// One `(device, sensor type, value)` entry of a gateway sensor report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(deserialize_with = "wire::id")]
    device_id: String,
    sensor_type: String,
    #[serde(default)]
    value: Value,
}

impl SensorReading {
    /// Creates a reading.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        sensor_type: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            sensor_type: sensor_type.into(),
            value: value.into(),
        }
    }

    /// Returns the id of the device this reading belongs to.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the sensor type, e.g. `"temperature"` or `"lock"`.
    #[must_use]
    pub fn sensor_type(&self) -> &str {
        &self.sensor_type
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Every sensor reading reported by one gateway.
///
/// # Examples
///
/// ```
/// use dwelo_lib::sensor::SensorReport;
///
/// let response = serde_json::json!({
///     "results": [
///         {"deviceId": "d1", "sensorType": "lock", "value": "locked"},
///         {"deviceId": "d1", "sensorType": "battery", "value": "83"},
///         {"deviceId": "d2", "sensorType": "temperature", "value": "70"}
///     ]
/// });
///
/// let report = SensorReport::from_response(&response).unwrap();
/// let snapshot = report.extract_device("d1");
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.text("lock").unwrap(), "locked");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReport {
    readings: Vec<SensorReading>,
}

impl SensorReport {
    /// Creates a report from readings.
    #[must_use]
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self { readings }
    }

    /// Decodes a `sensor/gateway/{id}` response.
    ///
    /// Entries that are not readings are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if the response has no `results`
    /// array.
    pub fn from_response(response: &Value) -> Result<Self, ParseError> {
        let results = response
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| ParseError::MissingField("results".to_string()))?;

        let readings = results
            .iter()
            .filter_map(|entry| match SensorReading::deserialize(entry) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    tracing::debug!(entry = %entry, error = %e, "Skipping sensor entry");
                    None
                }
            })
            .collect();

        Ok(Self { readings })
    }

    /// Returns all readings.
    #[must_use]
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    /// Returns the readings of one device, keyed by sensor type.
    ///
    /// If a sensor type appears more than once for the device, the last
    /// entry wins.
    #[must_use]
    pub fn extract_device(&self, device_id: &str) -> SensorSnapshot {
        let sensors = self
            .readings
            .iter()
            .filter(|reading| reading.device_id == device_id)
            .map(|reading| (reading.sensor_type.clone(), reading.clone()))
            .collect();

        SensorSnapshot {
            device_id: device_id.to_string(),
            sensors,
        }
    }
}

/// Sensor readings of a single device, keyed by sensor type.
///
/// Rebuilt from the gateway report on every poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSnapshot {
    device_id: String,
    sensors: HashMap<String, SensorReading>,
}

impl SensorSnapshot {
    /// Returns the device this snapshot describes.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the reading for a sensor type.
    #[must_use]
    pub fn get(&self, sensor_type: &str) -> Option<&SensorReading> {
        self.sensors.get(sensor_type)
    }

    /// Returns the number of sensor types present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns `true` if the device had no readings in the report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Returns the value of a sensor as text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if the sensor is absent and
    /// [`ParseError::InvalidValue`] if its value is not a scalar.
    pub fn text(&self, sensor_type: &str) -> Result<String, ParseError> {
        let reading = self
            .get(sensor_type)
            .ok_or_else(|| ParseError::MissingField(sensor_type.to_string()))?;

        wire::scalar_text(&reading.value).ok_or_else(|| ParseError::InvalidValue {
            field: sensor_type.to_string(),
            message: format!("expected a scalar, got {}", reading.value),
        })
    }

    /// Returns the value of a sensor as a finite float.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the sensor is absent or not numeric.
    pub fn number(&self, sensor_type: &str) -> Result<f64, ParseError> {
        let text = self.text(sensor_type)?;
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidValue {
                field: sensor_type.to_string(),
                message: format!("not a number: {text}"),
            }),
        }
    }

    /// Returns the value of a sensor as a percentage (0-100).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the sensor is absent, not an integer, or
    /// out of range.
    pub fn percentage(&self, sensor_type: &str) -> Result<u8, ParseError> {
        let text = self.text(sensor_type)?;
        match text.trim().parse::<u8>() {
            Ok(value) if value <= 100 => Ok(value),
            _ => Err(ParseError::InvalidValue {
                field: sensor_type.to_string(),
                message: format!("not a percentage: {text}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SensorReport {
        SensorReport::from_response(&serde_json::json!({
            "results": [
                {"deviceId": "d1", "sensorType": "temperature", "value": "71.5"},
                {"deviceId": 7, "sensorType": "temperature", "value": 65},
                {"deviceId": "d1", "sensorType": "mode", "value": "heat"},
                {"sensorType": "orphan", "value": "x"},
                {"deviceId": "d1", "sensorType": "blob", "value": {"nested": true}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn skips_malformed_entries() {
        assert_eq!(report().readings().len(), 4);
    }

    #[test]
    fn missing_results_is_error() {
        let result = SensorReport::from_response(&serde_json::json!({"detail": "x"}));
        assert!(matches!(result, Err(ParseError::MissingField(ref f)) if f == "results"));
    }

    #[test]
    fn extract_filters_by_device() {
        let report = report();
        let d1 = report.extract_device("d1");
        assert_eq!(d1.device_id(), "d1");
        assert_eq!(d1.len(), 3);

        let d7 = report.extract_device("7");
        assert_eq!(d7.number("temperature").unwrap(), 65.0);

        assert!(report.extract_device("nobody").is_empty());
    }

    #[test]
    fn extract_last_entry_wins() {
        let report = SensorReport::new(vec![
            SensorReading::new("d1", "battery", "10"),
            SensorReading::new("d1", "battery", "90"),
        ]);
        assert_eq!(report.extract_device("d1").percentage("battery").unwrap(), 90);
    }

    #[test]
    fn typed_accessors() {
        let snapshot = report().extract_device("d1");
        assert_eq!(snapshot.number("temperature").unwrap(), 71.5);
        assert_eq!(snapshot.text("mode").unwrap(), "heat");
        assert!(matches!(
            snapshot.number("mode"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            snapshot.text("setToHeat"),
            Err(ParseError::MissingField(_))
        ));
        assert!(matches!(
            snapshot.text("blob"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn percentage_bounds() {
        let snapshot = SensorReport::new(vec![
            SensorReading::new("d", "ok", "100"),
            SensorReading::new("d", "high", "101"),
            SensorReading::new("d", "frac", "50.5"),
            SensorReading::new("d", "neg", "-1"),
        ])
        .extract_device("d");

        assert_eq!(snapshot.percentage("ok").unwrap(), 100);
        assert!(snapshot.percentage("high").is_err());
        assert!(snapshot.percentage("frac").is_err());
        assert!(snapshot.percentage("neg").is_err());
    }

    #[test]
    fn number_rejects_non_finite() {
        let snapshot =
            SensorReport::new(vec![SensorReading::new("d", "temperature", "NaN")]).extract_device("d");
        assert!(snapshot.number("temperature").is_err());
    }
}
