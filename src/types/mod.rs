// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Dwelo device control.
//!
//! Every vocabulary the Dwelo API speaks in is modeled as a closed enum.
//! Strings outside the vocabulary are rejected with a [`ValueError`]
//! instead of being mapped to a default.
//!
//! # Types
//!
//! - [`DeviceKind`] - Device types this library models (thermostat, lock)
//! - [`ThermostatMode`] - What a thermostat is configured to do (heat/cool/off)
//! - [`ThermostatActivity`] - What a thermostat is currently doing
//! - [`LockState`] - Lock position (locked/unlocked)
//!
//! [`ValueError`]: crate::error::ValueError

mod device_kind;
mod lock;
mod thermostat;
pub(crate) mod wire;

pub use device_kind::DeviceKind;
pub use lock::LockState;
pub use thermostat::{ThermostatActivity, ThermostatMode};
