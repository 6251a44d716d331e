// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock commands.

use std::str::FromStr;

use crate::command::{Command, CommandValue};
use crate::error::ValueError;
use crate::types::{DeviceKind, LockState};

/// Command to move a lock into a state.
///
/// # Examples
///
/// ```
/// use dwelo_lib::command::{Command, LockCommand};
/// use dwelo_lib::types::LockState;
///
/// assert_eq!(LockCommand::lock().command(), "lock");
/// assert_eq!(LockCommand::unlock().command(), "unlock");
///
/// let target: LockCommand = "locked".parse().unwrap();
/// assert_eq!(target.target(), LockState::Locked);
/// assert!("open".parse::<LockCommand>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockCommand(LockState);

impl LockCommand {
    /// Creates a command for the given target state.
    #[must_use]
    pub const fn new(target: LockState) -> Self {
        Self(target)
    }

    /// Creates a command that locks.
    #[must_use]
    pub const fn lock() -> Self {
        Self(LockState::Locked)
    }

    /// Creates a command that unlocks.
    #[must_use]
    pub const fn unlock() -> Self {
        Self(LockState::Unlocked)
    }

    /// Returns the target state.
    #[must_use]
    pub const fn target(&self) -> LockState {
        self.0
    }
}

impl From<LockState> for LockCommand {
    fn from(target: LockState) -> Self {
        Self(target)
    }
}

impl FromStr for LockCommand {
    type Err = ValueError;

    /// Parses a requested target state. Only `locked` and `unlocked` are
    /// accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<LockState>().map(Self)
    }
}

impl Command for LockCommand {
    fn target_kind(&self) -> DeviceKind {
        DeviceKind::Lock
    }

    fn command(&self) -> &'static str {
        self.0.command()
    }

    fn command_value(&self) -> Option<CommandValue> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_payload() {
        assert_eq!(
            serde_json::to_value(LockCommand::lock().to_payload()).unwrap(),
            serde_json::json!({"command": "lock"})
        );
        assert_eq!(
            serde_json::to_value(LockCommand::unlock().to_payload()).unwrap(),
            serde_json::json!({"command": "unlock"})
        );
    }

    #[test]
    fn parse_rejects_out_of_vocabulary() {
        for value in ["ajar", "jammed", "toggle"] {
            assert_eq!(
                value.parse::<LockCommand>().unwrap_err(),
                ValueError::InvalidLockState(value.to_string())
            );
        }
    }

    #[test]
    fn from_lock_state() {
        assert_eq!(LockCommand::from(LockState::Unlocked), LockCommand::unlock());
    }
}
