// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock position type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Position of a lock.
///
/// The `lock` sensor reports `"locked"` or `"unlocked"`. Anything else,
/// such as `"ajar"` or `"jammed"`, fails to parse.
///
/// # Examples
///
/// ```
/// use dwelo_lib::types::LockState;
///
/// assert_eq!("locked".parse::<LockState>().unwrap(), LockState::Locked);
/// assert_eq!(LockState::Unlocked.command(), "unlock");
/// assert!("ajar".parse::<LockState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockState {
    /// The bolt is thrown.
    Locked,
    /// The bolt is retracted.
    Unlocked,
}

impl LockState {
    /// Returns the value reported by the `lock` sensor.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }

    /// Returns the command that moves a lock into this state.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Locked => "lock",
            Self::Unlocked => "unlock",
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "locked" => Ok(Self::Locked),
            "unlocked" => Ok(Self::Unlocked),
            _ => Err(ValueError::InvalidLockState(s.to_string())),
        }
    }
}

impl From<bool> for LockState {
    fn from(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_state_strings() {
        assert_eq!(LockState::Locked.as_str(), "locked");
        assert_eq!(LockState::Unlocked.as_str(), "unlocked");
        assert_eq!(LockState::Locked.command(), "lock");
        assert_eq!(LockState::Unlocked.command(), "unlock");
    }

    #[test]
    fn lock_state_from_str_invalid() {
        for value in ["ajar", "jammed", "", "lock"] {
            assert_eq!(
                value.parse::<LockState>().unwrap_err(),
                ValueError::InvalidLockState(value.to_string())
            );
        }
    }

    #[test]
    fn lock_state_from_bool() {
        assert_eq!(LockState::from(true), LockState::Locked);
        assert_eq!(LockState::from(false), LockState::Unlocked);
    }
}
