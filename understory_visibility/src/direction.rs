// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// Net change in visibility between two consecutive observations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Direction {
    /// Visibility increased: the element is scrolling into view.
    MovingIn,
    /// Visibility decreased: the element is scrolling out of view.
    MovingOut,
    /// No net change since the previous observation.
    #[default]
    None,
}

impl Direction {
    /// Classifies the change from `previous` to `current`.
    ///
    /// A `NaN` delta is treated as no change.
    #[must_use]
    pub fn between(previous: f64, current: f64) -> Self {
        let delta = current - previous;
        if delta > 0.0 {
            Self::MovingIn
        } else if delta < 0.0 {
            Self::MovingOut
        } else {
            Self::None
        }
    }

    /// Returns the wire name: `"movingIn"`, `"movingOut"` or `"none"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MovingIn => "movingIn",
            Self::MovingOut => "movingOut",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Direction`] name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseDirectionError;

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of \"movingIn\", \"movingOut\" or \"none\"")
    }
}

impl core::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses a wire name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::MovingIn, Self::MovingOut, Self::None]
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or(ParseDirectionError)
    }
}
