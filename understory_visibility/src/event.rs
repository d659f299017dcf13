// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Direction;

/// A threshold crossing reported for a tracked element.
///
/// `direction` is always [`Direction::MovingIn`] or [`Direction::MovingOut`].
/// `percentage` is the observed visibility that triggered the crossing, not
/// the threshold value itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct VisibilityEvent<K> {
    /// Identifier of the tracked element.
    pub id: K,
    /// Direction visibility was moving when the threshold was crossed.
    pub direction: Direction,
    /// Visibility percentage in `[0, 100]` at the time of the crossing.
    pub percentage: f64,
}
