// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold sets and the crossing scan shared by detection and de-duplication.

use alloc::vec::Vec;
use core::fmt;

use crate::Direction;

/// Visibility percentages that produce events when crossed.
///
/// `moving_in` is sorted ascending and `moving_out` descending. Duplicates are
/// allowed; the scan simply reports the same value twice.
///
/// The decision engine relies on this ordering and never re-sorts; use
/// [`ThresholdSet::from_unsorted`] when the input comes straight from a host.
/// With the `serde` feature, deserialization goes through
/// [`ThresholdSet::from_unsorted`] as well.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", try_from = "RawThresholdSet")
)]
pub struct ThresholdSet {
    moving_in: Vec<f64>,
    moving_out: Vec<f64>,
}

impl ThresholdSet {
    /// Creates a set from pre-sorted sequences.
    ///
    /// `moving_in` must be ascending and `moving_out` descending. This is
    /// checked in debug builds only.
    #[must_use]
    pub fn new(moving_in: impl Into<Vec<f64>>, moving_out: impl Into<Vec<f64>>) -> Self {
        let moving_in = moving_in.into();
        let moving_out = moving_out.into();
        debug_assert!(
            moving_in.windows(2).all(|w| w[0] <= w[1]),
            "moving-in thresholds must be sorted ascending"
        );
        debug_assert!(
            moving_out.windows(2).all(|w| w[0] >= w[1]),
            "moving-out thresholds must be sorted descending"
        );
        Self {
            moving_in,
            moving_out,
        }
    }

    /// Validates and sorts raw threshold lists.
    ///
    /// Every value must be finite and within `[0, 100]`. `moving_in` is then
    /// sorted ascending and `moving_out` descending.
    pub fn from_unsorted(
        moving_in: impl IntoIterator<Item = f64>,
        moving_out: impl IntoIterator<Item = f64>,
    ) -> Result<Self, ThresholdError> {
        let mut moving_in = validated(moving_in)?;
        let mut moving_out = validated(moving_out)?;
        moving_in.sort_by(f64::total_cmp);
        moving_out.sort_by(|a, b| b.total_cmp(a));
        Ok(Self {
            moving_in,
            moving_out,
        })
    }

    /// Ascending thresholds checked while visibility increases.
    #[must_use]
    pub fn moving_in(&self) -> &[f64] {
        &self.moving_in
    }

    /// Descending thresholds checked while visibility decreases.
    #[must_use]
    pub fn moving_out(&self) -> &[f64] {
        &self.moving_out
    }

    /// Returns the threshold `percentage` lies beyond in `direction`, if any.
    ///
    /// See [`crossed_moving_in`] and [`crossed_moving_out`]. Always `None` for
    /// [`Direction::None`].
    #[must_use]
    pub fn crossed(&self, direction: Direction, percentage: f64) -> Option<f64> {
        match direction {
            Direction::MovingIn => crossed_moving_in(&self.moving_in, percentage),
            Direction::MovingOut => crossed_moving_out(&self.moving_out, percentage),
            Direction::None => None,
        }
    }
}

/// Scans ascending `thresholds` and returns the last one strictly below
/// `percentage`.
///
/// The scan stops at the first threshold that is not exceeded, so equality
/// never counts as a crossing.
///
/// ```
/// use understory_visibility::thresholds::crossed_moving_in;
///
/// assert_eq!(crossed_moving_in(&[25.0, 50.0, 75.0], 60.0), Some(50.0));
/// assert_eq!(crossed_moving_in(&[25.0, 50.0, 75.0], 25.0), None);
/// ```
#[must_use]
pub fn crossed_moving_in(thresholds: &[f64], percentage: f64) -> Option<f64> {
    thresholds
        .iter()
        .take_while(|&&t| percentage > t)
        .last()
        .copied()
}

/// Scans descending `thresholds` and returns the last one strictly above
/// `percentage`.
///
/// ```
/// use understory_visibility::thresholds::crossed_moving_out;
///
/// assert_eq!(crossed_moving_out(&[90.0, 20.0, 5.0], 10.0), Some(20.0));
/// assert_eq!(crossed_moving_out(&[90.0, 20.0, 5.0], 90.0), None);
/// ```
#[must_use]
pub fn crossed_moving_out(thresholds: &[f64], percentage: f64) -> Option<f64> {
    thresholds
        .iter()
        .take_while(|&&t| percentage < t)
        .last()
        .copied()
}

/// Host-supplied thresholds, in any order. Missing lists are empty.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawThresholdSet {
    #[serde(default)]
    moving_in: Vec<f64>,
    #[serde(default)]
    moving_out: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawThresholdSet> for ThresholdSet {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholdSet) -> Result<Self, Self::Error> {
        Self::from_unsorted(raw.moving_in, raw.moving_out)
    }
}

fn validated(values: impl IntoIterator<Item = f64>) -> Result<Vec<f64>, ThresholdError> {
    values
        .into_iter()
        .map(|value| {
            if !value.is_finite() {
                Err(ThresholdError::NotFinite { value })
            } else if !(0.0..=100.0).contains(&value) {
                Err(ThresholdError::OutOfRange { value })
            } else {
                Ok(value)
            }
        })
        .collect()
}

/// Errors produced when building a [`ThresholdSet`] from raw input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdError {
    /// A threshold was `NaN` or infinite.
    NotFinite {
        /// The rejected value.
        value: f64,
    },
    /// A threshold was outside `[0, 100]`.
    OutOfRange {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { value } => write!(f, "threshold {value} is not finite"),
            Self::OutOfRange { value } => {
                write!(f, "threshold {value} is outside the range 0..=100")
            }
        }
    }
}

impl core::error::Error for ThresholdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_in_picks_highest_exceeded_threshold() {
        let t = [25.0, 50.0, 75.0];
        assert_eq!(crossed_moving_in(&t, 10.0), None);
        assert_eq!(crossed_moving_in(&t, 30.0), Some(25.0));
        assert_eq!(crossed_moving_in(&t, 75.5), Some(75.0));
        assert_eq!(crossed_moving_in(&t, 100.0), Some(75.0));
    }

    #[test]
    fn moving_out_picks_lowest_undercut_threshold() {
        let t = [90.0, 20.0, 5.0];
        assert_eq!(crossed_moving_out(&t, 95.0), None);
        assert_eq!(crossed_moving_out(&t, 50.0), Some(90.0));
        assert_eq!(crossed_moving_out(&t, 0.0), Some(5.0));
    }

    #[test]
    fn equality_is_never_a_crossing() {
        assert_eq!(crossed_moving_in(&[50.0], 50.0), None);
        assert_eq!(crossed_moving_out(&[50.0], 50.0), None);
    }

    #[test]
    fn scan_stops_at_first_unexceeded_threshold() {
        // Out-of-order input is a caller bug; the scan must not look past 80.
        assert_eq!(crossed_moving_in(&[10.0, 80.0, 20.0], 50.0), Some(10.0));
    }

    #[test]
    fn duplicates_report_the_shared_value() {
        assert_eq!(crossed_moving_in(&[50.0, 50.0], 60.0), Some(50.0));
    }

    #[test]
    fn crossed_dispatches_on_direction() {
        let set = ThresholdSet::new([25.0, 50.0], [50.0, 25.0]);
        assert_eq!(set.crossed(Direction::MovingIn, 40.0), Some(25.0));
        assert_eq!(set.crossed(Direction::MovingOut, 40.0), Some(50.0));
        assert_eq!(set.crossed(Direction::None, 40.0), None);
    }

    #[test]
    fn from_unsorted_sorts_each_direction() {
        let set = ThresholdSet::from_unsorted([50.0, 5.0, 25.0], [5.0, 90.0, 20.0]).unwrap();
        assert_eq!(set.moving_in(), &[5.0, 25.0, 50.0]);
        assert_eq!(set.moving_out(), &[90.0, 20.0, 5.0]);
    }

    #[test]
    fn from_unsorted_rejects_bad_values() {
        assert!(
            matches!(
                ThresholdSet::from_unsorted([f64::NAN], []),
                Err(ThresholdError::NotFinite { value }) if value.is_nan()
            ),
            "NaN must be rejected"
        );
        assert_eq!(
            ThresholdSet::from_unsorted([], [101.0]),
            Err(ThresholdError::OutOfRange { value: 101.0 })
        );
        assert_eq!(
            ThresholdSet::from_unsorted([-1.0], []),
            Err(ThresholdError::OutOfRange { value: -1.0 })
        );
    }

    #[test]
    fn empty_set() {
        let set = ThresholdSet::new(Vec::new(), Vec::new());
        assert_eq!(set.crossed(Direction::MovingIn, 100.0), None);
        assert_eq!(set.crossed(Direction::MovingOut, 0.0), None);
    }
}
