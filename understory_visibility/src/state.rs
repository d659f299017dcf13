// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The threshold-crossing decision engine.
//!
//! [`TrackerState`] holds the history for one tracked element and decides, for
//! each new visibility sample, whether an event should be emitted:
//!
//! 1. The direction is recomputed from the previous sample. A plateau returns
//!    early without touching the throttle clock.
//! 2. While a throttle window is open nothing is emitted. Only successful
//!    emissions restart the window.
//! 3. The sample must lie beyond some threshold in the current direction.
//! 4. If the last emitted event went the same way, the band it crossed is
//!    recomputed from its stored percentage; an unchanged band is suppressed.
//!    A reversal always reports.
//!
//! ## Minimal example
//!
//! ```
//! use understory_visibility::{Direction, ThresholdSet, TrackerState};
//!
//! let thresholds = ThresholdSet::new([25.0, 50.0, 75.0], [75.0, 50.0, 25.0]);
//! let mut state = TrackerState::new();
//!
//! assert!(state.observe(10.0, 0, &thresholds, &"card", None).is_none());
//!
//! let event = state.observe(30.0, 16, &thresholds, &"card", None).unwrap();
//! assert_eq!(event.direction, Direction::MovingIn);
//! assert_eq!(event.percentage, 30.0);
//!
//! // Still inside the 25..50 band.
//! assert!(state.observe(40.0, 32, &thresholds, &"card", None).is_none());
//! ```

use crate::{Direction, ThresholdSet, VisibilityEvent};

/// Per-element visibility history.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState<K> {
    last_percentage: Option<f64>,
    last_direction: Direction,
    last_emitted: Option<VisibilityEvent<K>>,
    last_emitted_at_millis: Option<u64>,
}

impl<K> Default for TrackerState<K> {
    fn default() -> Self {
        Self {
            last_percentage: None,
            last_direction: Direction::None,
            last_emitted: None,
            last_emitted_at_millis: None,
        }
    }
}

impl<K> TrackerState<K> {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all history.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The most recently observed percentage.
    #[must_use]
    pub fn last_percentage(&self) -> Option<f64> {
        self.last_percentage
    }

    /// Direction computed by the most recent observation.
    #[must_use]
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// The most recently emitted event.
    #[must_use]
    pub fn last_emitted(&self) -> Option<&VisibilityEvent<K>> {
        self.last_emitted.as_ref()
    }

    /// Timestamp of the most recent emission, or `None` if nothing was emitted
    /// since the last reset.
    #[must_use]
    pub fn last_emitted_at_millis(&self) -> Option<u64> {
        self.last_emitted_at_millis
    }

    /// Records a visibility sample and returns the event to emit, if any.
    ///
    /// `percentage` is expected in `[0, 100]` and `thresholds` to be sorted as
    /// documented on [`ThresholdSet`]; neither is validated here.
    /// `throttle_millis` of `None` or `0` disables throttling.
    pub fn observe(
        &mut self,
        percentage: f64,
        now_millis: u64,
        thresholds: &ThresholdSet,
        id: &K,
        throttle_millis: Option<u64>,
    ) -> Option<VisibilityEvent<K>>
    where
        K: Clone,
    {
        let direction = Direction::between(self.last_percentage.unwrap_or(0.0), percentage);
        self.last_percentage = Some(percentage);
        self.last_direction = direction;

        if direction == Direction::None {
            return None;
        }

        if self.is_throttled(now_millis, throttle_millis) {
            log::trace!("visibility {percentage} suppressed by throttle");
            return None;
        }

        let crossed = thresholds.crossed(direction, percentage)?;

        if let Some(last) = &self.last_emitted {
            // Band of the previous emission, recomputed against `thresholds`.
            if last.direction == direction
                && thresholds.crossed(direction, last.percentage) == Some(crossed)
            {
                return None;
            }
        }

        let event = VisibilityEvent {
            id: id.clone(),
            direction,
            percentage,
        };
        log::trace!("{direction} crossing of {crossed} at {percentage}");
        self.last_emitted_at_millis = Some(now_millis);
        self.last_emitted = Some(event.clone());
        Some(event)
    }

    fn is_throttled(&self, now_millis: u64, throttle_millis: Option<u64>) -> bool {
        match (throttle_millis, self.last_emitted_at_millis) {
            (Some(interval), Some(at)) if interval > 0 => now_millis.saturating_sub(at) < interval,
            _ => false,
        }
    }
}
