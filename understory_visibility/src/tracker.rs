// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::{Coverage, ThresholdSet, TrackerState, VisibilityEvent};

/// Tracks the visibility of one element across a start/stop lifecycle.
///
/// The host supplies configuration (id, thresholds, throttle) as it becomes
/// available, calls [`start`](Self::start) when the element attaches,
/// [`observe`](Self::observe) or [`sample`](Self::sample) on every frame while
/// attached, and [`stop`](Self::stop) when it detaches. Observations are
/// ignored while the id or thresholds are missing, and while not tracking.
#[derive(Clone, Debug)]
pub struct VisibilityTracker<K> {
    id: Option<K>,
    thresholds: Option<ThresholdSet>,
    throttle_millis: Option<u64>,
    coverage: Coverage,
    state: TrackerState<K>,
    tracking: bool,
}

impl<K> Default for VisibilityTracker<K> {
    fn default() -> Self {
        Self {
            id: None,
            thresholds: None,
            throttle_millis: None,
            coverage: Coverage::default(),
            state: TrackerState::default(),
            tracking: false,
        }
    }
}

impl<K: Clone> VisibilityTracker<K> {
    /// Creates an unconfigured, stopped tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the element id and returns `self`.
    #[must_use]
    pub fn with_id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the thresholds and returns `self`.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdSet) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Sets the throttle interval and returns `self`.
    #[must_use]
    pub fn with_throttle_millis(mut self, throttle_millis: u64) -> Self {
        self.throttle_millis = Some(throttle_millis);
        self
    }

    /// Sets how [`sample`](Self::sample) measures visibility and returns `self`.
    #[must_use]
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    /// Sets or clears the element id.
    pub fn set_id(&mut self, id: Option<K>) {
        self.id = id;
    }

    /// Sets or clears the thresholds.
    pub fn set_thresholds(&mut self, thresholds: Option<ThresholdSet>) {
        self.thresholds = thresholds;
    }

    /// Sets or clears the throttle interval. `Some(0)` disables throttling.
    pub fn set_throttle_millis(&mut self, throttle_millis: Option<u64>) {
        self.throttle_millis = throttle_millis;
    }

    /// Sets how [`sample`](Self::sample) measures visibility.
    pub fn set_coverage(&mut self, coverage: Coverage) {
        self.coverage = coverage;
    }

    /// The element id, if configured.
    #[must_use]
    pub fn id(&self) -> Option<&K> {
        self.id.as_ref()
    }

    /// The thresholds, if configured.
    #[must_use]
    pub fn thresholds(&self) -> Option<&ThresholdSet> {
        self.thresholds.as_ref()
    }

    /// The throttle interval, if configured.
    #[must_use]
    pub fn throttle_millis(&self) -> Option<u64> {
        self.throttle_millis
    }

    /// The measurement mode used by [`sample`](Self::sample).
    #[must_use]
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// The decision-engine history.
    #[must_use]
    pub fn state(&self) -> &TrackerState<K> {
        &self.state
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Starts tracking with a fresh history.
    ///
    /// Records an initial observation at 0%, which never emits. Does nothing if
    /// already tracking.
    pub fn start(&mut self, now_millis: u64) -> Option<VisibilityEvent<K>> {
        if self.tracking {
            return None;
        }
        log::debug!("visibility tracking started");
        self.state.reset();
        let event = self.process(0.0, now_millis);
        self.tracking = true;
        event
    }

    /// Stops tracking.
    ///
    /// Records a final observation at 0% first, so an element that was visible
    /// reports its moving-out crossing. Does nothing if not tracking.
    pub fn stop(&mut self, now_millis: u64) -> Option<VisibilityEvent<K>> {
        if !self.tracking {
            return None;
        }
        let event = self.process(0.0, now_millis);
        self.tracking = false;
        log::debug!("visibility tracking stopped");
        event
    }

    /// Records a visibility percentage in `[0, 100]` and returns the event to
    /// emit, if any.
    pub fn observe(&mut self, percentage: f64, now_millis: u64) -> Option<VisibilityEvent<K>> {
        if !self.tracking {
            return None;
        }
        self.process(percentage, now_millis)
    }

    /// Measures `bounds` against `viewport` and observes the result.
    ///
    /// See [`Coverage::percentage`].
    pub fn sample(
        &mut self,
        bounds: Rect,
        viewport: Rect,
        now_millis: u64,
    ) -> Option<VisibilityEvent<K>> {
        let percentage = self.coverage.percentage(bounds, viewport);
        self.observe(percentage, now_millis)
    }

    fn process(&mut self, percentage: f64, now_millis: u64) -> Option<VisibilityEvent<K>> {
        let (Some(id), Some(thresholds)) = (&self.id, &self.thresholds) else {
            return None;
        };
        self.state
            .observe(percentage, now_millis, thresholds, id, self.throttle_millis)
    }
}
