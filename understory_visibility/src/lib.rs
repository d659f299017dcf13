// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility --heading-base-level=0

//! Understory Visibility: threshold-crossing events for elements in scrollable containers.
//!
//! This crate tracks how much of an on-screen element is visible and reports
//! directional "crossed a threshold" events as that changes, for impression
//! analytics or feed playback ("this card became 50% visible while scrolling
//! down").
//!
//! The core concepts are:
//!
//! - [`Direction`]: whether visibility is increasing, decreasing, or flat.
//! - [`ThresholdSet`]: ascending thresholds checked while moving in and
//!   descending thresholds checked while moving out.
//! - [`TrackerState`]: the decision engine. Given a sampled percentage and the
//!   current time it decides whether to emit a [`VisibilityEvent`], applying
//!   throttling and suppressing repeats within the same threshold band.
//! - [`VisibilityTracker`]: a per-element controller that owns the
//!   configuration and a [`TrackerState`], and models the attach/detach
//!   lifecycle with [`VisibilityTracker::start`] and [`VisibilityTracker::stop`].
//! - [`Coverage`]: measures the visible percentage of a [`kurbo::Rect`] inside
//!   a viewport.
//! - [`stage`]: named media-card stages (prefetch, play, pause, release) on top
//!   of the raw thresholds.
//!
//! The crate does not own a timer, a clock, or any view hierarchy. Host
//! frameworks are responsible for:
//!
//! - Sampling each tracked element once per frame (roughly every 16 ms) while
//!   it is attached, and passing the current time in milliseconds.
//! - Calling `start` on attach and `stop` on detach.
//! - Forwarding returned events to observers.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_visibility::{Direction, ThresholdSet, VisibilityTracker};
//!
//! let mut tracker = VisibilityTracker::new()
//!     .with_id("card-7")
//!     .with_thresholds(ThresholdSet::new([25.0, 50.0, 75.0], [75.0, 50.0, 25.0]))
//!     .with_throttle_millis(100);
//!
//! tracker.start(0);
//!
//! // Scrolling in: 30% crosses 25.
//! let event = tracker.observe(30.0, 16).unwrap();
//! assert_eq!(event.id, "card-7");
//! assert_eq!(event.direction, Direction::MovingIn);
//! assert_eq!(event.percentage, 30.0);
//!
//! // Throttled, and still within the same band anyway. The sample still
//! // becomes the baseline for the next direction check.
//! assert!(tracker.observe(40.0, 32).is_none());
//!
//! // Scrolling back out: 35% is below 50 while moving out.
//! let event = tracker.observe(35.0, 200).unwrap();
//! assert_eq!(event.direction, Direction::MovingOut);
//!
//! // Detaching forces a final 0% observation, which crosses 25.
//! let event = tracker.stop(300).unwrap();
//! assert_eq!(event.direction, Direction::MovingOut);
//! assert_eq!(event.percentage, 0.0);
//! ```
//!
//! Thresholds must be sorted before they reach the tracker. Use
//! [`ThresholdSet::from_unsorted`] to validate and sort raw host input.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for events, directions, stages and
//!   threshold sets, using camelCase wire names (`"movingIn"`).
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade at `debug`
//! and `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coverage;
mod direction;
mod event;
pub mod stage;
mod state;
pub mod thresholds;
mod tracker;

pub use coverage::Coverage;
pub use direction::{Direction, ParseDirectionError};
pub use event::VisibilityEvent;
pub use state::TrackerState;
pub use thresholds::{ThresholdError, ThresholdSet};
pub use tracker::VisibilityTracker;
