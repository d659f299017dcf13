// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named visibility stages for media cards in a scrolling feed.
//!
//! A feed player usually attaches a meaning to each threshold: start
//! prefetching at 5% while scrolling in, play at 50%, pause below 90% while
//! scrolling out, and so on. [`StageThresholds`] names those six thresholds,
//! converts them into a [`ThresholdSet`] for the tracker, and maps emitted
//! events back to a [`CardStage`].
//!
//! ```
//! use understory_visibility::stage::{CardStage, StageThresholds};
//! use understory_visibility::VisibilityTracker;
//!
//! let stages = StageThresholds::SHORTS;
//! let mut tracker = VisibilityTracker::new()
//!     .with_id("short-1")
//!     .with_thresholds(stages.threshold_set().unwrap());
//! tracker.start(0);
//!
//! let event = tracker.observe(60.0, 16).unwrap();
//! assert_eq!(stages.stage_for_event(&event), Some(CardStage::IsActive));
//! ```

use core::fmt;

use crate::thresholds::{ThresholdError, ThresholdSet, crossed_moving_in, crossed_moving_out};
use crate::{Direction, VisibilityEvent};

/// Lifecycle stage of a media card, keyed by the threshold it just crossed.
///
/// Variants are ordered by lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum CardStage {
    /// Scrolling in: begin fetching media.
    Prefetch,
    /// Scrolling in: mount the player, paused.
    PrepareToBeActive,
    /// Scrolling in: start playback.
    IsActive,
    /// Scrolling out: pause playback.
    WillResignActive,
    /// Scrolling out: unmount the player.
    NotActive,
    /// Scrolling out: cancel prefetch and release resources.
    Released,
}

impl CardStage {
    /// Returns the wire name, e.g. `"prepareToBeActive"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prefetch => "prefetch",
            Self::PrepareToBeActive => "prepareToBeActive",
            Self::IsActive => "isActive",
            Self::WillResignActive => "willResignActive",
            Self::NotActive => "notActive",
            Self::Released => "released",
        }
    }

    /// The direction in which this stage is entered.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Prefetch | Self::PrepareToBeActive | Self::IsActive => Direction::MovingIn,
            Self::WillResignActive | Self::NotActive | Self::Released => Direction::MovingOut,
        }
    }
}

impl fmt::Display for CardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds crossed while a card scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovingInStages {
    /// Visibility above which media starts prefetching.
    pub prefetch: f64,
    /// Visibility above which the player is mounted, paused.
    pub prepare_to_be_active: f64,
    /// Visibility above which playback starts.
    pub is_active: f64,
}

/// Thresholds crossed while a card scrolls out of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovingOutStages {
    /// Visibility below which playback pauses.
    pub will_resign_active: f64,
    /// Visibility below which the player is unmounted.
    pub not_active: f64,
    /// Visibility below which everything is released.
    pub released: f64,
}

/// Six named thresholds describing a card's playback lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageThresholds {
    /// Stages entered while scrolling in.
    pub moving_in: MovingInStages,
    /// Stages entered while scrolling out.
    pub moving_out: MovingOutStages,
}

impl StageThresholds {
    /// Full-screen short videos.
    pub const SHORTS: Self = Self {
        moving_in: MovingInStages {
            prefetch: 5.0,
            prepare_to_be_active: 25.0,
            is_active: 50.0,
        },
        moving_out: MovingOutStages {
            will_resign_active: 90.0,
            not_active: 20.0,
            released: 5.0,
        },
    };

    /// Carousel cards, which only play when almost fully visible.
    pub const CAROUSEL: Self = Self {
        moving_in: MovingInStages {
            prefetch: 5.0,
            prepare_to_be_active: 25.0,
            is_active: 90.0,
        },
        moving_out: MovingOutStages {
            will_resign_active: 70.0,
            not_active: 10.0,
            released: 5.0,
        },
    };

    /// Builds the tracker thresholds for these stages.
    pub fn threshold_set(&self) -> Result<ThresholdSet, ThresholdError> {
        ThresholdSet::from_unsorted(
            self.moving_in_sorted().map(|(t, _)| t),
            self.moving_out_sorted().map(|(t, _)| t),
        )
    }

    /// Returns the stage whose threshold `percentage` lies beyond in
    /// `direction`, using the same scan as the tracker.
    ///
    /// When two stages share a threshold value the later stage in lifecycle
    /// order wins.
    #[must_use]
    pub fn stage_for(&self, direction: Direction, percentage: f64) -> Option<CardStage> {
        match direction {
            Direction::MovingIn => {
                let stages = self.moving_in_sorted();
                let crossed = crossed_moving_in(&stages.map(|(t, _)| t), percentage)?;
                stage_at(&stages, crossed)
            }
            Direction::MovingOut => {
                let stages = self.moving_out_sorted();
                let crossed = crossed_moving_out(&stages.map(|(t, _)| t), percentage)?;
                stage_at(&stages, crossed)
            }
            Direction::None => None,
        }
    }

    /// Returns the stage an emitted event corresponds to.
    #[must_use]
    pub fn stage_for_event<K>(&self, event: &VisibilityEvent<K>) -> Option<CardStage> {
        self.stage_for(event.direction, event.percentage)
    }

    fn moving_in_sorted(&self) -> [(f64, CardStage); 3] {
        let mut stages = [
            (self.moving_in.prefetch, CardStage::Prefetch),
            (
                self.moving_in.prepare_to_be_active,
                CardStage::PrepareToBeActive,
            ),
            (self.moving_in.is_active, CardStage::IsActive),
        ];
        stages.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        stages
    }

    fn moving_out_sorted(&self) -> [(f64, CardStage); 3] {
        let mut stages = [
            (
                self.moving_out.will_resign_active,
                CardStage::WillResignActive,
            ),
            (self.moving_out.not_active, CardStage::NotActive),
            (self.moving_out.released, CardStage::Released),
        ];
        stages.sort_unstable_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        stages
    }
}

fn stage_at(stages: &[(f64, CardStage)], threshold: f64) -> Option<CardStage> {
    stages
        .iter()
        .rev()
        .find(|(t, _)| *t == threshold)
        .map(|&(_, stage)| stage)
}
