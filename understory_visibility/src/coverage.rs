// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring how much of an element is inside a viewport.
//!
//! Both rectangles must be in the same coordinate space, typically the window.
//!
//! ```
//! use kurbo::Rect;
//! use understory_visibility::Coverage;
//!
//! let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
//! // Bottom quarter of the card hangs below the viewport.
//! let card = Rect::new(0.0, 600.0, 400.0, 1000.0);
//!
//! assert_eq!(Coverage::Area.percentage(card, viewport), 50.0);
//! assert_eq!(Coverage::Vertical.percentage(card, viewport), 50.0);
//! ```

use kurbo::Rect;

/// How the visible fraction of an element is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Visible area over total area.
    #[default]
    Area,
    /// Visible height over total height, ignoring horizontal clipping.
    Vertical,
}

impl Coverage {
    /// Returns the visible percentage of `bounds` inside `viewport`, in `[0, 100]`.
    ///
    /// Bounds with zero (or non-finite) width or height are reported as `0`.
    #[must_use]
    pub fn percentage(self, bounds: Rect, viewport: Rect) -> f64 {
        let bounds = bounds.abs();
        let (width, height) = (bounds.width(), bounds.height());
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return 0.0;
        }
        let visible = bounds.intersect(viewport.abs());
        let ratio = match self {
            Self::Area => visible.area() / bounds.area(),
            Self::Vertical if visible.width() > 0.0 => visible.height() / height,
            Self::Vertical => 0.0,
        };
        if ratio.is_nan() {
            return 0.0;
        }
        (ratio * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn fully_inside_is_full_visibility() {
        let card = Rect::new(10.0, 10.0, 60.0, 60.0);
        assert_eq!(Coverage::Area.percentage(card, VIEWPORT), 100.0);
        assert_eq!(Coverage::Vertical.percentage(card, VIEWPORT), 100.0);
    }

    #[test]
    fn disjoint_is_zero() {
        let card = Rect::new(0.0, 200.0, 100.0, 300.0);
        assert_eq!(Coverage::Area.percentage(card, VIEWPORT), 0.0);
        assert_eq!(Coverage::Vertical.percentage(card, VIEWPORT), 0.0);
    }

    #[test]
    fn area_accounts_for_both_axes() {
        // Half the height and half the width are visible.
        let card = Rect::new(50.0, 50.0, 150.0, 150.0);
        assert_eq!(Coverage::Area.percentage(card, VIEWPORT), 25.0);
        assert_eq!(Coverage::Vertical.percentage(card, VIEWPORT), 50.0);
    }

    #[test]
    fn vertical_is_zero_when_clipped_out_horizontally() {
        let card = Rect::new(200.0, 0.0, 300.0, 100.0);
        assert_eq!(Coverage::Vertical.percentage(card, VIEWPORT), 0.0);
    }

    #[test]
    fn degenerate_bounds_are_zero() {
        assert_eq!(
            Coverage::Area.percentage(Rect::new(10.0, 10.0, 10.0, 50.0), VIEWPORT),
            0.0
        );
        assert_eq!(
            Coverage::Area.percentage(Rect::new(10.0, 10.0, 50.0, 10.0), VIEWPORT),
            0.0
        );
        assert_eq!(
            Coverage::Area.percentage(Rect::new(0.0, 0.0, f64::NAN, 10.0), VIEWPORT),
            0.0
        );
    }

    #[test]
    fn flipped_rects_are_normalized() {
        let card = Rect::new(60.0, 60.0, 10.0, 10.0);
        assert_eq!(Coverage::Area.percentage(card, VIEWPORT), 100.0);
    }
}
