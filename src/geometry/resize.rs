//! Pointer-to-ratio mapping for an active resize.

use crate::model::{Axis, Ratio, Slot};
use serde::Deserialize;

/// Rectangle in terminal cell units, fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Frame {
    /// Frame at (`x`, `y`) of the given size. Negative sizes become zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Start and length along `axis`.
    ///
    /// A vertical split divides width, a horizontal split divides height.
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.x, self.width),
            Axis::Horizontal => (self.y, self.height),
        }
    }

    /// True if the frame has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<ratatui::layout::Rect> for Frame {
    fn from(rect: ratatui::layout::Rect) -> Self {
        Self::new(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        )
    }
}

/// Which region the resize pointer is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFrame {
    /// The whole editable area.
    #[default]
    Editor,
    /// The active split's own region.
    Split,
}

/// Tunables of the resize engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSettings {
    /// Ratios closer than this to 50 snap to exactly 50. Zero disables snapping.
    pub snap_threshold: f64,
    /// Ratios within this distance of 0 or 100 collapse the split on release.
    pub collapse_epsilon: f64,
    /// Reference region for pointer mapping.
    pub frame: ResizeFrame,
}

impl ResizeSettings {
    /// Default snap threshold in percent.
    pub const DEFAULT_SNAP_THRESHOLD: f64 = 2.0;
    /// Default collapse epsilon in percent.
    pub const DEFAULT_COLLAPSE_EPSILON: f64 = 1.0;

    /// Exclusive upper bound on the snap threshold for `collapse_epsilon`.
    ///
    /// At or above it the snap band reaches the collapse band and a drag
    /// could never end in a collapse.
    pub fn snap_threshold_limit(collapse_epsilon: f64) -> f64 {
        50.0 - collapse_epsilon
    }
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            snap_threshold: Self::DEFAULT_SNAP_THRESHOLD,
            collapse_epsilon: Self::DEFAULT_COLLAPSE_EPSILON,
            frame: ResizeFrame::Editor,
        }
    }
}

/// Map a pointer position to a clamped percentage along `axis` of `frame`.
///
/// Returns `None` for a frame with no extent along `axis`.
pub fn pointer_to_ratio(axis: Axis, x: f64, y: f64, frame: &Frame) -> Option<Ratio> {
    let (start, length) = frame.span(axis);
    if length <= 0.0 {
        return None;
    }
    let pointer = match axis {
        Axis::Vertical => x,
        Axis::Horizontal => y,
    };
    Some(Ratio::new((pointer - start) * 100.0 / length))
}

/// Snap `ratio` to 50 when it lies strictly within `threshold` of it.
pub fn snap(ratio: Ratio, threshold: f64) -> Ratio {
    if (ratio.value() - 50.0).abs() < threshold {
        Ratio::HALF
    } else {
        ratio
    }
}

/// Pending ratio for a pointer position: mapped, clamped, then snapped.
pub fn pending_ratio(
    axis: Axis,
    x: f64,
    y: f64,
    frame: &Frame,
    settings: &ResizeSettings,
) -> Option<Ratio> {
    pointer_to_ratio(axis, x, y, frame).map(|ratio| snap(ratio, settings.snap_threshold))
}

/// Child that survives when a split is released at `ratio`.
///
/// `None` when the ratio leaves both children with area. At or below
/// `epsilon` the first child has vanished, at or above `100 - epsilon` the
/// second has.
pub fn collapse_survivor(ratio: Ratio, epsilon: f64) -> Option<Slot> {
    let value = ratio.value();
    if value <= epsilon {
        Some(Slot::Second)
    } else if value >= 100.0 - epsilon {
        Some(Slot::First)
    } else {
        None
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Frame {
        Frame::new(0.0, 1.0, 80.0, 22.0)
    }

    #[test]
    fn vertical_ratio_uses_x_and_width() {
        let ratio = pointer_to_ratio(Axis::Vertical, 20.0, 5.0, &editor()).unwrap();
        assert_eq!(ratio, Ratio::new(25.0));
    }

    #[test]
    fn horizontal_ratio_uses_y_and_height_from_frame_top() {
        let ratio = pointer_to_ratio(Axis::Horizontal, 20.0, 12.0, &editor()).unwrap();
        assert_eq!(ratio, Ratio::new(50.0));
    }

    #[test]
    fn pointer_outside_frame_is_clamped() {
        assert_eq!(
            pointer_to_ratio(Axis::Vertical, -10.0, 0.0, &editor()),
            Some(Ratio::MIN)
        );
        assert_eq!(
            pointer_to_ratio(Axis::Vertical, 500.0, 0.0, &editor()),
            Some(Ratio::MAX)
        );
    }

    #[test]
    fn zero_width_frame_has_no_ratio() {
        let frame = Frame::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(pointer_to_ratio(Axis::Vertical, 3.0, 3.0, &frame), None);
        assert!(pointer_to_ratio(Axis::Horizontal, 3.0, 3.0, &frame).is_some());
    }

    #[test]
    fn forty_nine_snaps_to_fifty() {
        let frame = Frame::new(0.0, 0.0, 100.0, 10.0);
        let settings = ResizeSettings::default();
        let ratio = pending_ratio(Axis::Vertical, 49.0, 0.0, &frame, &settings).unwrap();
        assert_eq!(ratio, Ratio::HALF);
    }

    #[test]
    fn snap_boundary_is_exclusive() {
        assert_eq!(snap(Ratio::new(48.0), 2.0), Ratio::new(48.0));
        assert_eq!(snap(Ratio::new(51.9), 2.0), Ratio::HALF);
        assert_eq!(snap(Ratio::new(49.5), 0.0), Ratio::new(49.5));
    }

    #[test]
    fn collapse_survivor_thresholds() {
        assert_eq!(collapse_survivor(Ratio::MIN, 1.0), Some(Slot::Second));
        assert_eq!(collapse_survivor(Ratio::new(1.0), 1.0), Some(Slot::Second));
        assert_eq!(collapse_survivor(Ratio::new(1.5), 1.0), None);
        assert_eq!(collapse_survivor(Ratio::new(99.0), 1.0), Some(Slot::First));
        assert_eq!(collapse_survivor(Ratio::MAX, 0.0), Some(Slot::First));
        assert_eq!(collapse_survivor(Ratio::new(40.0), 1.0), None);
    }

    #[test]
    fn resize_frame_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            frame: ResizeFrame,
        }
        let w: Wrapper = toml::from_str(r#"frame = "split""#).unwrap();
        assert_eq!(w.frame, ResizeFrame::Split);
    }
}
