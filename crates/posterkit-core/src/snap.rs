//! Alignment snapping for dragged elements.
//!
//! Given a candidate placement, the bounding boxes of its siblings and the
//! frame size, [`compute_snap`] corrects each axis independently to the
//! nearest aligned target within [`SNAP_TOLERANCE`] and reports the guides
//! to render. Pure computation; the document is never touched here.

use kurbo::Size;

use crate::geometry::Bounds;

/// Maximum pixel distance at which two points are considered aligned.
pub const SNAP_TOLERANCE: f64 = 6.0;

/// Orientation of a rendered alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// A horizontal line (emitted by a y-axis snap).
    Horizontal,
    /// A vertical line (emitted by an x-axis snap).
    Vertical,
}

/// An alignment guide to render during a drag. Ephemeral: guides exist only
/// while a drag session is active and are cleared on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub orientation: GuideOrientation,
    /// Coordinate of the line on its snapped axis.
    pub position: f64,
    /// Start of the line along the other axis.
    pub start: f64,
    /// End of the line along the other axis.
    pub end: f64,
}

/// Result of a snap computation: the corrected top-left position and the
/// guides to render (at most one per axis).
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    pub x: f64,
    pub y: f64,
    pub guides: Vec<SnapGuide>,
}

impl SnapOutcome {
    /// Outcome that leaves the candidate untouched.
    fn unchanged(candidate: &Bounds) -> Self {
        Self {
            x: candidate.left,
            y: candidate.top,
            guides: Vec::new(),
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Winning snap on one axis.
struct AxisSnap {
    /// Correction to add to the candidate's coordinate on this axis.
    delta: f64,
    /// Target coordinate the guide sits on.
    position: f64,
    /// Guide extent along the other axis.
    extent: (f64, f64),
}

/// Compute the snapped position for `candidate` against `siblings` and the
/// frame edges/center.
///
/// The axes are resolved independently: an x snap never changes y and vice
/// versa. On each axis the nearest target within tolerance wins; at equal
/// distance frame targets beat sibling targets and earlier siblings beat
/// later ones. Malformed (non-finite) candidate bounds fall back to the
/// uncorrected position with no guides.
pub fn compute_snap(candidate: &Bounds, siblings: &[Bounds], frame: Size) -> SnapOutcome {
    if !candidate.is_finite() {
        return SnapOutcome::unchanged(candidate);
    }

    let mut outcome = SnapOutcome::unchanged(candidate);
    if let Some(snap) = snap_axis(Axis::X, candidate, siblings, frame) {
        outcome.x = candidate.left + snap.delta;
        outcome.guides.push(SnapGuide {
            orientation: GuideOrientation::Vertical,
            position: snap.position,
            start: snap.extent.0,
            end: snap.extent.1,
        });
    }
    if let Some(snap) = snap_axis(Axis::Y, candidate, siblings, frame) {
        outcome.y = candidate.top + snap.delta;
        outcome.guides.push(SnapGuide {
            orientation: GuideOrientation::Horizontal,
            position: snap.position,
            start: snap.extent.0,
            end: snap.extent.1,
        });
    }
    outcome
}

/// Comparison points of a box on one axis: leading edge, center, trailing
/// edge.
fn axis_points(axis: Axis, bounds: &Bounds) -> [f64; 3] {
    match axis {
        Axis::X => [bounds.left, bounds.center_x, bounds.right],
        Axis::Y => [bounds.top, bounds.center_y, bounds.bottom],
    }
}

fn snap_axis(axis: Axis, candidate: &Bounds, siblings: &[Bounds], frame: Size) -> Option<AxisSnap> {
    let points = axis_points(axis, candidate);
    let (frame_len, cross_len) = match axis {
        Axis::X => (frame.width, frame.height),
        Axis::Y => (frame.height, frame.width),
    };

    // Targets in priority order: frame edges and center first, then each
    // sibling's points in insertion order. A strictly smaller distance is
    // required to displace the current best, so ties keep the earlier
    // target.
    let mut targets: Vec<(f64, (f64, f64))> = Vec::with_capacity(3 + siblings.len() * 3);
    for position in [0.0, frame_len / 2.0, frame_len] {
        targets.push((position, (0.0, cross_len)));
    }
    for sibling in siblings {
        let extent = match axis {
            Axis::X => (
                candidate.top.min(sibling.top),
                candidate.bottom.max(sibling.bottom),
            ),
            Axis::Y => (
                candidate.left.min(sibling.left),
                candidate.right.max(sibling.right),
            ),
        };
        for position in axis_points(axis, sibling) {
            targets.push((position, extent));
        }
    }

    let mut best: Option<AxisSnap> = None;
    for (position, extent) in targets {
        if !position.is_finite() {
            continue;
        }
        for point in points {
            let delta = position - point;
            if delta.abs() <= SNAP_TOLERANCE
                && best.as_ref().is_none_or(|b| delta.abs() < b.delta.abs())
            {
                best = Some(AxisSnap {
                    delta,
                    position,
                    extent,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    const FRAME: Size = Size::new(720.0, 720.0);

    fn bounds(left: f64, top: f64, width: f64, height: f64) -> Bounds {
        Bounds::new(Point::new(left, top), Size::new(width, height))
    }

    // Far from every frame edge and center on both axes.
    fn neutral(left: f64, top: f64) -> Bounds {
        bounds(left, top, 50.0, 50.0)
    }

    #[test]
    fn snap_is_deterministic() {
        let candidate = neutral(103.0, 200.0);
        let siblings = vec![bounds(100.0, 400.0, 80.0, 80.0)];
        let first = compute_snap(&candidate, &siblings, FRAME);
        let second = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(first, second);
    }

    #[test]
    fn snaps_exactly_at_tolerance() {
        // Sibling right edge at x=300, candidate left edge at x=306.
        let candidate = bounds(306.0, 200.0, 40.0, 50.0);
        let siblings = vec![bounds(220.0, 500.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 300.0);
    }

    #[test]
    fn does_not_snap_past_tolerance() {
        let candidate = bounds(307.0, 200.0, 40.0, 50.0);
        let siblings = vec![bounds(220.0, 500.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 307.0);
        assert!(outcome.guides.is_empty());
    }

    #[test]
    fn axes_are_independent() {
        // Within x tolerance of a sibling's left edge, far on y.
        let candidate = neutral(104.0, 233.0);
        let siblings = vec![bounds(100.0, 500.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 100.0);
        assert_eq!(outcome.y, 233.0);
        assert_eq!(outcome.guides.len(), 1);
        assert_eq!(outcome.guides[0].orientation, GuideOrientation::Vertical);
    }

    #[test]
    fn nearest_target_wins() {
        // Sibling A left edge at 98 (delta 5), sibling B left edge at 101
        // (delta 2): B is nearer.
        let candidate = neutral(103.0, 200.0);
        let siblings = vec![
            bounds(98.0, 500.0, 80.0, 80.0),
            bounds(101.0, 600.0, 80.0, 80.0),
        ];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 101.0);
    }

    #[test]
    fn equal_distance_prefers_frame() {
        // Candidate left edge at x=4: frame left edge (delta -4) and a
        // sibling edge at x=8 (delta +4) are equidistant.
        let candidate = neutral(4.0, 200.0);
        let siblings = vec![bounds(8.0, 500.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 0.0);
        // Frame guides span the full frame dimension.
        assert_eq!(outcome.guides[0].start, 0.0);
        assert_eq!(outcome.guides[0].end, FRAME.height);
    }

    #[test]
    fn equal_distance_prefers_earlier_sibling() {
        let candidate = neutral(104.0, 200.0);
        // Both edges are 4 px away, on opposite sides.
        let siblings = vec![
            bounds(100.0, 500.0, 80.0, 80.0),
            bounds(108.0, 600.0, 80.0, 80.0),
        ];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 100.0);
    }

    #[test]
    fn zero_siblings_still_snap_to_frame() {
        // center_x = 357, 3 px from the frame center at 360.
        let candidate = neutral(332.0, 200.0);
        let outcome = compute_snap(&candidate, &[], FRAME);
        assert_eq!(outcome.x, 335.0);
        assert_eq!(outcome.guides[0].position, 360.0);
    }

    #[test]
    fn oversized_candidate_uses_raw_coordinates() {
        // Wider than the frame; its left edge can still snap to frame left.
        let candidate = bounds(-3.0, 100.0, 900.0, 100.0);
        let outcome = compute_snap(&candidate, &[], FRAME);
        assert_eq!(outcome.x, 0.0);
    }

    #[test]
    fn sibling_guide_spans_both_boxes() {
        let candidate = neutral(104.0, 200.0);
        let siblings = vec![bounds(100.0, 400.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        let guide = outcome.guides[0];
        assert_eq!(guide.orientation, GuideOrientation::Vertical);
        assert_eq!(guide.position, 100.0);
        assert_eq!(guide.start, 200.0); // candidate top
        assert_eq!(guide.end, 480.0); // sibling bottom
    }

    #[test]
    fn center_alignment_snaps() {
        // Sibling center_x = 140; candidate center_x = 145.
        let candidate = neutral(120.0, 200.0);
        let siblings = vec![bounds(100.0, 400.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 115.0);
        assert_eq!(outcome.guides[0].position, 140.0);
    }

    #[test]
    fn nan_candidate_falls_back_unchanged() {
        let candidate = bounds(f64::NAN, 100.0, 50.0, 50.0);
        let siblings = vec![bounds(100.0, 400.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert!(outcome.x.is_nan());
        assert_eq!(outcome.y, 100.0);
        assert!(outcome.guides.is_empty());
    }

    #[test]
    fn nan_sibling_points_are_skipped() {
        let candidate = neutral(104.0, 200.0);
        let siblings = vec![
            bounds(f64::NAN, 400.0, 80.0, 80.0),
            bounds(100.0, 500.0, 80.0, 80.0),
        ];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 100.0);
    }

    #[test]
    fn both_axes_snap_with_two_guides() {
        let candidate = neutral(104.0, 403.0);
        let siblings = vec![bounds(100.0, 400.0, 80.0, 80.0)];
        let outcome = compute_snap(&candidate, &siblings, FRAME);
        assert_eq!(outcome.x, 100.0);
        assert_eq!(outcome.y, 400.0);
        assert_eq!(outcome.guides.len(), 2);
    }
}
