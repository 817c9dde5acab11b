//! Transient per-gesture interaction sessions.
//!
//! A session is created on pointer-down (drag) or `begin_resize` and
//! destroyed by the terminal event of the gesture. Exactly one controller
//! may hold a session at a time; the editor rejects a second start.

use kurbo::{Point, Size};

use crate::document::ElementId;
use crate::snap::SnapGuide;

/// State of a free-form reposition gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Target element.
    pub id: ElementId,
    /// Pointer position at pointer-down.
    pub origin: Point,
    /// Element position before the drag started.
    pub baseline: Point,
    /// Guides computed by the most recent move. Cleared on release.
    pub guides: Vec<SnapGuide>,
}

impl DragSession {
    /// Start a drag on `id` with the element's pre-drag position.
    pub fn new(id: ElementId, origin: Point, baseline: Point) -> Self {
        Self {
            id,
            origin,
            baseline,
            guides: Vec::new(),
        }
    }

    /// Candidate position for the current pointer location.
    pub fn candidate_origin(&self, pointer: Point) -> Point {
        Point::new(
            self.baseline.x + (pointer.x - self.origin.x),
            self.baseline.y + (pointer.y - self.origin.y),
        )
    }
}

/// State of a handle-driven resize gesture.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    /// Target element.
    pub id: ElementId,
    /// Element size before the resize started.
    pub baseline: Size,
}

impl ResizeSession {
    /// Start a resize on `id` with the element's pre-resize size.
    pub fn new(id: ElementId, baseline: Size) -> Self {
        Self { id, baseline }
    }
}

/// Which controller, if any, currently owns the interaction.
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// No active gesture.
    #[default]
    Idle,
    /// The drag controller owns the session.
    Dragging(DragSession),
    /// The resize controller owns the session.
    Resizing(ResizeSession),
}

impl Session {
    /// Check if no gesture is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    /// Id of the element the active session targets, if any.
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Session::Idle => None,
            Session::Dragging(drag) => Some(&drag.id),
            Session::Resizing(resize) => Some(&resize.id),
        }
    }

    /// End the session, returning the previous state.
    pub fn take(&mut self) -> Session {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_tracks_pointer_delta() {
        let drag = DragSession::new(
            "el-0".into(),
            Point::new(100.0, 100.0),
            Point::new(40.0, 80.0),
        );
        let candidate = drag.candidate_origin(Point::new(110.0, 95.0));
        assert_eq!(candidate, Point::new(50.0, 75.0));
    }

    #[test]
    fn take_leaves_idle() {
        let mut session = Session::Dragging(DragSession::new(
            "el-0".into(),
            Point::ZERO,
            Point::ZERO,
        ));
        assert_eq!(session.target().map(String::as_str), Some("el-0"));
        let taken = session.take();
        assert!(matches!(taken, Session::Dragging(_)));
        assert!(session.is_idle());
    }
}
