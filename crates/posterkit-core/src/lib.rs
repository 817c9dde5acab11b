//! PosterKit Core Library
//!
//! Direct-manipulation interaction engine for the PosterKit poster editor:
//! the drag/resize state machines, the alignment snapping that feeds live
//! guides, and the linear undo/redo history over document snapshots. Page
//! chrome, file dialogs and rendering live in the host; they talk to this
//! crate through [`Editor`].

pub mod document;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod selection;
pub mod snap;

pub use document::{Document, DocumentError, ElementId, ElementKind, PositionedElement};
pub use editor::{Editor, EditorError, EditorEvent};
pub use geometry::Bounds;
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use interaction::{DragSession, ResizeSession, Session};
pub use selection::{Capabilities, Selection};
pub use snap::{GuideOrientation, SNAP_TOLERANCE, SnapGuide, SnapOutcome, compute_snap};
