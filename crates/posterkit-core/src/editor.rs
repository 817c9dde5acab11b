//! Editor facade: typed pointer/command input, document mutation, events out.
//!
//! The document owner feeds pointer and keyboard events in as method calls
//! and drains [`EditorEvent`]s back out. All transitions run synchronously
//! inside the call; between events the editor holds only the session value.

use std::collections::VecDeque;

use kurbo::{Point, Size};
use thiserror::Error;

use crate::document::{Document, DocumentError, ElementId, PositionedElement};
use crate::history::History;
use crate::interaction::{DragSession, ResizeSession, Session};
use crate::selection::Selection;
use crate::snap::{SnapGuide, compute_snap};

/// Default position for newly inserted elements.
pub const DEFAULT_INSERT_ORIGIN: Point = Point::new(40.0, 40.0);
/// Default size for newly inserted text elements.
pub const DEFAULT_TEXT_SIZE: Size = Size::new(220.0, 32.0);

/// Errors surfaced by editor commands.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A command requiring a selection was issued with none active.
    #[error("command requires an active selection")]
    InvalidSelection,
    /// The selected element does not support resizing.
    #[error("selected element is not resizable")]
    NotResizable,
    /// A second interaction session was started while one is active.
    /// The caller contract forbids this; the second start is rejected and
    /// the live session is untouched.
    #[error("an interaction session is already active")]
    ConcurrentSession,
    /// A document operation failed.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Events for the document owner, fired at well-formed transitions only and
/// never mid-gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The active selection changed.
    SelectionChanged(Option<Selection>),
    /// A drag, resize, insertion or deletion was committed. Carries the
    /// serialized document; fired exactly once per completed gesture.
    DocumentCommitted(String),
}

/// The poster editor: owns the document, the selection, the interaction
/// session and the undo history.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    selection: Option<Selection>,
    session: Session,
    history: History,
    events: VecDeque<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor over an empty default-size frame.
    pub fn new() -> Self {
        Self::with_document(Document::default())
    }

    /// Create an editor over the sample poster.
    pub fn sample() -> Self {
        Self::with_document(Document::sample())
    }

    /// Create an editor over an already attached document.
    pub fn with_document(document: Document) -> Self {
        let mut editor = Self {
            document,
            selection: None,
            session: Session::Idle,
            history: History::new(),
            events: VecDeque::new(),
        };
        match editor.document.to_serialized() {
            Ok(snapshot) => editor.history.reset(snapshot),
            Err(err) => log::warn!("could not seed history: {err}"),
        }
        editor
    }

    /// Replace the document with a parsed serialized one. Assigns stable ids
    /// to children lacking them and normalizes implicit positions, then
    /// seeds the history with the attached snapshot.
    pub fn load(&mut self, serialized: &str) -> Result<(), DocumentError> {
        let document = Document::from_serialized(serialized)?;
        self.session = Session::Idle;
        if self.selection.take().is_some() {
            self.events.push_back(EditorEvent::SelectionChanged(None));
        }
        self.document = document;
        self.history.reset(self.document.to_serialized()?);
        Ok(())
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The active selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Guides from the most recent drag move. Empty unless dragging.
    pub fn guides(&self) -> &[SnapGuide] {
        match &self.session {
            Session::Dragging(drag) => &drag.guides,
            _ => &[],
        }
    }

    /// Drain pending events for the document owner.
    pub fn drain_events(&mut self) -> impl Iterator<Item = EditorEvent> + '_ {
        self.events.drain(..)
    }

    /// Serialize the current document.
    pub fn export_serialized(&self) -> Result<String, DocumentError> {
        self.document.to_serialized()
    }

    // ---- Drag controller -------------------------------------------------

    /// Pointer-down on the frame. A hit on an element resolves the selection
    /// and starts a drag session atomically; a hit on the background clears
    /// the selection and starts nothing.
    pub fn pointer_down(&mut self, position: Point) {
        if !self.session.is_idle() {
            // Lost pointer-up (e.g. focus loss): finish the open gesture
            // before starting a new one.
            self.flush_session();
        }

        let hit = self
            .document
            .element_at(position)
            .map(|element| (Selection::of(element), element.origin()));

        match hit {
            Some((selection, baseline)) => {
                let id = selection.id.clone();
                self.set_selection(Some(selection));
                self.session = Session::Dragging(DragSession::new(id, position, baseline));
            }
            None => self.set_selection(None),
        }
    }

    /// Pointer-move while a drag session is active. Forms the candidate
    /// placement from baseline + delta, snaps it against the other elements
    /// and the frame, writes the corrected position and refreshes the guide
    /// set. No-op outside a drag.
    pub fn pointer_move(&mut self, position: Point) {
        let Session::Dragging(drag) = &mut self.session else {
            return;
        };
        let bounds = match self.document.bounds_of(&drag.id) {
            Ok(bounds) => bounds,
            Err(DocumentError::Detached(id)) => {
                // The element was removed out from under us; drop the
                // session and carry on.
                log::debug!("drag target `{id}` detached, ending session");
                self.session = Session::Idle;
                return;
            }
            Err(err) => {
                log::warn!("drag move failed: {err}");
                return;
            }
        };

        let candidate = bounds.at(drag.candidate_origin(position));
        let siblings = self.document.sibling_bounds(&drag.id);
        let outcome = compute_snap(&candidate, &siblings, self.document.frame);

        if self
            .document
            .set_position(&drag.id, Point::new(outcome.x, outcome.y))
            .is_ok()
        {
            drag.guides = outcome.guides;
        }
    }

    /// Pointer-up: clears the guides, destroys the session and commits the
    /// result once. No-op outside a drag.
    pub fn pointer_up(&mut self) {
        if matches!(self.session, Session::Dragging(_)) {
            self.session.take();
            self.commit();
        }
    }

    // ---- Resize controller -----------------------------------------------

    /// Start a resize gesture on the selected element. Requires a selection
    /// with the `resizable` capability and no other active session.
    pub fn begin_resize(&mut self) -> Result<(), EditorError> {
        if !self.session.is_idle() {
            log::warn!("begin_resize rejected: a session is already active");
            return Err(EditorError::ConcurrentSession);
        }
        let selection = self.selection.as_ref().ok_or(EditorError::InvalidSelection)?;
        if !selection.capabilities.resizable {
            return Err(EditorError::NotResizable);
        }
        let baseline = self.document.bounds_of(&selection.id)?;
        self.session = Session::Resizing(ResizeSession::new(
            selection.id.clone(),
            Size::new(baseline.width, baseline.height),
        ));
        Ok(())
    }

    /// Write new dimensions onto the element under resize. Size is not
    /// snapped; image pixel attributes stay in sync with the styled size.
    /// No-op outside a resize.
    pub fn update_resize(&mut self, width: f64, height: f64) {
        let Session::Resizing(resize) = &self.session else {
            return;
        };
        let id = resize.id.clone();
        if let Err(DocumentError::Detached(id)) =
            self.document.set_size(&id, Size::new(width, height))
        {
            log::debug!("resize target `{id}` detached, ending session");
            self.session = Session::Idle;
        }
    }

    /// End the resize gesture and commit exactly once. No-op outside a
    /// resize.
    pub fn end_resize(&mut self) {
        if matches!(self.session, Session::Resizing(_)) {
            self.session.take();
            self.commit();
        }
    }

    // ---- Selection and commands ------------------------------------------

    /// Delete the selected element, clear the selection and commit once.
    /// Silent no-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        let Some(selection) = self.selection.take() else {
            log::debug!("delete ignored: no active selection");
            return;
        };
        if self.session.target() == Some(&selection.id) {
            self.session = Session::Idle;
        }
        self.document.remove(&selection.id);
        self.events.push_back(EditorEvent::SelectionChanged(None));
        self.commit();
    }

    /// `Delete` key handling: equivalent to [`Self::delete_selected`] when a
    /// selection is active.
    pub fn key_delete(&mut self) {
        if self.selection.is_some() {
            self.delete_selected();
        }
    }

    /// Insert a text element at the default position and commit.
    /// Returns the new element's id.
    pub fn add_text(&mut self, content: impl Into<String>) -> ElementId {
        let element =
            PositionedElement::text(content, DEFAULT_INSERT_ORIGIN, DEFAULT_TEXT_SIZE);
        let id = self.document.push(element);
        self.commit();
        id
    }

    /// Insert an image element at the default position and commit.
    /// Returns the new element's id.
    pub fn add_image(&mut self, source: impl Into<String>, size: Size) -> ElementId {
        let element = PositionedElement::image(source, DEFAULT_INSERT_ORIGIN, size);
        let id = self.document.push(element);
        self.commit();
        id
    }

    // ---- History ---------------------------------------------------------

    /// Step the history back and apply the snapshot. Ignored while a
    /// gesture is active. Returns the serialization that was applied.
    pub fn undo(&mut self) -> Option<String> {
        if !self.session.is_idle() {
            return None;
        }
        let snapshot = self.history.undo()?.to_string();
        self.apply_snapshot(&snapshot);
        Some(snapshot)
    }

    /// Step the history forward and apply the snapshot. Ignored while a
    /// gesture is active. Returns the serialization that was applied.
    pub fn redo(&mut self) -> Option<String> {
        if !self.session.is_idle() {
            return None;
        }
        let snapshot = self.history.redo()?.to_string();
        self.apply_snapshot(&snapshot);
        Some(snapshot)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Safety net for lost terminal events (window blur, visibility loss):
    /// force-commit any open session so the mutated document never diverges
    /// from the committed history.
    pub fn flush_session(&mut self) {
        if !self.session.is_idle() {
            self.session.take();
            self.commit();
        }
    }

    // ---- Internals -------------------------------------------------------

    fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.events
            .push_back(EditorEvent::SelectionChanged(self.selection.clone()));
    }

    /// Finalize the current document state into the history. A snapshot
    /// byte-identical to the history head is a no-op so a gesture with no
    /// net change does not pollute the undo stack.
    fn commit(&mut self) {
        let serialized = match self.document.to_serialized() {
            Ok(serialized) => serialized,
            Err(err) => {
                log::warn!("commit skipped: {err}");
                return;
            }
        };
        if self.history.current() == Some(serialized.as_str()) {
            log::debug!("commit is a no-op, history unchanged");
            return;
        }
        self.history.push(serialized.clone());
        self.events
            .push_back(EditorEvent::DocumentCommitted(serialized));
    }

    /// Apply a restored snapshot to the document, dropping a selection whose
    /// element no longer exists. Snapshots come from our own serializer, so
    /// a parse failure indicates a bug; it is logged and the document is
    /// left untouched.
    fn apply_snapshot(&mut self, snapshot: &str) {
        match Document::from_serialized(snapshot) {
            Ok(document) => {
                self.document = document;
                let stale = self
                    .selection
                    .as_ref()
                    .is_some_and(|s| self.document.element(&s.id).is_none());
                if stale {
                    self.set_selection(None);
                }
            }
            Err(err) => log::error!("history snapshot failed to parse: {err}"),
        }
    }
}
