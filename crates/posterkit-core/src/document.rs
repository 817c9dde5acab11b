//! Poster document: the owned tree of positioned elements.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Bounds;

/// Stable element identifier, unique within a document.
pub type ElementId = String;

/// Default poster frame size in pixels.
pub const DEFAULT_FRAME_SIZE: f64 = 720.0;

/// Errors raised by document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Geometry or mutation was requested for an element that is not
    /// attached to the frame (e.g. it was deleted).
    #[error("element `{0}` is not attached to the frame")]
    Detached(ElementId),
    /// The serialized document could not be parsed.
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tag classification of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A generic block element.
    #[default]
    Generic,
    /// A text element (headings, paragraphs, labels).
    Text,
    /// An image element.
    Image,
}

/// An absolutely positioned element inside the poster frame.
///
/// All coordinates are in pixels relative to the frame's content origin.
/// `left`/`top` may be absent in serialized input for elements that were
/// never explicitly positioned; [`Document::attach`] normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedElement {
    /// Stable id, assigned at attach time when missing.
    #[serde(default)]
    pub id: ElementId,
    /// Tag classification.
    #[serde(default)]
    pub kind: ElementKind,
    /// Left offset in px. `None` only before attach.
    #[serde(default)]
    pub left: Option<f64>,
    /// Top offset in px. `None` only before attach.
    #[serde(default)]
    pub top: Option<f64>,
    /// Styled width in px.
    pub width: f64,
    /// Styled height in px.
    pub height: f64,
    /// Text body for text elements, image source for images.
    #[serde(default)]
    pub content: String,
    /// Intrinsic pixel width attribute (images only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_width: Option<u32>,
    /// Intrinsic pixel height attribute (images only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_height: Option<u32>,
}

impl PositionedElement {
    /// Create a text element.
    pub fn text(content: impl Into<String>, origin: Point, size: Size) -> Self {
        Self {
            id: ElementId::new(),
            kind: ElementKind::Text,
            left: Some(origin.x),
            top: Some(origin.y),
            width: size.width,
            height: size.height,
            content: content.into(),
            pixel_width: None,
            pixel_height: None,
        }
    }

    /// Create an image element with its intrinsic attributes in sync.
    pub fn image(source: impl Into<String>, origin: Point, size: Size) -> Self {
        Self {
            id: ElementId::new(),
            kind: ElementKind::Image,
            left: Some(origin.x),
            top: Some(origin.y),
            width: size.width,
            height: size.height,
            content: source.into(),
            pixel_width: Some(size.width.round() as u32),
            pixel_height: Some(size.height.round() as u32),
        }
    }

    /// The element's position, relative to the frame origin.
    ///
    /// Elements that were attached without explicit coordinates are anchored
    /// at the origin, so this is total after attach.
    pub fn origin(&self) -> Point {
        Point::new(self.left.unwrap_or(0.0), self.top.unwrap_or(0.0))
    }

    /// The element's styled size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding box of this element.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.origin(), self.size())
    }
}

/// A poster document: a fixed-size frame plus its direct children, kept in
/// insertion order (which is also the paint order, back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Frame size in px.
    pub frame: Size,
    /// Direct children of the frame.
    pub elements: Vec<PositionedElement>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Size::new(DEFAULT_FRAME_SIZE, DEFAULT_FRAME_SIZE))
    }
}

impl Document {
    /// Create an empty document with the given frame size.
    pub fn new(frame: Size) -> Self {
        Self {
            frame,
            elements: Vec::new(),
        }
    }

    /// The sample poster shipped with the editor.
    pub fn sample() -> Self {
        let mut doc = Self::default();
        doc.push(PositionedElement::text(
            "Summer Sale",
            Point::new(40.0, 80.0),
            Size::new(320.0, 58.0),
        ));
        doc.push(PositionedElement::text(
            "Up to 50% off on select items!",
            Point::new(40.0, 160.0),
            Size::new(280.0, 28.0),
        ));
        doc.push(PositionedElement::image(
            "https://images.unsplash.com/photo-1520975922284-7bcd4290b0e1",
            Point::new(340.0, 340.0),
            Size::new(380.0, 380.0),
        ));
        doc.attach();
        doc
    }

    /// Parse a serialized document and attach it: assign stable ids to
    /// children lacking one and promote implicit positions to explicit
    /// absolute coordinates. Id generation is deterministic and order-based
    /// (`el-<index>`), skipping children that already carry an id.
    pub fn from_serialized(serialized: &str) -> Result<Self, DocumentError> {
        let mut doc: Self = serde_json::from_str(serialized)?;
        doc.attach();
        Ok(doc)
    }

    /// Serialize the document.
    pub fn to_serialized(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Normalize the document after parsing. Idempotent.
    pub fn attach(&mut self) {
        for index in 0..self.elements.len() {
            if self.elements[index].id.is_empty() {
                let id = self.free_id(index);
                self.elements[index].id = id;
            }
            let element = &mut self.elements[index];
            // One-time migration: anchor unpositioned elements at their
            // current offsets so later edits are position-deterministic.
            element.left = Some(element.left.unwrap_or(0.0));
            element.top = Some(element.top.unwrap_or(0.0));
        }
    }

    /// First `el-<n>` id starting at `index` not taken by another element.
    fn free_id(&self, index: usize) -> ElementId {
        let mut n = index;
        loop {
            let candidate = format!("el-{n}");
            if !self.elements.iter().any(|e| e.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Look up an element by id.
    pub fn element(&self, id: &str) -> Option<&PositionedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Look up an element by id, mutably.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut PositionedElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Bounding box of an attached element.
    ///
    /// This is the geometry entry point used by the interaction controllers:
    /// it reads the normalized (rendered) rect, and fails only when the
    /// element is no longer attached.
    pub fn bounds_of(&self, id: &str) -> Result<Bounds, DocumentError> {
        self.element(id)
            .map(PositionedElement::bounds)
            .ok_or_else(|| DocumentError::Detached(id.to_string()))
    }

    /// Topmost element under a point, if any. Later children paint on top.
    pub fn element_at(&self, point: Point) -> Option<&PositionedElement> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.bounds().contains(point))
    }

    /// Bounding boxes of every identified element other than `exclude`, in
    /// insertion order. This is the sibling set fed to the snapping engine.
    pub fn sibling_bounds(&self, exclude: &str) -> Vec<Bounds> {
        self.elements
            .iter()
            .filter(|e| e.id != exclude && !e.id.is_empty())
            .map(PositionedElement::bounds)
            .collect()
    }

    /// Move an element to an absolute position.
    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), DocumentError> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| DocumentError::Detached(id.to_string()))?;
        element.left = Some(position.x);
        element.top = Some(position.y);
        Ok(())
    }

    /// Resize an element, keeping image pixel attributes in sync with the
    /// styled size so serialized output stays self-consistent.
    pub fn set_size(&mut self, id: &str, size: Size) -> Result<(), DocumentError> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| DocumentError::Detached(id.to_string()))?;
        element.width = size.width;
        element.height = size.height;
        if element.kind == ElementKind::Image {
            element.pixel_width = Some(size.width.round() as u32);
            element.pixel_height = Some(size.height.round() as u32);
        }
        Ok(())
    }

    /// Append an element, assigning an id if it has none.
    /// Returns the id of the inserted element.
    pub fn push(&mut self, mut element: PositionedElement) -> ElementId {
        if element.id.is_empty() {
            element.id = self.free_id(self.elements.len());
        }
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element from the document.
    pub fn remove(&mut self, id: &str) -> Option<PositionedElement> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
