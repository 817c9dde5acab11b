//! Selection state and capability classification.

use serde::{Deserialize, Serialize};

use crate::document::{ElementId, ElementKind, PositionedElement};

/// What the active element can do, derived from its tag classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Dimensions can be changed via resize handles (images).
    pub resizable: bool,
    /// Content can be edited as text.
    pub text_editable: bool,
}

impl Capabilities {
    /// Classify an element kind.
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Generic => Self::default(),
            ElementKind::Text => Self {
                resizable: false,
                text_editable: true,
            },
            ElementKind::Image => Self {
                resizable: true,
                text_editable: false,
            },
        }
    }
}

/// The currently active element. At most one exists at a time; `None` at the
/// editor level denotes no selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Id of the selected element. Invariant: the id refers to an element
    /// attached to the current document snapshot.
    pub id: ElementId,
    /// Capability flags resolved at selection time.
    pub capabilities: Capabilities,
}

impl Selection {
    /// Build a selection for an attached element.
    pub fn of(element: &PositionedElement) -> Self {
        Self {
            id: element.id.clone(),
            capabilities: Capabilities::for_kind(element.kind),
        }
    }
}
