//! Insertion cursor
//!
//! The cursor holds the only mutable borrow of the target document for the duration of an
//! assembly run. It tracks the index of the section properties marker and inserts every node
//! directly in front of it, so the marker index grows by one per insertion and the marker never
//! moves relative to the template content that follows it.

use super::nodes::{BodyNode, Document};
use crate::error::AssemblyError;

#[derive(Debug)]
pub struct InsertionCursor<'doc> {
    doc: &'doc mut Document,
    marker: usize,
    inserted: usize,
}

impl<'doc> InsertionCursor<'doc> {
    /// Locate the marker. Fails unless the document holds exactly one.
    pub fn new(doc: &'doc mut Document) -> Result<Self, AssemblyError> {
        let found = doc.marker_count();
        if found != 1 {
            return Err(AssemblyError::StructuralPrecondition { found });
        }
        let marker = doc
            .marker_index()
            .ok_or(AssemblyError::StructuralPrecondition { found })?;
        Ok(Self {
            doc,
            marker,
            inserted: 0,
        })
    }

    /// Insert a node immediately before the marker and advance past it.
    pub fn insert(&mut self, node: BodyNode) {
        debug_assert!(
            !node.is_marker(),
            "a second section properties node would break the body"
        );
        self.doc.nodes.insert(self.marker, node);
        self.marker += 1;
        self.inserted += 1;
    }

    /// Current index of the marker.
    pub fn marker_index(&self) -> usize {
        self.marker
    }

    /// Number of nodes inserted through this cursor.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn document(&self) -> &Document {
        self.doc
    }
}
