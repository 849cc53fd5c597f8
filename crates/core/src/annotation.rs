//! Committed annotations: a selection paired with a comment.
//!
//! Insertion order is display order. Ids come from a counter that only moves
//! forward, so removing an entry never frees its id for reuse.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::selection::Selection;
use crate::types::AnnotationId;

/// A finalized selection with its comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub selection: Selection,
    pub comment: String,
}

/// Ordered list of annotations with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationList {
    entries: Vec<Annotation>,
    next_id: AnnotationId,
}

impl Default for AnnotationList {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed a list from previously stored annotations.
    ///
    /// Rejects duplicate ids and empty comments. New ids continue after the
    /// largest seeded id.
    pub fn from_annotations(entries: Vec<Annotation>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CoreError::Validation(format!(
                    "duplicate annotation id {}",
                    entry.id
                )));
            }
            if entry.comment.is_empty() {
                return Err(CoreError::Validation(format!(
                    "annotation {} has an empty comment",
                    entry.id
                )));
            }
        }

        let next_id = match entries.iter().map(|a| a.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                CoreError::Validation(format!(
                    "annotation id {max} leaves no room for new ids"
                ))
            })?,
            None => 1,
        };
        Ok(Self { entries, next_id })
    }

    /// Append an annotation with a fresh id.
    ///
    /// An empty comment means the user declined; nothing is stored and
    /// `Ok(None)` is returned. Fails once the id space is exhausted.
    pub fn commit(
        &mut self,
        selection: Selection,
        comment: impl Into<String>,
    ) -> Result<Option<AnnotationId>, CoreError> {
        let comment = comment.into();
        if comment.is_empty() {
            tracing::debug!(?selection, "Empty comment, selection discarded");
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| {
            CoreError::Validation("annotation ids exhausted".to_string())
        })?;
        self.entries.push(Annotation {
            id,
            selection,
            comment,
        });
        tracing::info!(id, kind = selection.mode().as_str(), "Annotation added");
        Ok(Some(id))
    }

    /// Remove the annotation with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.entries.iter().position(|a| a.id == id)?;
        let removed = self.entries.remove(index);
        tracing::info!(id, "Annotation removed");
        Some(removed)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id the next committed annotation will receive.
    pub fn next_id(&self) -> AnnotationId {
        self.next_id
    }

    /// The whole list as pretty-printed JSON, in display order.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CoreError::Validation(format!("annotation list is not serializable: {e}")))
    }
}

impl<'a> IntoIterator for &'a AnnotationList {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
