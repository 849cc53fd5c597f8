//! Pointer-to-annotation workflow.
//!
//! A finalized selection does not become an annotation straight away: it is
//! parked as a [`PendingComment`] and the host collects comment text however
//! it likes, then calls [`AnnotationSession::resolve`] with the outcome.

use serde::Serialize;

use crate::annotation::{Annotation, AnnotationList};
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::geometry::{Frame, PixelPoint};
use crate::projection::{self, PixelRect, ProjectedAnnotation};
use crate::selection::{DragState, Selection, SelectionEngine, SelectionMode};
use crate::types::{AnnotationId, TicketId};

/// Outcome of asking the user for a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentResponse {
    Commit(String),
    Discard,
}

/// A finalized selection waiting for its comment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingComment {
    pub ticket: TicketId,
    pub selection: Selection,
}

/// Selection engine, committed annotations and outstanding comment requests.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    engine: SelectionEngine,
    annotations: AnnotationList,
    pending: Vec<PendingComment>,
    next_ticket: TicketId,
}

impl AnnotationSession {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_annotations(config, AnnotationList::new())
    }

    /// Start from an already populated list.
    pub fn with_annotations(config: EngineConfig, annotations: AnnotationList) -> Self {
        Self {
            engine: SelectionEngine::new(config),
            annotations,
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn annotations(&self) -> &AnnotationList {
        &self.annotations
    }

    /// Outstanding comment requests, oldest first.
    pub fn pending(&self) -> &[PendingComment] {
        &self.pending
    }

    pub fn oldest_pending(&self) -> Option<&PendingComment> {
        self.pending.first()
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.engine.set_mode(mode);
    }

    fn enqueue(&mut self, selection: Selection) -> PendingComment {
        let pending = PendingComment {
            ticket: self.next_ticket,
            selection,
        };
        self.next_ticket += 1;
        self.pending.push(pending);
        tracing::debug!(ticket = pending.ticket, "Selection awaiting comment");
        pending
    }

    pub fn pointer_down(
        &mut self,
        point: PixelPoint,
        frame: &Frame,
    ) -> Result<Option<PendingComment>, CoreError> {
        let selection = self.engine.on_pointer_down(point, frame)?;
        Ok(selection.map(|s| self.enqueue(s)))
    }

    pub fn pointer_move(
        &mut self,
        point: PixelPoint,
        frame: &Frame,
    ) -> Result<Option<DragState>, CoreError> {
        self.engine.on_pointer_move(point, frame)
    }

    pub fn pointer_up(&mut self, point: PixelPoint, frame: &Frame) -> Option<PendingComment> {
        let selection = self.engine.on_pointer_up(point, frame)?;
        Some(self.enqueue(selection))
    }

    /// Settle a pending comment request.
    ///
    /// Committing non-empty text appends an annotation and returns its id.
    /// Discarding, or committing an empty string, drops the selection.
    pub fn resolve(
        &mut self,
        ticket: TicketId,
        response: CommentResponse,
    ) -> Result<Option<AnnotationId>, CoreError> {
        let index = self
            .pending
            .iter()
            .position(|p| p.ticket == ticket)
            .ok_or(CoreError::TicketNotFound { ticket })?;
        let pending = self.pending.remove(index);

        match response {
            CommentResponse::Commit(text) => self.annotations.commit(pending.selection, text),
            CommentResponse::Discard => {
                tracing::debug!(ticket, "Comment request discarded");
                Ok(None)
            }
        }
    }

    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.remove(id)
    }

    /// Pixel layout of every annotation for `frame`.
    pub fn render(&self, frame: &Frame) -> Result<Vec<ProjectedAnnotation>, CoreError> {
        projection::project_annotations(&self.annotations, frame)
    }

    /// Re-layout after the image changed size.
    ///
    /// A degenerate frame (image not loaded yet) is skipped and `None`
    /// returned; the host retries on its next measurement.
    pub fn on_resize(&self, frame: &Frame) -> Option<Vec<ProjectedAnnotation>> {
        match self.render(frame) {
            Ok(layout) => Some(layout),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping re-projection");
                None
            }
        }
    }

    /// Pixel rectangle of the drag in progress, if any.
    pub fn drag_preview(&self, frame: &Frame) -> Option<Result<PixelRect, CoreError>> {
        self.engine
            .drag()
            .map(|drag| projection::project_selection(&drag.rect(), frame))
    }
}
