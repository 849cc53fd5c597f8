//! Headless driver for the annotation engine.
//!
//! Plays a recorded event script (pointer input, resizes, comment answers)
//! through an [`AnnotationSession`] and reports the resulting annotations and
//! their layout in the final frame.

use std::path::Path;

use annotator_core::projection::ProjectedAnnotation;
use annotator_core::types::{AnnotationId, TicketId};
use annotator_core::{
    Annotation, AnnotationList, AnnotationSession, CommentResponse, CoreError, EngineConfig,
    Frame, PendingComment, PixelPoint, SelectionMode,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Event {index}: no selection is waiting for a comment")]
    NoPendingComment { index: usize },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Script format
// ---------------------------------------------------------------------------

/// A recorded interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Frame in effect until the first `resize` event.
    pub frame: Frame,
    /// Overrides the configuration supplied by the caller.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// Annotations that already exist when the replay starts.
    #[serde(default)]
    pub seed: Vec<Annotation>,
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Mode { mode: SelectionMode },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Resize(Frame),
    /// Answer the oldest pending selection with this text.
    Comment { text: String },
    /// Dismiss the oldest pending selection.
    Cancel,
    Remove { id: AnnotationId },
    /// Snapshot the list as JSON, like the "log comments" action.
    Log,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub annotations: Vec<Annotation>,
    /// Layout in the final frame; empty if that frame was degenerate.
    pub layout: Vec<ProjectedAnnotation>,
    /// Selections still waiting for a comment when the script ended.
    pub pending: Vec<PendingComment>,
    /// One JSON dump per `log` event.
    pub logs: Vec<String>,
    /// Pointer events dropped because the frame was degenerate.
    pub skipped_events: usize,
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Script, ReplayError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Play `script` from start to end.
///
/// `default_config` applies unless the script carries its own.
pub fn run_script(script: Script, default_config: EngineConfig) -> Result<ReplayOutcome, ReplayError> {
    let config = script.config.unwrap_or(default_config);
    let seeded = AnnotationList::from_annotations(script.seed)?;
    let mut session = AnnotationSession::with_annotations(config, seeded);

    let mut frame = script.frame;
    let mut logs = Vec::new();
    let mut skipped_events = 0;

    for (index, event) in script.events.into_iter().enumerate() {
        tracing::debug!(index, ?event, "Replaying event");
        match event {
            ReplayEvent::Mode { mode } => session.set_mode(mode),
            ReplayEvent::Down { x, y } => {
                let outcome = session.pointer_down(PixelPoint::new(x, y), &frame);
                skipped_events += skip_degenerate(index, outcome)?;
            }
            ReplayEvent::Move { x, y } => {
                let outcome = session.pointer_move(PixelPoint::new(x, y), &frame);
                skipped_events += skip_degenerate(index, outcome)?;
            }
            ReplayEvent::Up { x, y } => {
                session.pointer_up(PixelPoint::new(x, y), &frame);
            }
            ReplayEvent::Resize(next) => {
                frame = next;
                if let Some(layout) = session.on_resize(&frame) {
                    tracing::debug!(count = layout.len(), "Re-projected annotations");
                }
            }
            ReplayEvent::Comment { text } => {
                let ticket = oldest_ticket(&session, index)?;
                session.resolve(ticket, CommentResponse::Commit(text))?;
            }
            ReplayEvent::Cancel => {
                let ticket = oldest_ticket(&session, index)?;
                session.resolve(ticket, CommentResponse::Discard)?;
            }
            ReplayEvent::Remove { id } => {
                if session.remove(id).is_none() {
                    tracing::debug!(id, "Remove of unknown annotation ignored");
                }
            }
            ReplayEvent::Log => {
                let dump = session.annotations().to_json_pretty()?;
                tracing::info!(count = session.annotations().len(), "Annotation list logged");
                logs.push(dump);
            }
        }
    }

    Ok(ReplayOutcome {
        annotations: session.annotations().as_slice().to_vec(),
        layout: session.on_resize(&frame).unwrap_or_default(),
        pending: session.pending().to_vec(),
        logs,
        skipped_events,
    })
}

fn oldest_ticket(session: &AnnotationSession, index: usize) -> Result<TicketId, ReplayError> {
    session
        .oldest_pending()
        .map(|p| p.ticket)
        .ok_or(ReplayError::NoPendingComment { index })
}

/// Degenerate frames drop the event; anything else aborts the replay.
fn skip_degenerate<T>(index: usize, outcome: Result<T, CoreError>) -> Result<usize, ReplayError> {
    match outcome {
        Ok(_) => Ok(0),
        Err(err @ CoreError::DegenerateFrame { .. }) => {
            tracing::warn!(index, error = %err, "Pointer event skipped");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}
