//! Point/box selection state machine.
//!
//! ```text
//! Idle --down (box)--> Dragging --move--> Dragging --up--> Idle  (emits Box)
//! Idle --down (point)--> Idle                                    (emits Point)
//! Dragging --mode change--> Idle                                 (emits nothing)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::geometry::{self, Frame, FractionalPoint, PixelPoint};

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// What a pointer-down creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Point,
    Box,
}

/// All valid selection mode strings.
const VALID_MODE_STRINGS: &[&str] = &["point", "box"];

impl SelectionMode {
    /// Return the mode as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Box => "box",
        }
    }

    /// Parse a mode from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "point" => Ok(Self::Point),
            "box" => Ok(Self::Box),
            _ => Err(CoreError::Validation(format!(
                "Invalid selection mode '{s}'. Must be one of: {}",
                VALID_MODE_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// A marked region in fractional image coordinates.
///
/// Boxes are stored by their top-left corner and a non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    Point {
        x: f64,
        y: f64,
    },
    Box {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Selection {
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Point { .. } => SelectionMode::Point,
            Self::Box { .. } => SelectionMode::Box,
        }
    }

    /// Top-left corner (or the point itself).
    pub fn origin(&self) -> FractionalPoint {
        match *self {
            Self::Point { x, y } | Self::Box { x, y, .. } => FractionalPoint { x, y },
        }
    }

    /// Fractional extent; zero for points.
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Self::Point { .. } => (0.0, 0.0),
            Self::Box { width, height, .. } => (width, height),
        }
    }

    /// `true` for boxes with no width or no height.
    pub fn is_degenerate_box(&self) -> bool {
        matches!(*self, Self::Box { width, height, .. } if width == 0.0 || height == 0.0)
    }
}

// ---------------------------------------------------------------------------
// Drag tracking
// ---------------------------------------------------------------------------

/// Side of the anchor the pointer is on, horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    Left,
    Right,
}

/// Side of the anchor the pointer is on, vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalDirection {
    Up,
    Down,
}

/// An in-progress box drag.
///
/// `anchor` is where the pointer went down. The directions are recomputed on
/// every move, so a drag that crosses back over its anchor flips sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub anchor: FractionalPoint,
    pub direction_x: HorizontalDirection,
    pub direction_y: VerticalDirection,
    pub width: f64,
    pub height: f64,
}

impl DragState {
    fn start(anchor: FractionalPoint) -> Self {
        Self {
            anchor,
            direction_x: HorizontalDirection::Right,
            direction_y: VerticalDirection::Down,
            width: 0.0,
            height: 0.0,
        }
    }

    fn track(&mut self, current: FractionalPoint) {
        self.direction_x = if current.x < self.anchor.x {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::Right
        };
        self.direction_y = if current.y < self.anchor.y {
            VerticalDirection::Up
        } else {
            VerticalDirection::Down
        };
        self.width = (current.x - self.anchor.x).abs();
        self.height = (current.y - self.anchor.y).abs();
    }

    /// The drag as a canonical top-left box, for live previews and finalizing.
    pub fn rect(&self) -> Selection {
        let x = match self.direction_x {
            HorizontalDirection::Left => self.anchor.x - self.width,
            HorizontalDirection::Right => self.anchor.x,
        };
        let y = match self.direction_y {
            VerticalDirection::Up => self.anchor.y - self.height,
            VerticalDirection::Down => self.anchor.y,
        };
        Selection::Box {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Turns pointer events into [`Selection`]s.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    config: EngineConfig,
    mode: SelectionMode,
    drag: Option<DragState>,
}

impl SelectionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            mode: config.initial_mode,
            drag: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Switch modes. Changing mode mid-drag abandons the drag.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode != self.mode && self.drag.take().is_some() {
            tracing::warn!(
                from = self.mode.as_str(),
                to = mode.as_str(),
                "Mode changed mid-drag, drag abandoned"
            );
        }
        self.mode = mode;
    }

    /// Drop the active drag without emitting anything. Returns whether a
    /// drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.take().is_some();
        if cancelled {
            tracing::debug!("Drag cancelled");
        }
        cancelled
    }

    fn capture(&self, point: PixelPoint, frame: &Frame) -> Result<FractionalPoint, CoreError> {
        let p = geometry::to_fractional(point, frame)?;
        Ok(if self.config.clamp_coordinates {
            p.clamped()
        } else {
            p
        })
    }

    /// Point mode: returns the point selection right away.
    /// Box mode: starts a drag anchored at the pointer and returns `None`.
    pub fn on_pointer_down(
        &mut self,
        point: PixelPoint,
        frame: &Frame,
    ) -> Result<Option<Selection>, CoreError> {
        let p = self.capture(point, frame)?;
        match self.mode {
            SelectionMode::Point => {
                tracing::debug!(x = p.x, y = p.y, "Point selected");
                Ok(Some(Selection::Point { x: p.x, y: p.y }))
            }
            SelectionMode::Box => {
                tracing::debug!(x = p.x, y = p.y, "Box drag started");
                self.drag = Some(DragState::start(p));
                Ok(None)
            }
        }
    }

    /// Update the active drag and return it as a live preview.
    ///
    /// Does nothing outside box mode or when no drag is active.
    pub fn on_pointer_move(
        &mut self,
        point: PixelPoint,
        frame: &Frame,
    ) -> Result<Option<DragState>, CoreError> {
        if self.mode != SelectionMode::Box || self.drag.is_none() {
            return Ok(None);
        }
        let current = self.capture(point, frame)?;
        Ok(self.drag.as_mut().map(|drag| {
            drag.track(current);
            *drag
        }))
    }

    /// Finalize the active drag into a box selection.
    ///
    /// The box is built from the drag as of the last move; the release
    /// position itself does not change it. Returns `None` when no drag is
    /// active, or when the box has no area and
    /// [`EngineConfig::discard_degenerate_boxes`] is set.
    pub fn on_pointer_up(&mut self, _point: PixelPoint, _frame: &Frame) -> Option<Selection> {
        let drag = self.drag.take()?;

        let selection = drag.rect();
        if selection.is_degenerate_box() && self.config.discard_degenerate_boxes {
            tracing::debug!("Zero-extent box discarded");
            return None;
        }

        tracing::debug!(?selection, "Box drag finalized");
        Some(selection)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
