//! Normalized annotation coordinate engine.
//!
//! Converts pointer events on a rendered image into resolution-independent
//! fractional coordinates, tracks box drags in any direction, and projects
//! stored annotations back into pixel space whenever the image is re-laid out.
//!
//! - [`geometry`] — pixel/fractional conversions for a [`geometry::Frame`].
//! - [`selection`] — the point/box [`selection::SelectionEngine`].
//! - [`annotation`] — the ordered [`annotation::AnnotationList`].
//! - [`projection`] — re-projection of stored selections for display.
//! - [`session`] — ties the above together around pending comments.

pub mod annotation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod selection;
pub mod session;
pub mod types;

pub use annotation::{Annotation, AnnotationList};
pub use config::EngineConfig;
pub use error::CoreError;
pub use geometry::{Frame, FractionalPoint, PixelPoint};
pub use selection::{Selection, SelectionEngine, SelectionMode};
pub use session::{AnnotationSession, CommentResponse, PendingComment};
