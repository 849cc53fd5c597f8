//! Re-projection of stored selections into the current frame.
//!
//! Stored fractional values are never touched here; every call derives fresh
//! pixel geometry from them, so a resize only needs a new [`Frame`].

use serde::Serialize;

use crate::annotation::AnnotationList;
use crate::error::CoreError;
use crate::geometry::{self, Frame};
use crate::selection::{Selection, SelectionMode};
use crate::types::AnnotationId;

/// Axis-aligned rectangle in pixels. Points have zero extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangle as percentages of the frame, for percentage-based layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Express the rectangle relative to `frame`, in percent.
    pub fn percent_of(&self, frame: &Frame) -> Result<PercentRect, CoreError> {
        frame.validate()?;
        Ok(PercentRect {
            left: (self.x - frame.origin_x) / frame.width * 100.0,
            top: (self.y - frame.origin_y) / frame.height * 100.0,
            width: self.width / frame.width * 100.0,
            height: self.height / frame.height * 100.0,
        })
    }
}

/// One annotation laid out for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedAnnotation {
    pub id: AnnotationId,
    pub kind: SelectionMode,
    pub rect: PixelRect,
}

/// Project a single selection into `frame`.
pub fn project_selection(selection: &Selection, frame: &Frame) -> Result<PixelRect, CoreError> {
    frame.validate()?;

    let origin = geometry::to_pixel(selection.origin(), frame);
    let (width, height) = selection.extent();
    let extent = geometry::scale_extent(width, height, frame);

    Ok(PixelRect {
        x: origin.x,
        y: origin.y,
        width: extent.width,
        height: extent.height,
    })
}

/// Project every annotation in display order.
pub fn project_annotations(
    list: &AnnotationList,
    frame: &Frame,
) -> Result<Vec<ProjectedAnnotation>, CoreError> {
    frame.validate()?;

    list.iter()
        .map(|annotation| -> Result<ProjectedAnnotation, CoreError> {
            Ok(ProjectedAnnotation {
                id: annotation.id,
                kind: annotation.selection.mode(),
                rect: project_selection(&annotation.selection, frame)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn stored_box() -> Selection {
        Selection::Box {
            x: 0.2,
            y: 0.2,
            width: 0.3,
            height: 0.1,
        }
    }

    #[test]
    fn box_projects_origin_and_extent() {
        let selection = Selection::Box {
            x: 0.25,
            y: 0.5,
            width: 0.375,
            height: 0.125,
        };
        let rect = project_selection(&selection, &Frame::new(1000.0, 400.0)).unwrap();
        assert_eq!(rect.x, 250.0);
        assert_eq!(rect.y, 200.0);
        assert_eq!(rect.width, 375.0);
        assert_eq!(rect.height, 50.0);
    }

    #[test]
    fn point_projects_to_zero_extent() {
        let rect =
            project_selection(&Selection::Point { x: 0.5, y: 0.25 }, &Frame::new(200.0, 400.0))
                .unwrap();
        assert_eq!(
            rect,
            PixelRect {
                x: 100.0,
                y: 100.0,
                width: 0.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn resize_round_trip_reproduces_rect() {
        let frame_a = Frame::new(800.0, 600.0);
        let frame_b = Frame::new(1337.0, 411.0);
        let selection = stored_box();

        let first = project_selection(&selection, &frame_a).unwrap();
        let _ = project_selection(&selection, &frame_b).unwrap();
        let again = project_selection(&selection, &frame_a).unwrap();

        assert_eq!(first, again);
        assert_eq!(selection, stored_box());
    }

    #[test]
    fn degenerate_frame_rejected() {
        let result = project_selection(&stored_box(), &Frame::new(0.0, 0.0));
        assert_matches!(result, Err(CoreError::DegenerateFrame { .. }));
    }

    #[test]
    fn list_projection_keeps_order_and_ids() {
        let mut list = AnnotationList::new();
        list.commit(stored_box(), "box").unwrap();
        list.commit(Selection::Point { x: 0.5, y: 0.5 }, "point").unwrap();

        let projected = project_annotations(&list, &Frame::new(100.0, 100.0)).unwrap();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].id, 1);
        assert_eq!(projected[0].kind, SelectionMode::Box);
        assert_eq!(projected[1].id, 2);
        assert_eq!(projected[1].kind, SelectionMode::Point);
        assert_eq!(projected[1].rect.x, 50.0);
    }

    #[test]
    fn empty_list_with_degenerate_frame_still_fails() {
        let list = AnnotationList::new();
        assert!(project_annotations(&list, &Frame::new(10.0, 0.0)).is_err());
    }

    #[test]
    fn percent_rect_matches_fractions() {
        let frame = Frame::with_origin(10.0, 10.0, 400.0, 200.0);
        let rect = project_selection(
            &Selection::Box {
                x: 0.25,
                y: 0.5,
                width: 0.5,
                height: 0.25,
            },
            &frame,
        )
        .unwrap();
        let percent = rect.percent_of(&frame).unwrap();
        assert_eq!(percent.left, 25.0);
        assert_eq!(percent.top, 50.0);
        assert_eq!(percent.width, 50.0);
        assert_eq!(percent.height, 25.0);
    }
}
