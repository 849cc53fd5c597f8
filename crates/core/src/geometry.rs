//! Pixel <-> fractional coordinate conversion.
//!
//! A fractional coordinate expresses a position as a share of the rendered
//! image's width and height, so it stays valid at every display size. Pixel
//! coordinates are only meaningful together with the [`Frame`] they were
//! measured against.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Current rendered size (and viewport offset) of the reference image.
///
/// Frames are ephemeral: the host measures one on every pointer and resize
/// event and never stores it alongside annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    /// Left edge of the image in the pointer's coordinate space.
    #[serde(default)]
    pub origin_x: f64,
    /// Top edge of the image in the pointer's coordinate space.
    #[serde(default)]
    pub origin_y: f64,
}

/// A position in pointer-device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// A position expressed as fractions of the frame's width and height.
///
/// Values inside the image fall in `[0, 1]`; pointer events just outside the
/// image edge produce values slightly outside that range and are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalPoint {
    pub x: f64,
    pub y: f64,
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelExtent {
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

impl Frame {
    /// A frame anchored at the pointer space origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    /// A frame whose top-left corner sits at `(origin_x, origin_y)`.
    pub fn with_origin(origin_x: f64, origin_y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            origin_x,
            origin_y,
        }
    }

    /// Reject frames that cannot be divided by.
    ///
    /// A zero-size frame shows up before the image has loaded; callers skip
    /// the event and wait for the next measurement.
    pub fn validate(&self) -> Result<(), CoreError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(CoreError::DegenerateFrame {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl FractionalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pin both components into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Map a pixel position to fractions of `frame`.
///
/// The result is not clamped. Fails with [`CoreError::DegenerateFrame`] when
/// the frame has no positive area and with [`CoreError::Validation`] when the
/// pointer position is not a finite number.
pub fn to_fractional(point: PixelPoint, frame: &Frame) -> Result<FractionalPoint, CoreError> {
    frame.validate()?;
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(CoreError::Validation(format!(
            "pointer position must be finite, got ({}, {})",
            point.x, point.y
        )));
    }

    Ok(FractionalPoint {
        x: (point.x - frame.origin_x) / frame.width,
        y: (point.y - frame.origin_y) / frame.height,
    })
}

/// Map a fractional position back into the pixel space of `frame`.
pub fn to_pixel(point: FractionalPoint, frame: &Frame) -> PixelPoint {
    PixelPoint {
        x: point.x * frame.width + frame.origin_x,
        y: point.y * frame.height + frame.origin_y,
    }
}

/// Scale a fractional extent to pixels, each axis independently.
pub fn scale_extent(fractional_width: f64, fractional_height: f64, frame: &Frame) -> PixelExtent {
    PixelExtent {
        width: fractional_width * frame.width,
        height: fractional_height * frame.height,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
