use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing a box with a non-positive extent.
///
/// A box whose max coordinate is not strictly greater than its min coordinate
/// has no area, and every geometric quantity derived from it (IoU in
/// particular) becomes meaningless. Construction is the only place geometry
/// can go wrong, so validity is checked once here and never again downstream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeometryError {
    #[error("failed to create BoundingBox, xmax <= xmin ({xmax} <= {xmin})")]
    NonPositiveWidth { xmin: f32, xmax: f32 },
    #[error("failed to create BoundingBox, ymax <= ymin ({ymax} <= {ymin})")]
    NonPositiveHeight { ymin: f32, ymax: f32 },
}

/// An axis-aligned bounding box.
///
/// A bounding box is the rectangle an object detector draws around an object
/// it found in an image. This project uses the standard convention of the left
/// side of the image being x=0 and the top of the image being y=0. Coordinates
/// may be normalized to [0, 1] or in pixels, as long as a single request uses
/// one convention consistently.
///
/// On the wire a box is the four-float array `[xmin, ymin, xmax, ymax]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f32; 4]", try_from = "[f32; 4]")]
pub struct BoundingBox {
    xmin: f32,
    ymin: f32,
    xmax: f32,
    ymax: f32,
}

impl BoundingBox {
    /// Checks that the box has positive width and height before constructing.
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Result<Self, InvalidGeometryError> {
        if xmax <= xmin {
            Err(InvalidGeometryError::NonPositiveWidth { xmin, xmax })
        } else if ymax <= ymin {
            Err(InvalidGeometryError::NonPositiveHeight { ymin, ymax })
        } else {
            Ok(BoundingBox {
                xmin,
                ymin,
                xmax,
                ymax,
            })
        }
    }

    pub fn xmin(&self) -> f32 {
        self.xmin
    }

    pub fn ymin(&self) -> f32 {
        self.ymin
    }

    pub fn xmax(&self) -> f32 {
        self.xmax
    }

    pub fn ymax(&self) -> f32 {
        self.ymax
    }

    pub fn area(&self) -> f32 {
        (self.xmax - self.xmin) * (self.ymax - self.ymin)
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// Standard intersection-over-union of two boxes.
    ///
    /// Returns 0.0 when the boxes do not overlap. Pure and deterministic;
    /// validity of both boxes is guaranteed by construction.
    pub fn intersection_over_union(&self, other: &BoundingBox) -> f32 {
        let xmin_i = self.xmin.max(other.xmin);
        let ymin_i = self.ymin.max(other.ymin);
        let xmax_i = self.xmax.min(other.xmax);
        let ymax_i = self.ymax.min(other.ymax);
        if xmax_i <= xmin_i || ymax_i <= ymin_i {
            return 0.0;
        }
        let intersection = (xmax_i - xmin_i) * (ymax_i - ymin_i);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(bbox: BoundingBox) -> [f32; 4] {
        [bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax]
    }
}

impl TryFrom<[f32; 4]> for BoundingBox {
    type Error = InvalidGeometryError;

    fn try_from(coords: [f32; 4]) -> Result<Self, Self::Error> {
        BoundingBox::new(coords[0], coords[1], coords[2], coords[3])
    }
}
