use serde::{Deserialize, Serialize};

use crate::geometry::bounding_box;

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A surface with no area has not been measured yet; nothing is fitted to it
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Uniform scale plus offset mapping simulation space onto a viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    /// Fit `points` into `viewport`, keeping `padding` clear on every side and centring the result
    ///
    /// Returns `None` for an empty viewport or an empty point set. A zero extent on
    /// one axis is treated as 1 so a single station or a straight line still fits.
    #[must_use]
    pub fn fit<I>(points: I, viewport: Viewport, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        if viewport.is_empty() {
            return None;
        }
        let (min_x, min_y, max_x, max_y) = bounding_box(points)?;

        let data_width = non_zero(max_x - min_x);
        let data_height = non_zero(max_y - min_y);
        let view_width = viewport.width - padding * 2.0;
        let view_height = viewport.height - padding * 2.0;
        let scale = (view_width / data_width).min(view_height / data_height);

        Some(Self {
            scale,
            offset_x: (viewport.width - data_width * scale) / 2.0 - min_x * scale,
            offset_y: (viewport.height - data_height * scale) / 2.0 - min_y * scale,
        })
    }

    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

fn non_zero(extent: f64) -> f64 {
    if extent == 0.0 {
        1.0
    } else {
        extent
    }
}
