use serde::Deserialize;

/// How far above the hovered shape there has to be free space for the tooltip to open upward.
pub const VERTICAL_BUFFER: f64 = 50.0;

/// The fraction of the tooltip's width it gets shifted sideways from the hovered shape.
const HORIZONTAL_SHIFT_DIVISOR: f64 = 8.0;

/// The screen-space rectangle occupied by a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The rendered size of the tooltip panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

/// The screen coordinates of the tooltip's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
}

impl TooltipPosition {
    /// Determines whether this position is the same as another one, ignoring floating point noise.
    pub fn approx_eq(&self, other: &TooltipPosition) -> bool {
        float_cmp::approx_eq!(f64, self.left, other.left, ulps = 2)
            && float_cmp::approx_eq!(f64, self.top, other.top, ulps = 2)
    }
}

/// Finds where to put the tooltip for a hovered shape.
///
/// The tooltip normally opens up and to the left of the shape. If the shape is too close to the left edge of the
/// screen it opens to the right instead, and if there isn't enough room above the shape it opens below it.
///
/// The right and bottom edges of the screen are not taken into account, so the result can put the tooltip partly
/// off-screen on those sides. Negative coordinates are passed through as well.
pub fn compute_position(bounding_box: &BoundingBox, size: &TooltipSize) -> TooltipPosition {
    let shift = size.width / HORIZONTAL_SHIFT_DIVISOR;
    let left = if bounding_box.left <= shift {
        bounding_box.left + shift
    } else {
        bounding_box.left - shift
    };

    let top = if bounding_box.top <= size.height + VERTICAL_BUFFER {
        bounding_box.top + bounding_box.height
    } else {
        bounding_box.top - size.height
    };

    TooltipPosition { left, top }
}
