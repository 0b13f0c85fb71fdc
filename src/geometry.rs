//! Coordinate spaces and rectangle overlap.
//!
//! Face backends report boxes in normalized coordinates (fractions of the
//! frame), hand backends report pixels. The two spaces get distinct types so
//! an overlap test across spaces cannot typecheck; `NormalizedRect::to_pixels`
//! is the only conversion point.

/// Current frame width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned rectangle in pixel space. Edges may lie outside the frame;
/// degenerate (zero-area) rectangles are valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    /// Build from edges, swapping as needed so `left <= right` and
    /// `top <= bottom` hold.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Build from the top-left corner plus width/height (the native output
    /// shape of hand detection models).
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_edges(x, y, x + w, y + h)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Boundary-inclusive overlap test: two rectangles do not overlap iff one
    /// lies entirely to the left, right, above, or below the other. Sharing
    /// exactly one edge or corner counts as overlap.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }

    /// Intersection-over-union. Zero when disjoint or when both boxes are
    /// degenerate.
    pub fn iou(&self, other: &PixelRect) -> f32 {
        if !self.intersects(other) {
            return 0.0;
        }
        let iw = self.right.min(other.right) - self.left.max(other.left);
        let ih = self.bottom.min(other.bottom) - self.top.max(other.top);
        let inter = iw.max(0.0) * ih.max(0.0);
        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            0.0
        } else {
            inter / union
        }
    }
}

/// Axis-aligned rectangle with edges expressed as fractions (0..=1) of the
/// frame width/height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl NormalizedRect {
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// True when every edge sits inside the unit square. A small epsilon
    /// absorbs float drift from model post-processing.
    pub fn is_unit(&self) -> bool {
        const EPS: f32 = 1.0e-3;
        self.left >= -EPS && self.top >= -EPS && self.right <= 1.0 + EPS && self.bottom <= 1.0 + EPS
    }

    /// Convert into pixel space against the current frame dimensions.
    pub fn to_pixels(&self, dims: FrameDimensions) -> PixelRect {
        let w = dims.width as f32;
        let h = dims.height as f32;
        PixelRect {
            left: self.left * w,
            top: self.top * h,
            right: self.right * w,
            bottom: self.bottom * h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::from_edges(5.0, 5.0, 15.0, 15.0);
        let c = PixelRect::from_edges(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert_eq!(a.intersects(&c), c.intersects(&a));
    }

    #[test]
    fn shared_edge_counts_as_overlap() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::from_edges(10.0, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn shared_corner_counts_as_overlap() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::from_edges(10.0, 10.0, 20.0, 20.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn disjoint_rectangles_do_not_overlap() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::from_edges(20.0, 20.0, 30.0, 30.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn negative_coordinates_are_valid() {
        let a = PixelRect::from_edges(-20.0, -20.0, -5.0, -5.0);
        let b = PixelRect::from_edges(-10.0, -10.0, 0.0, 0.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn degenerate_rectangle_still_overlaps_on_contact() {
        let point = PixelRect::from_edges(5.0, 5.0, 5.0, 5.0);
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        assert!(point.intersects(&point));
        assert!(a.intersects(&point));
    }

    #[test]
    fn from_edges_normalizes_order() {
        let r = PixelRect::from_edges(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r, PixelRect::from_edges(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn unit_rect_normalizes_to_full_frame() {
        let dims = FrameDimensions {
            width: 640,
            height: 480,
        };
        let face = NormalizedRect::from_edges(0.0, 0.0, 1.0, 1.0);
        let px = face.to_pixels(dims);
        assert_eq!(px, PixelRect::from_edges(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn normalization_scales_each_edge_by_its_axis() {
        let dims = FrameDimensions {
            width: 640,
            height: 480,
        };
        let face = NormalizedRect::from_edges(0.25, 0.5, 0.75, 1.0);
        let px = face.to_pixels(dims);
        assert_eq!(px, PixelRect::from_edges(160.0, 240.0, 480.0, 480.0));
    }

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = PixelRect::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::from_edges(20.0, 0.0, 30.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn unit_check_accepts_boundary_values() {
        assert!(NormalizedRect::from_edges(0.0, 0.0, 1.0, 1.0).is_unit());
        assert!(!NormalizedRect::from_edges(0.0, 0.0, 1.5, 1.0).is_unit());
    }
}
