//! Geometry primitives shared by the paint commands and icon designs.
//!
//! All coverage tests sample at pixel centres (`x + 0.5`, `y + 0.5`) and
//! are binary: a pixel is either inside a shape or not.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Square covering a whole `size` x `size` canvas.
    pub fn canvas(size: u32) -> Self {
        Self::new(0, 0, size, size)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by `d` on every side. Collapses to an empty rect instead of
    /// going negative.
    pub fn inset(&self, d: u32) -> Rect {
        Rect {
            x: self.x + d as i32,
            y: self.y + d as i32,
            width: self.width.saturating_sub(d * 2),
            height: self.height.saturating_sub(d * 2),
        }
    }

    /// Pixel span `(x0, y0, x1, y1)` of this rect clipped to a canvas, with
    /// exclusive upper bounds. `None` when nothing is visible.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Whether `(px, py)` lies inside `rect` with corners rounded by `radius`.
/// The radius is clamped to half the shorter side.
pub fn rounded_rect_contains(rect: &Rect, radius: f32, px: f32, py: f32) -> bool {
    if rect.is_empty() {
        return false;
    }
    let left = rect.x as f32;
    let top = rect.y as f32;
    let right = rect.right() as f32;
    let bottom = rect.bottom() as f32;
    if px < left || px > right || py < top || py > bottom {
        return false;
    }

    let r = radius
        .min(rect.width as f32 / 2.0)
        .min(rect.height as f32 / 2.0)
        .max(0.0);
    let dx = (left + r - px).max(px - (right - r)).max(0.0);
    let dy = (top + r - py).max(py - (bottom - r)).max(0.0);
    dx * dx + dy * dy <= r * r
}

/// Whether `(px, py)` lies inside the axis-aligned ellipse inscribed in `rect`.
pub fn ellipse_contains(rect: &Rect, px: f32, py: f32) -> bool {
    if rect.is_empty() {
        return false;
    }
    let rx = rect.width as f32 / 2.0;
    let ry = rect.height as f32 / 2.0;
    let nx = (px - (rect.x as f32 + rx)) / rx;
    let ny = (py - (rect.y as f32 + ry)) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn segment_distance(a: Point, b: Point, p: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Offset that centres `extent` within `span`, rounding toward negative
/// infinity when the difference is odd or negative.
pub fn centered(span: u32, extent: u32) -> i32 {
    (span as i32 - extent as i32).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_limits_to_canvas() {
        let r = Rect::new(-4, 10, 20, 100);
        assert_eq!(r.clip(32, 32), Some((0, 10, 16, 32)));
        assert_eq!(Rect::new(40, 0, 4, 4).clip(32, 32), None);
    }

    #[test]
    fn inset_collapses_instead_of_underflowing() {
        let r = Rect::new(0, 0, 6, 6).inset(4);
        assert!(r.is_empty());
        assert_eq!(r.x, 4);
    }

    #[test]
    fn rounded_rect_excludes_corners() {
        let r = Rect::canvas(192);
        assert!(!rounded_rect_contains(&r, 24.0, 0.5, 0.5));
        assert!(!rounded_rect_contains(&r, 24.0, 191.5, 191.5));
        assert!(rounded_rect_contains(&r, 24.0, 96.5, 0.5));
        assert!(rounded_rect_contains(&r, 24.0, 24.5, 24.5));
    }

    #[test]
    fn zero_radius_is_plain_rect() {
        let r = Rect::new(2, 2, 4, 4);
        assert!(rounded_rect_contains(&r, 0.0, 2.5, 2.5));
        assert!(!rounded_rect_contains(&r, 0.0, 6.5, 2.5));
    }

    #[test]
    fn ellipse_contains_centre_not_corner() {
        let r = Rect::new(0, 0, 10, 20);
        assert!(ellipse_contains(&r, 5.0, 10.0));
        assert!(!ellipse_contains(&r, 0.5, 0.5));
        assert!(!ellipse_contains(&Rect::new(0, 0, 0, 5), 0.0, 0.0));
    }

    #[test]
    fn segment_distance_handles_endpoints_and_degenerate() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(segment_distance(a, b, Point::new(5.0, 3.0)), 3.0);
        assert_eq!(segment_distance(a, b, Point::new(13.0, 4.0)), 5.0);
        assert_eq!(segment_distance(a, a, Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn centered_floors_like_integer_division() {
        assert_eq!(centered(192, 45), 73);
        assert_eq!(centered(10, 13), -2);
    }
}
