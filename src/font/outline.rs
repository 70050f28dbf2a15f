//! Glyph outline geometry and comparison
//!
//! Outlines are kept in FreeType's 26.6 fixed-point units exactly as
//! the loader produced them (no hinting), so two fonts can be compared
//! point by point.

/// 26.6 fixed-point point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Vector outline of one glyph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphOutline {
    /// Index of the last point of each contour
    pub ends: Vec<usize>,
    /// Contour points in order (on- and off-curve)
    pub points: Vec<Point>,
}

impl GlyphOutline {
    pub fn new(ends: Vec<usize>, points: Vec<Point>) -> Self {
        Self { ends, points }
    }

    pub fn contour_count(&self) -> usize {
        self.ends.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Return a copy with every point shifted by (dx, dy)
    #[cfg(test)]
    pub(crate) fn translated(&self, dx: i64, dy: i64) -> Self {
        Self {
            ends: self.ends.clone(),
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        }
    }
}

/// Glyph bounding box (26.6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BoundingBox {
    /// Empty when it covers no area on either axis
    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }
}

/// Bounds and horizontal advance probed at a small pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBounds {
    pub bbox: BoundingBox,
    /// Horizontal advance (26.6)
    pub advance: i64,
}

/// Compare two outlines within a per-axis tolerance.
///
/// Cheap structural checks run first:
/// 1. contour count
/// 2. each contour end index
/// 3. total point count
/// 4. per-point `|dx| <= tolerance && |dy| <= tolerance`
///
/// A malformed outline simply compares unequal.
pub fn outlines_equal(a: &GlyphOutline, b: &GlyphOutline, tolerance: i64) -> bool {
    if a.contour_count() != b.contour_count() {
        return false;
    }

    if a.ends.iter().zip(&b.ends).any(|(ea, eb)| ea != eb) {
        return false;
    }

    if a.point_count() != b.point_count() {
        return false;
    }

    a.points.iter().zip(&b.points).all(|(pa, pb)| {
        (pa.x - pb.x).abs() <= tolerance && (pa.y - pb.y).abs() <= tolerance
    })
}
