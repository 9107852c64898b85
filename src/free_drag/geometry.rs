use egui::{Rect, Vec2};

/// Anything with a layout box: position and size before any drag translation is applied.
///
/// This is the `offsetLeft`/`offsetTop`/`offsetWidth`/`offsetHeight` view of an element.
pub trait LayoutGeometry {
    fn offset_rect(&self) -> Rect;
}

impl LayoutGeometry for Rect {
    #[inline]
    fn offset_rect(&self) -> Rect {
        *self
    }
}

/// The range of offsets a draggable element may take inside its boundary.
///
/// `min_x > max_x` (or `min_y > max_y`) happens when the draggable element is larger than the
/// boundary. That is allowed: clamping then collapses to the minimum.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Clamp a raw offset into these bounds, axis by axis.
    #[inline]
    pub fn clamp_offset(&self, raw: Vec2) -> Vec2 {
        Vec2::new(
            clamp(raw.x, self.min_x, self.max_x),
            clamp(raw.y, self.min_y, self.max_y),
        )
    }

    /// True if `offset` is a value [`Self::clamp_offset`] can produce.
    pub fn contains(&self, offset: Vec2) -> bool {
        self.clamp_offset(offset) == offset
    }

    /// The draggable element does not fit inside the boundary on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

/// `max(lo, min(v, hi))`.
///
/// Unlike [`f32::clamp`] this never panics: with `lo > hi` the result is `lo`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(v.min(hi))
}

/// Bounds for `draggable` inside `boundary`, read from the current layout.
///
/// Not cached: layouts change between drags, so call this at every drag start.
pub fn compute_bounds(
    draggable: &impl LayoutGeometry,
    boundary: &impl LayoutGeometry,
) -> Bounds {
    let boundary = boundary.offset_rect();
    let draggable = draggable.offset_rect();

    let min_x = boundary.min.x;
    let min_y = boundary.min.y;
    Bounds {
        min_x,
        min_y,
        max_x: min_x + boundary.width() - draggable.width(),
        max_y: min_y + boundary.height() - draggable.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(w, h))
    }

    #[test]
    fn bounds_from_boundary_origin_and_sizes() {
        let bounds = compute_bounds(&rect(0.0, 0.0, 50.0, 50.0), &rect(0.0, 0.0, 400.0, 300.0));
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 350.0, 250.0));
        assert!(!bounds.is_degenerate());
    }

    #[test]
    fn bounds_follow_boundary_position() {
        // The draggable element's own position is irrelevant, only its size.
        let bounds = compute_bounds(
            &rect(500.0, 500.0, 20.0, 10.0),
            &rect(30.0, 40.0, 100.0, 60.0),
        );
        assert_eq!(bounds, Bounds::new(30.0, 40.0, 110.0, 90.0));
    }

    #[test]
    fn oversized_draggable_gives_degenerate_bounds_that_collapse_to_min() {
        let bounds = compute_bounds(&rect(0.0, 0.0, 500.0, 20.0), &rect(10.0, 10.0, 100.0, 100.0));
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.max_x, -390.0);

        assert_eq!(bounds.clamp_offset(vec2(-1000.0, 50.0)), vec2(10.0, 50.0));
        assert_eq!(bounds.clamp_offset(vec2(1000.0, 1000.0)), vec2(10.0, 90.0));
    }

    #[test]
    fn clamp_keeps_values_inside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 7.0, 2.0), 7.0);
    }

    #[test]
    fn contains_matches_clamp() {
        let bounds = Bounds::new(0.0, 0.0, 350.0, 250.0);
        assert!(bounds.contains(vec2(350.0, 0.0)));
        assert!(!bounds.contains(vec2(351.0, 0.0)));
        assert!(!bounds.contains(vec2(0.0, -0.5)));
    }
}
