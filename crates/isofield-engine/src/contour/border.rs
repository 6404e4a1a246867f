use crate::coords::Vec2;
use crate::grid::Placement;

use super::IsolineGeometry;

/// Rebuilds the fixed level-0 border polyline: the placed domain square as
/// eight points (corners plus edge midpoints), closed back onto the first.
///
/// Depends only on the placement, never on samples or the isoline count.
pub fn border_polyline(placement: &Placement, out: &mut IsolineGeometry) {
    let l = placement.limit;
    let (dx, dy) = (placement.dx, placement.dy);
    let half = l * 0.5;

    out.positions.clear();
    out.positions.extend_from_slice(&[
        Vec2::new(dx, dy),
        Vec2::new(dx, half + dy),
        Vec2::new(dx, l + dy),
        Vec2::new(half + dx, l + dy),
        Vec2::new(l + dx, l + dy),
        Vec2::new(l + dx, half + dy),
        Vec2::new(l + dx, dy),
        Vec2::new(half + dx, dy),
    ]);

    out.indices.clear();
    out.indices.extend_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::grid::FitMode;

    #[test]
    fn border_is_the_placed_square() {
        let p = Placement::compute(Viewport::new(800.0, 600.0), FitMode::Letterbox);
        let mut out = IsolineGeometry::new();
        border_polyline(&p, &mut out);

        assert_eq!(out.positions.len(), 8);
        assert_eq!(out.positions[0], Vec2::new(100.0, 0.0));
        assert_eq!(out.positions[4], Vec2::new(700.0, 600.0));
        assert_eq!(out.indices, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn border_closes_on_first_point() {
        let p = Placement::compute(Viewport::new(100.0, 100.0), FitMode::Overscan);
        let mut out = IsolineGeometry::new();
        border_polyline(&p, &mut out);
        assert_eq!(out.indices.first(), out.indices.last());
    }
}
