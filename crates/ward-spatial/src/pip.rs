//! Ray-casting point-in-polygon tests.

use crate::geojson::{PolygonRings, Ring};

/// Standard even-odd ray cast against one ring. Positions are `[lon, lat]`.
#[must_use]
pub fn point_in_ring(x: f64, y: f64, ring: &Ring) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i][0], ring[i][1]);
        let (xj, yj) = (ring[j][0], ring[j][1]);
        // The edge crosses the horizontal ray only when its endpoints
        // straddle y, which also guarantees a nonzero denominator.
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the exterior ring and outside every hole.
#[must_use]
pub fn point_in_polygon(x: f64, y: f64, rings: &PolygonRings) -> bool {
    let Some(exterior) = rings.first() else {
        return false;
    };
    if !point_in_ring(x, y, exterior) {
        return false;
    }
    !rings[1..].iter().any(|hole| point_in_ring(x, y, hole))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![
            vec![min, min],
            vec![max, min],
            vec![max, max],
            vec![min, max],
            vec![min, min],
        ]
    }

    #[test]
    fn inside_and_outside_a_square() {
        let ring = square(0.0, 10.0);
        assert!(point_in_ring(5.0, 5.0, &ring));
        assert!(!point_in_ring(15.0, 5.0, &ring));
        assert!(!point_in_ring(-1.0, -1.0, &ring));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        assert!(!point_in_ring(0.0, 0.0, &Vec::new()));
        assert!(!point_in_ring(0.0, 0.0, &vec![vec![1.0, 1.0], vec![2.0, 2.0]]));
    }

    #[test]
    fn holes_are_excluded() {
        let rings: PolygonRings = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(point_in_polygon(2.0, 2.0, &rings));
        assert!(!point_in_polygon(5.0, 5.0, &rings));
        assert!(!point_in_polygon(11.0, 5.0, &rings));
    }

    #[test]
    fn empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(0.0, 0.0, &PolygonRings::new()));
    }
}
