use crate::types::Point;

/// Point at parameter `t` on the cubic bezier with control points `pts`.
pub fn cubic_bezier(pts: &[Point; 4], t: f64) -> Point {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * t * u * u;
    let w2 = 3.0 * t * t * u;
    let w3 = t * t * t;
    Point::new(
        w0 * pts[0].x + w1 * pts[1].x + w2 * pts[2].x + w3 * pts[3].x,
        w0 * pts[0].y + w1 * pts[1].y + w2 * pts[2].y + w3 * pts[3].y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARC: [Point; 4] = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 4.0),
        Point::new(8.0, 4.0),
        Point::new(8.0, 0.0),
    ];

    #[test]
    fn test_endpoints() {
        assert_eq!(cubic_bezier(&ARC, 0.0), ARC[0]);
        assert_eq!(cubic_bezier(&ARC, 1.0), ARC[3]);
    }

    #[test]
    fn test_midpoint_of_symmetric_arc() {
        // (1/8)P0 + (3/8)P1 + (3/8)P2 + (1/8)P3
        assert_eq!(cubic_bezier(&ARC, 0.5), Point::new(4.0, 3.0));
    }
}
