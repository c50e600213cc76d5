use super::{Point3, Vector3, TOLERANCE};

/// Arithmetic mean of a polygon's corner positions.
///
/// Returns the origin for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Unit normal of a polygon taken from its first corner.
///
/// Uses the cross product of the edges `p0 -> p1` and `p1 -> p2` only, so
/// non-planar polygons get the normal of their first corner. Degenerate
/// corners (collinear or coincident points) yield the zero vector.
#[must_use]
pub fn corner_normal(points: &[Point3]) -> Vector3 {
    if points.len() < 3 {
        return Vector3::zeros();
    }
    let e0 = points[1] - points[0];
    let e1 = points[2] - points[1];
    e0.cross(&e1)
        .try_normalize(TOLERANCE)
        .unwrap_or_else(Vector3::zeros)
}

/// Offsets every corner of a planar polygon towards its interior.
///
/// Each pair of adjacent edges is moved inward by `distance` (within the
/// plane defined by `normal`) and the corner is placed where the two offset
/// edges meet. Negative distances grow the polygon.
#[must_use]
pub fn inset_polygon(points: &[Point3], normal: &Vector3, distance: f64) -> Vec<Point3> {
    let n = points.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let in_dir = (curr - prev).try_normalize(TOLERANCE);
        let out_dir = (next - curr).try_normalize(TOLERANCE);
        let (Some(in_dir), Some(out_dir)) = (in_dir, out_dir) else {
            result.push(curr);
            continue;
        };

        // Left of an edge is the interior for counter-clockwise winding.
        let in_left = normal.cross(&in_dir);
        let out_left = normal.cross(&out_dir);
        let Some(bisector) = (in_left + out_left).try_normalize(TOLERANCE) else {
            result.push(curr + in_left * distance);
            continue;
        };
        let cos_half = bisector.dot(&in_left);
        if cos_half.abs() < TOLERANCE {
            result.push(curr + in_left * distance);
            continue;
        }
        result.push(curr + bisector * (distance / cos_half));
    }
    result
}

/// Moves `from` a distance of `amount` towards `to`.
#[must_use]
pub fn step_towards(from: &Point3, to: &Point3, amount: f64) -> Point3 {
    match (to - from).try_normalize(TOLERANCE) {
        Some(dir) => from + dir * amount,
        None => *from,
    }
}
