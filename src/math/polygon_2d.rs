use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Twice the signed area of the triangle `(a, b, c)`.
fn orient(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `p`, known to be collinear with `a`-`b`, lies within the segment's box.
fn within_box(a: &Point2, b: &Point2, p: &Point2, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Returns `true` if the closed segments `a0-a1` and `b0-b1` share at least one point.
///
/// Touching endpoints and collinear overlaps count as intersections.
#[must_use]
pub fn segments_intersect_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let scale = (a1 - a0).norm() * (b1 - b0).norm();
    let eps = TOLERANCE * (1.0 + scale);

    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    let straddles = |p: f64, q: f64| (p > eps && q < -eps) || (p < -eps && q > eps);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    let lin_eps = TOLERANCE.sqrt();
    (d1.abs() <= eps && within_box(b0, b1, a0, lin_eps))
        || (d2.abs() <= eps && within_box(b0, b1, a1, lin_eps))
        || (d3.abs() <= eps && within_box(a0, a1, b0, lin_eps))
        || (d4.abs() <= eps && within_box(a0, a1, b1, lin_eps))
}

/// Finds the first pair of non-adjacent edges of a closed polygon that touch or cross.
///
/// Edge `i` runs from `points[i]` to `points[(i + 1) % n]`.
#[must_use]
pub fn first_self_intersection(points: &[Point2]) -> Option<(usize, usize)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            // The last edge closes onto the first one.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_intersect_2d(a0, a1, b0, b1) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Returns the sorted `x` coordinates where the horizontal line at `y` crosses the polygon.
///
/// Uses the half-open rule on edge endpoints so that every vertex is counted once, which
/// keeps the crossing count even and makes the result usable for even-odd filling.
#[must_use]
pub fn scanline_crossings(points: &[Point2], y: f64) -> Vec<f64> {
    let n = points.len();
    let mut xs = Vec::new();
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        if (p.y <= y) != (q.y <= y) {
            let t = (y - p.y) / (q.y - p.y);
            xs.push(p.x + t * (q.x - p.x));
        }
    }
    xs.sort_by(f64::total_cmp);
    xs
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    scanline_crossings(points, p.y)
        .iter()
        .filter(|&&x| x < p.x)
        .count()
        % 2
        == 1
}
