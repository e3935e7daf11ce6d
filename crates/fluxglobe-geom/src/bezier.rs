//! Bézier curve evaluation and sampling.

use glam::DVec3;

/// Evaluate a quadratic Bézier curve at `t`.
#[must_use]
pub fn quadratic(p0: DVec3, p1: DVec3, p2: DVec3, t: f64) -> DVec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Evaluate a cubic Bézier curve at `t`.
#[must_use]
pub fn cubic(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Sample `count` evenly spaced parameters in `[0, 1]`.
///
/// The first and last samples are set to `start` and `end` verbatim rather
/// than evaluated. `count` must be at least 2.
pub(crate) fn sample(
    count: usize,
    start: DVec3,
    end: DVec3,
    eval: impl Fn(f64) -> DVec3,
) -> Vec<DVec3> {
    debug_assert!(count >= 2);
    #[allow(clippy::cast_precision_loss)]
    let last = (count - 1) as f64;

    let mut points: Vec<DVec3> = (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / last;
            eval(t)
        })
        .collect();

    points[0] = start;
    points[count - 1] = end;
    points
}
