use std::f64::consts::{FRAC_PI_4, PI};

/// Rounds half-way cases towards positive infinity.
///
/// `f64::round` rounds half-way cases away from zero, which moves negative
/// coordinates to a different grid line than the reference layout does. The
/// simulation uses this everywhere it rounds so the diagram is reproducible.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snap coordinates to the nearest intersection of a square grid
#[must_use]
pub fn snap_to_grid(x: f64, y: f64, grid_size: f64) -> (f64, f64) {
    let snapped_x = round_half_up(x / grid_size) * grid_size;
    let snapped_y = round_half_up(y / grid_size) * grid_size;
    (snapped_x, snapped_y)
}

/// Nearest multiple of 45° to `angle` (radians)
#[must_use]
pub fn nearest_octolinear_angle(angle: f64) -> f64 {
    round_half_up(angle / FRAC_PI_4) * FRAC_PI_4
}

/// Calculates the shortest angular distance between two angles in radians.
///
/// Returns a value in the range [0, π], representing the smallest angle
/// between the two input angles when considering the circular nature of angles.
///
/// # Examples
/// ```
/// use std::f64::consts::PI;
/// use metro_graph::geometry::angle_difference;
///
/// // Angles wrapping around (350° and 10° are only 20° apart)
/// let diff = angle_difference(350.0 * PI / 180.0, 10.0 * PI / 180.0);
/// assert!((diff - 20.0 * PI / 180.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn angle_difference(a1: f64, a2: f64) -> f64 {
    let diff = (a1 - a2).abs() % (2.0 * PI);
    if diff > PI {
        2.0 * PI - diff
    } else {
        diff
    }
}

/// Counter-clockwise gap from `from` to `to`, in [0, 2π)
#[must_use]
pub fn ccw_gap(from: f64, to: f64) -> f64 {
    let gap = to - from;
    if gap < 0.0 {
        gap + 2.0 * PI
    } else {
        gap
    }
}

/// How far the segment `a -> b` is from the closest of the eight compass directions (radians)
#[must_use]
pub fn octolinear_deviation(a: (f64, f64), b: (f64, f64)) -> f64 {
    let angle = (b.1 - a.1).atan2(b.0 - a.0);
    angle_difference(angle, nearest_octolinear_angle(angle))
}

/// Axis-aligned bounding box of a set of points as `(min_x, min_y, max_x, max_y)`
///
/// Returns `None` for an empty set.
#[must_use]
pub fn bounding_box<I>(points: I) -> Option<(f64, f64, f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    points.into_iter().fold(None, |acc, (x, y)| match acc {
        None => Some((x, y, x, y)),
        Some((min_x, min_y, max_x, max_y)) => {
            Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)))
        }
    })
}
