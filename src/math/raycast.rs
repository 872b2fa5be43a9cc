//! Ray versus bounding-box collision clamping.
//!
//! Camera moves are straight segments from the current position to an
//! intended end point. [`clamp_position_with_raycast`] shortens a segment that
//! would enter the subject's bounding box, and pushes an end point that lies
//! inside the box back out through the nearest face. In both cases the result
//! keeps a small clearance from the surface (see [`surface_offset`]).

use super::Vec3;
use crate::scene::Bounds;

/// Fraction of the box diagonal used as surface clearance.
pub const SURFACE_OFFSET_RATIO: f64 = 0.05;

/// Lower bound on the surface clearance.
pub const MIN_SURFACE_OFFSET: f64 = 0.1;

/// Upper bound on the surface clearance.
pub const MAX_SURFACE_OFFSET: f64 = 0.5;

/// Parametric overlap below which a ray only grazes the box.
const GRAZE_EPS: f64 = 1e-9;

/// Clearance kept between the camera and the box surface.
///
/// `clamp(0.05 × diagonal, 0.1, 0.5)`
#[must_use]
pub fn surface_offset(bounds: &Bounds) -> f64 {
    (SURFACE_OFFSET_RATIO * bounds.diagonal()).clamp(MIN_SURFACE_OFFSET, MAX_SURFACE_OFFSET)
}

/// Clamp a straight camera move against the (vertically adjusted) bounds.
///
/// # Arguments
///
/// * `start` - Current camera position
/// * `intended_end` - Where the move wants to end
/// * `bounds` - Subject bounding box, before vertical adjustment
/// * `vertical_adjustment` - Y offset applied to the box
///
/// # Returns
///
/// - The entry point pulled back along the ray by the surface offset, if the
///   segment enters the box before reaching its end
/// - The nearest surface point pushed outward along its face normal, if the
///   end lies inside the box and the segment does not enter it from outside
/// - `intended_end` otherwise
#[must_use]
pub fn clamp_position_with_raycast(
    start: &Vec3,
    intended_end: &Vec3,
    bounds: &Bounds,
    vertical_adjustment: f64,
) -> Vec3 {
    let adjusted = bounds.shifted_vertically(vertical_adjustment);
    let offset = surface_offset(&adjusted);
    let delta = intended_end - start;
    let length = delta.norm();

    if length > 0.0 && !adjusted.contains_strictly(start) {
        if let Some((t_enter, t_exit)) = ray_box_interval(start, &delta, &adjusted.min, &adjusted.max) {
            if t_exit - t_enter > GRAZE_EPS && t_enter <= 1.0 {
                let travel = (t_enter * length - offset).max(0.0);
                return start + delta * (travel / length);
            }
        }
    }

    if adjusted.contains_strictly(intended_end) {
        return push_out_of_box(intended_end, &adjusted, offset);
    }

    *intended_end
}

/// Slab-method intersection of the ray `origin + t·dir` (t ≥ 0) with a box.
///
/// Returns the parametric interval `(t_enter, t_exit)` with `t_enter`
/// clipped to 0, or `None` when the ray misses. A ray running parallel to a
/// face and exactly on it counts as a miss.
#[must_use]
pub fn ray_box_interval(origin: &Vec3, dir: &Vec3, min: &Vec3, max: &Vec3) -> Option<(f64, f64)> {
    let mut t_min = 0.0_f64;
    let mut t_max = f64::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-12 {
            // Sliding along a face is not a penetration
            if o <= min[axis] || o >= max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_max < t_min {
            return None;
        }
    }

    Some((t_min, t_max))
}

/// Move a point inside the box to just outside its nearest face.
fn push_out_of_box(point: &Vec3, bounds: &Bounds, offset: f64) -> Vec3 {
    let mut best_axis = 0;
    let mut best_sign = -1.0;
    let mut best_gap = f64::INFINITY;

    for axis in 0..3 {
        let to_min = point[axis] - bounds.min[axis];
        let to_max = bounds.max[axis] - point[axis];
        if to_min < best_gap {
            best_gap = to_min;
            best_axis = axis;
            best_sign = -1.0;
        }
        if to_max < best_gap {
            best_gap = to_max;
            best_axis = axis;
            best_sign = 1.0;
        }
    }

    let mut out = *point;
    out[best_axis] = if best_sign < 0.0 {
        bounds.min[best_axis] - offset
    } else {
        bounds.max[best_axis] + offset
    };
    out
}
